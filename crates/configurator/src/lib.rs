pub mod address;
pub mod autocomplete;
pub mod catalog;
pub mod checkout;
pub mod drafts;
pub mod equipment;
pub mod order_summary;
pub mod pricing;
pub mod resolver;
pub mod timers;
pub mod wizard;
