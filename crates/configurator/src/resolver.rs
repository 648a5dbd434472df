pub mod api;
pub mod entities;
pub mod http;
pub mod promotion;

pub use api::AddressResolver;
pub use http::HttpAddressResolver;
pub use promotion::{promote_address, ResolvedAddress, SubmissionError};
