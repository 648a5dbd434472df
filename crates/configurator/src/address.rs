pub mod entities;
pub mod reducer;
pub mod state;
pub mod validation;

pub use entities::{AddressField, AddressRecord, ConnectionType, FieldErrors};
pub use reducer::{reduce, AddressUpdate};
pub use state::AddressState;
