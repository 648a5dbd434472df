pub mod entities;
pub mod helpers;
pub mod params;
pub mod requests;
pub mod stores;
