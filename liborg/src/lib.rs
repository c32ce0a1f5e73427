//! This is a library that provides objects and functionality to help you manage
//! organisations and the geolocated sites that belong to them, keeping track of
//! everything inside of a database.

pub mod database;
pub mod error;
pub mod loadable;
pub mod location;
pub mod organisation;
pub mod query;

pub use database::Database;
pub use error::Error;
pub use error::Result;
