//! Data transfer objects
//!
//! Request DTOs (deserialized + validated input) and response DTOs
//! (serialized output) for the HTTP layer.

mod mappers;
mod requests;
mod responses;

pub use requests::*;
pub use responses::*;
