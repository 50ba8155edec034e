//! Request parameters and response types for the Ola Maps REST APIs.
//!
//! Parameter structs carry the raw string values callers provide; required
//! fields are checked through [`Validate`] and numeric values are parsed into
//! typed views only when a provider URL is built. Response structs mirror the
//! provider JSON and tolerate missing fields.

pub mod common;
pub mod places;
pub mod routing;
pub mod tiles;
pub mod validated;

pub use validated::{Normalizable, Validate, ValidationError};
