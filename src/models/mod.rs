//! Data models for the travel catalog.
//!
//! Read models are tolerant of whatever the backend returns; submit payloads are the
//! exact shapes the forms send.

mod destination;
mod hotel;
pub(crate) mod lenient;

pub use destination::*;
pub use hotel::*;
