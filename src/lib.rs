//! Travel catalog console.
//!
//! Client-side core of an administrative console for destinations and hotels kept by
//! a remote REST backend: a typed catalog client, a generic form/list state machine
//! instantiated per entity kind, and a read-only hotels-by-destination viewer.

pub mod client;
pub mod coerce;
pub mod config;
pub mod console;
pub mod display;
pub mod errors;
pub mod form;
pub mod kinds;
pub mod list;
pub mod manager;
pub mod models;
pub mod shape;
pub mod viewer;

pub use client::CatalogClient;
pub use config::Config;
pub use errors::{ClientError, FormError};
pub use form::{EntityForm, FormMode, SubmitOutcome};
pub use kinds::{DestinationKind, EntityKind, HotelKind};
pub use list::{Confirm, DeleteOutcome, EntityList};
pub use manager::{DestinationManager, EntityManager, HotelManager};
pub use viewer::{CrossFilterViewer, SharedViewer};
