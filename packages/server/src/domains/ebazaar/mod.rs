//! E-bazaar domain - scheduled online bazaars with media, orders and saves.

pub mod actions;
pub mod data;
pub mod edges;
pub mod filters;
pub mod models;
pub mod reference;
pub mod requests;
pub mod schedule;
pub mod store;

pub use models::{EBazaar, Media, MediaKind, Order};
pub use store::PgEBazaarStore;
