// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod messages;
pub mod meta;
pub mod pagination;
pub mod search;
pub mod validation;

pub use auth::{Actor, AuthError, Capability, Resource};
pub use entity_ids::*;
pub use errors::{ApiError, StoreError, StoreResult};
pub use id::{Id, V7};
pub use messages::Notice;
pub use meta::Meta;
pub use pagination::{Page, PageInfo, PageQuery, PaginationArgs, ValidatedPaginationArgs};
pub use validation::ValidationErrors;
