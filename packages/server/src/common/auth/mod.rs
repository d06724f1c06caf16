//! Authorization module
//!
//! Provides a fluent API for capability checks at the entry of each action:
//!
//! ```rust
//! use playday_core::common::auth::{Actor, Capability, Resource};
//! use playday_core::common::UserId;
//!
//! # fn run() -> Result<(), playday_core::common::auth::AuthError> {
//! let actor = Actor::new(UserId::new(), true);
//! actor.can(Capability::Create).on(Resource::EBazaar).check()?;
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! Checks run before any record is loaded, so a denial never reveals whether
//! the target exists.

mod builder;
mod capability;
mod errors;

pub use builder::{authorize, Actor, CapabilityBuilder, Decision, ResourceCheck};
pub use capability::{Capability, Resource};
pub use errors::AuthError;
