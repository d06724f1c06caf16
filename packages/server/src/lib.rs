// Playday - API Core
//
// Backend for chat rooms and e-bazaars: JSON over HTTP, Postgres storage,
// capability-based authorization and an audit trail of changes.
//
// Domains live in domains/*; each owns its models, store, actions and edges.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
