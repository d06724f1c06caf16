//! Auth domain - bearer token issuing and verification
//!
//! Tokens are minted elsewhere (login is out of scope); this server only
//! verifies them and turns the claims into an authorization actor.

pub mod jwt;

pub use jwt::{Claims, JwtService};
