//! Kernel module - server infrastructure and dependencies.

pub mod clock;
pub mod deps;
pub mod media_storage;
pub mod test_dependencies;
pub mod traits;

pub use clock::SystemClock;
pub use deps::ServerDeps;
pub use media_storage::LocalMediaStorage;
pub use test_dependencies::{
    InMemoryChatStore, InMemoryEBazaarStore, MockActivityLog, MockClock, MockDedicationMatcher,
    MockMediaStorage, TestDependencies,
};
pub use traits::*;
