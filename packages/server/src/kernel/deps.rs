//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by every
//! action. All stores and side-effect services sit behind trait objects so
//! tests can swap in the doubles from `test_dependencies`.

use std::sync::Arc;

use chrono::FixedOffset;
use sqlx::PgPool;

use crate::config::Config;
use crate::domains::activity_log::PgActivityLog;
use crate::domains::chatrooms::store::PgChatStore;
use crate::domains::dedications::PgDedicationMatcher;
use crate::domains::ebazaar::store::PgEBazaarStore;
use crate::kernel::{
    BaseActivityLog, BaseChatStore, BaseClock, BaseDedicationMatcher, BaseEBazaarStore,
    BaseMediaStorage, LocalMediaStorage, SystemClock,
};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub chats: Arc<dyn BaseChatStore>,
    pub ebazaars: Arc<dyn BaseEBazaarStore>,
    /// Runs after every chat insert
    pub dedication_matcher: Arc<dyn BaseDedicationMatcher>,
    pub activity_log: Arc<dyn BaseActivityLog>,
    pub media_storage: Arc<dyn BaseMediaStorage>,
    pub clock: Arc<dyn BaseClock>,
    /// Timezone for "today" listings
    pub utc_offset: FixedOffset,
    pub max_upload_bytes: usize,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chats: Arc<dyn BaseChatStore>,
        ebazaars: Arc<dyn BaseEBazaarStore>,
        dedication_matcher: Arc<dyn BaseDedicationMatcher>,
        activity_log: Arc<dyn BaseActivityLog>,
        media_storage: Arc<dyn BaseMediaStorage>,
        clock: Arc<dyn BaseClock>,
        utc_offset: FixedOffset,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            chats,
            ebazaars,
            dedication_matcher,
            activity_log,
            media_storage,
            clock,
            utc_offset,
            max_upload_bytes,
        }
    }

    /// Production wiring: Postgres stores, local media storage, wall clock
    pub fn from_config(pool: PgPool, config: &Config) -> Self {
        let clock: Arc<dyn BaseClock> = Arc::new(SystemClock);
        Self::new(
            Arc::new(PgChatStore::new(pool.clone())),
            Arc::new(PgEBazaarStore::new(pool.clone())),
            Arc::new(PgDedicationMatcher::new(pool.clone(), clock.clone())),
            Arc::new(PgActivityLog::new(pool)),
            Arc::new(LocalMediaStorage::new(
                config.media_root.clone(),
                config.media_base_url.clone(),
            )),
            clock,
            config.utc_offset,
            config.max_upload_bytes,
        )
    }
}
