// Trait definitions for dependency injection
//
// Stores and side-effect services the actions call into. Postgres/filesystem
// implementations live next to their domain; in-memory doubles live in
// test_dependencies.
//
// Naming convention: Base* for trait names (e.g., BaseChatStore, BaseClock)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::pagination::ValidatedPaginationArgs;
use crate::common::{ChatId, ChatRoomId, EBazaarId, MediaId, StoreResult, UserId};
use crate::domains::activity_log::NewActivity;
use crate::domains::chatrooms::filters::ChatFilter;
use crate::domains::chatrooms::models::{Chat, ChatRoom, NewChat};
use crate::domains::ebazaar::filters::EBazaarFilter;
use crate::domains::ebazaar::models::{
    EBazaar, EBazaarChanges, Media, NewEBazaar, NewMedia, OrderWithCustomer,
};

// =============================================================================
// Chat Store
// =============================================================================

#[async_trait]
pub trait BaseChatStore: Send + Sync {
    async fn find_room(&self, id: ChatRoomId) -> StoreResult<Option<ChatRoom>>;

    /// Insert and commit a chat. Returns the stored row.
    async fn insert_chat(&self, chat: NewChat) -> StoreResult<Chat>;

    async fn find_chat(&self, id: ChatId) -> StoreResult<Option<Chat>>;

    /// One page of chats ordered by id, plus whether more rows exist.
    async fn list_chats(
        &self,
        filter: &ChatFilter,
        args: &ValidatedPaginationArgs,
    ) -> StoreResult<(Vec<Chat>, bool)>;
}

// =============================================================================
// EBazaar Store
// =============================================================================

#[async_trait]
pub trait BaseEBazaarStore: Send + Sync {
    async fn list(
        &self,
        filter: &EBazaarFilter,
        args: &ValidatedPaginationArgs,
    ) -> StoreResult<(Vec<EBazaar>, bool)>;

    async fn find(&self, id: EBazaarId) -> StoreResult<Option<EBazaar>>;

    /// Insert the e-bazaar and its initial media atomically.
    async fn insert(&self, ebazaar: NewEBazaar, media: Vec<NewMedia>) -> StoreResult<EBazaar>;

    /// Rewrite the editable fields. `StoreError::NotFound` if the row is gone.
    async fn update(&self, id: EBazaarId, changes: EBazaarChanges) -> StoreResult<EBazaar>;

    /// Hard delete, cascading media and saves. Returns the media rows that
    /// were attached so their files can be removed.
    async fn delete(&self, id: EBazaarId) -> StoreResult<Vec<Media>>;

    /// Media for several e-bazaars in one call, ordered by position.
    async fn media_for(&self, ids: &[EBazaarId]) -> StoreResult<Vec<Media>>;

    /// Append media at the next position.
    async fn add_media(&self, media: NewMedia) -> StoreResult<Media>;

    /// Detach one media row. `StoreError::NotFound` if it is not attached to `ebazaar_id`.
    async fn remove_media(&self, ebazaar_id: EBazaarId, media_id: MediaId) -> StoreResult<Media>;

    /// Orders with their customers, loaded in one batch.
    async fn orders_with_customers(&self, id: EBazaarId) -> StoreResult<Vec<OrderWithCustomer>>;

    async fn live_at(&self, now: DateTime<Utc>) -> StoreResult<Vec<EBazaar>>;

    /// E-bazaars with `from <= start_at < to`.
    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<EBazaar>>;

    /// Flip the saved flag for `user_id`. Returns the new state.
    async fn toggle_save(&self, id: EBazaarId, user_id: UserId) -> StoreResult<bool>;
}

// =============================================================================
// Lifecycle Hooks
// =============================================================================

#[async_trait]
pub trait BaseDedicationMatcher: Send + Sync {
    /// Match pending song dedications against a freshly created chat.
    /// Returns the number of dedications matched.
    async fn match_chat(&self, chat: &Chat) -> Result<u64>;
}

#[async_trait]
pub trait BaseActivityLog: Send + Sync {
    async fn record(&self, entry: NewActivity) -> Result<()>;
}

// =============================================================================
// Media Storage
// =============================================================================

#[async_trait]
pub trait BaseMediaStorage: Send + Sync {
    /// Store `bytes` under `key`, returning the public URL.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String>;

    /// Remove the object at `key`. Missing objects are not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

// =============================================================================
// Clock
// =============================================================================

pub trait BaseClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
