// TestDependencies - in-memory implementations for testing
//
// Provides stores and services that can be injected into ServerDeps for tests.
// Every double records its calls so tests can assert on side effects.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    BaseActivityLog, BaseChatStore, BaseClock, BaseDedicationMatcher, BaseEBazaarStore,
    BaseMediaStorage, ServerDeps,
};
use crate::common::pagination::{paginate_sorted, ValidatedPaginationArgs};
use crate::common::{ChatId, ChatRoomId, EBazaarId, MediaId, OrderId, StoreError, StoreResult, UserId};
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::domains::activity_log::{ActivityEvent, LogName, NewActivity};
use crate::domains::chatrooms::filters::ChatFilter;
use crate::domains::chatrooms::models::{Chat, ChatRoom, NewChat};
use crate::domains::dedications::SongDedication;
use crate::domains::ebazaar::filters::EBazaarFilter;
use crate::domains::ebazaar::models::{
    EBazaar, EBazaarChanges, Media, NewEBazaar, NewMedia, Order, OrderWithCustomer,
};
use crate::domains::member::User;

// =============================================================================
// Mock Clock
// =============================================================================

/// Settable clock shared by the in-memory stores.
#[derive(Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl BaseClock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// =============================================================================
// In-memory Chat Store
// =============================================================================

pub struct InMemoryChatStore {
    clock: MockClock,
    rooms: Arc<Mutex<Vec<ChatRoom>>>,
    chats: Arc<Mutex<Vec<Chat>>>,
    insert_calls: Arc<Mutex<Vec<ChatId>>>,
}

impl InMemoryChatStore {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            rooms: Arc::new(Mutex::new(Vec::new())),
            chats: Arc::new(Mutex::new(Vec::new())),
            insert_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a chat room and return its id
    pub fn seed_room(&self, name: &str) -> ChatRoomId {
        let room = ChatRoom {
            id: ChatRoomId::new(),
            name: name.to_string(),
            created_at: self.clock.now(),
        };
        let id = room.id;
        self.rooms.lock().unwrap().push(room);
        id
    }

    /// Store a chat directly, bypassing actions and hooks
    pub fn seed_chat(&self, chat: NewChat) -> Chat {
        let chat = chat.into_chat(self.clock.now());
        self.chats.lock().unwrap().push(chat.clone());
        chat
    }

    pub fn chats(&self) -> Vec<Chat> {
        self.chats.lock().unwrap().clone()
    }

    /// Ids of chats inserted through the store trait
    pub fn insert_calls(&self) -> Vec<ChatId> {
        self.insert_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseChatStore for InMemoryChatStore {
    async fn find_room(&self, id: ChatRoomId) -> StoreResult<Option<ChatRoom>> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|room| room.id == id)
            .cloned())
    }

    async fn insert_chat(&self, chat: NewChat) -> StoreResult<Chat> {
        let chat = chat.into_chat(self.clock.now());
        self.insert_calls.lock().unwrap().push(chat.id);
        self.chats.lock().unwrap().push(chat.clone());
        Ok(chat)
    }

    async fn find_chat(&self, id: ChatId) -> StoreResult<Option<Chat>> {
        Ok(self
            .chats
            .lock()
            .unwrap()
            .iter()
            .find(|chat| chat.id == id)
            .cloned())
    }

    async fn list_chats(
        &self,
        filter: &ChatFilter,
        args: &ValidatedPaginationArgs,
    ) -> StoreResult<(Vec<Chat>, bool)> {
        let mut matching: Vec<Chat> = self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|chat| filter.matches(chat))
            .cloned()
            .collect();
        matching.sort_by_key(|chat| chat.id.into_uuid());
        Ok(paginate_sorted(matching, args, |chat| chat.id.into_uuid()))
    }
}

// =============================================================================
// In-memory EBazaar Store
// =============================================================================

pub struct InMemoryEBazaarStore {
    clock: MockClock,
    ebazaars: Arc<Mutex<Vec<EBazaar>>>,
    media: Arc<Mutex<Vec<Media>>>,
    orders: Arc<Mutex<Vec<Order>>>,
    users: Arc<Mutex<Vec<User>>>,
    saves: Arc<Mutex<Vec<(EBazaarId, UserId)>>>,
    media_for_calls: Arc<Mutex<Vec<Vec<EBazaarId>>>>,
    order_calls: Arc<Mutex<Vec<EBazaarId>>>,
}

impl InMemoryEBazaarStore {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            ebazaars: Arc::new(Mutex::new(Vec::new())),
            media: Arc::new(Mutex::new(Vec::new())),
            orders: Arc::new(Mutex::new(Vec::new())),
            users: Arc::new(Mutex::new(Vec::new())),
            saves: Arc::new(Mutex::new(Vec::new())),
            media_for_calls: Arc::new(Mutex::new(Vec::new())),
            order_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Store an e-bazaar directly, bypassing actions and the audit log
    pub fn seed_ebazaar(&self, ebazaar: NewEBazaar) -> EBazaar {
        let ebazaar = ebazaar.into_ebazaar(self.clock.now());
        self.ebazaars.lock().unwrap().push(ebazaar.clone());
        ebazaar
    }

    pub fn seed_media(&self, media: NewMedia) -> Media {
        self.attach(media)
    }

    pub fn seed_user(&self, name: &str, email: &str) -> User {
        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn seed_order(&self, ebazaar_id: EBazaarId, customer_id: UserId, total_cents: i64) -> Order {
        let order = Order {
            id: OrderId::new(),
            ebazaar_id,
            customer_id,
            quantity: 1,
            total_cents,
            status: "paid".to_string(),
            created_at: self.clock.now(),
        };
        self.orders.lock().unwrap().push(order.clone());
        order
    }

    pub fn ebazaars(&self) -> Vec<EBazaar> {
        self.ebazaars.lock().unwrap().clone()
    }

    pub fn media(&self) -> Vec<Media> {
        self.media.lock().unwrap().clone()
    }

    pub fn is_saved(&self, id: EBazaarId, user_id: UserId) -> bool {
        self.saves
            .lock()
            .unwrap()
            .iter()
            .any(|save| *save == (id, user_id))
    }

    /// Id batches passed to `media_for`
    pub fn media_for_calls(&self) -> Vec<Vec<EBazaarId>> {
        self.media_for_calls.lock().unwrap().clone()
    }

    /// E-bazaars whose orders were loaded
    pub fn order_calls(&self) -> Vec<EBazaarId> {
        self.order_calls.lock().unwrap().clone()
    }

    fn attach(&self, media: NewMedia) -> Media {
        let mut stored = self.media.lock().unwrap();
        let position = stored
            .iter()
            .filter(|m| m.ebazaar_id == media.ebazaar_id)
            .map(|m| m.position + 1)
            .max()
            .unwrap_or(0);
        let media = media.into_media(position, self.clock.now());
        stored.push(media.clone());
        media
    }

    fn sorted_by_start(mut rows: Vec<EBazaar>) -> Vec<EBazaar> {
        rows.sort_by(|a, b| a.start_at.cmp(&b.start_at).then(a.id.cmp(&b.id)));
        rows
    }
}

#[async_trait]
impl BaseEBazaarStore for InMemoryEBazaarStore {
    async fn list(
        &self,
        filter: &EBazaarFilter,
        args: &ValidatedPaginationArgs,
    ) -> StoreResult<(Vec<EBazaar>, bool)> {
        let mut matching: Vec<EBazaar> = self
            .ebazaars
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.id.into_uuid());
        Ok(paginate_sorted(matching, args, |e| e.id.into_uuid()))
    }

    async fn find(&self, id: EBazaarId) -> StoreResult<Option<EBazaar>> {
        Ok(self
            .ebazaars
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn insert(&self, ebazaar: NewEBazaar, media: Vec<NewMedia>) -> StoreResult<EBazaar> {
        let ebazaar = ebazaar.into_ebazaar(self.clock.now());
        self.ebazaars.lock().unwrap().push(ebazaar.clone());
        for item in media {
            self.attach(item);
        }
        Ok(ebazaar)
    }

    async fn update(&self, id: EBazaarId, changes: EBazaarChanges) -> StoreResult<EBazaar> {
        let mut ebazaars = self.ebazaars.lock().unwrap();
        let ebazaar = ebazaars
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        ebazaar.apply(changes, self.clock.now());
        Ok(ebazaar.clone())
    }

    async fn delete(&self, id: EBazaarId) -> StoreResult<Vec<Media>> {
        let mut ebazaars = self.ebazaars.lock().unwrap();
        let before = ebazaars.len();
        ebazaars.retain(|e| e.id != id);
        if ebazaars.len() == before {
            return Err(StoreError::NotFound);
        }

        let mut media = self.media.lock().unwrap();
        let (removed, kept): (Vec<Media>, Vec<Media>) =
            media.drain(..).partition(|m| m.ebazaar_id == id);
        *media = kept;
        self.saves.lock().unwrap().retain(|(e, _)| *e != id);
        Ok(removed)
    }

    async fn media_for(&self, ids: &[EBazaarId]) -> StoreResult<Vec<Media>> {
        self.media_for_calls.lock().unwrap().push(ids.to_vec());
        let mut rows: Vec<Media> = self
            .media
            .lock()
            .unwrap()
            .iter()
            .filter(|m| ids.contains(&m.ebazaar_id))
            .cloned()
            .collect();
        rows.sort_by_key(|m| (m.ebazaar_id, m.position, m.id));
        Ok(rows)
    }

    async fn add_media(&self, media: NewMedia) -> StoreResult<Media> {
        Ok(self.attach(media))
    }

    async fn remove_media(&self, ebazaar_id: EBazaarId, media_id: MediaId) -> StoreResult<Media> {
        let mut media = self.media.lock().unwrap();
        let index = media
            .iter()
            .position(|m| m.id == media_id && m.ebazaar_id == ebazaar_id)
            .ok_or(StoreError::NotFound)?;
        Ok(media.remove(index))
    }

    async fn orders_with_customers(&self, id: EBazaarId) -> StoreResult<Vec<OrderWithCustomer>> {
        self.order_calls.lock().unwrap().push(id);
        let users: HashMap<UserId, User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|u| (u.id, u.clone()))
            .collect();
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.ebazaar_id == id)
            .map(|order| OrderWithCustomer {
                customer: users.get(&order.customer_id).cloned(),
                order: order.clone(),
            })
            .collect())
    }

    async fn live_at(&self, now: DateTime<Utc>) -> StoreResult<Vec<EBazaar>> {
        let rows = self
            .ebazaars
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_live_at(now))
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(rows))
    }

    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<EBazaar>> {
        let rows = self
            .ebazaars
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.start_at >= from && e.start_at < to)
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(rows))
    }

    async fn toggle_save(&self, id: EBazaarId, user_id: UserId) -> StoreResult<bool> {
        let mut saves = self.saves.lock().unwrap();
        if let Some(index) = saves.iter().position(|save| *save == (id, user_id)) {
            saves.remove(index);
            Ok(false)
        } else {
            saves.push((id, user_id));
            Ok(true)
        }
    }
}

// =============================================================================
// Mock Dedication Matcher
// =============================================================================

pub struct MockDedicationMatcher {
    clock: MockClock,
    dedications: Arc<Mutex<Vec<SongDedication>>>,
    calls: Arc<Mutex<Vec<ChatId>>>,
    fail: bool,
}

impl MockDedicationMatcher {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            dedications: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Make every call fail after recording it
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn with_dedication(self, dedication: SongDedication) -> Self {
        self.dedications.lock().unwrap().push(dedication);
        self
    }

    pub fn dedications(&self) -> Vec<SongDedication> {
        self.dedications.lock().unwrap().clone()
    }

    /// Chats the matcher was invoked for, in order
    pub fn calls(&self) -> Vec<ChatId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseDedicationMatcher for MockDedicationMatcher {
    async fn match_chat(&self, chat: &Chat) -> Result<u64> {
        self.calls.lock().unwrap().push(chat.id);
        if self.fail {
            return Err(anyhow!("dedication matcher unavailable"));
        }

        let now = self.clock.now();
        let mut matched = 0;
        for dedication in self.dedications.lock().unwrap().iter_mut() {
            if dedication.matches_chat(chat) {
                dedication.mark_matched(chat.id, now);
                matched += 1;
            }
        }
        Ok(matched)
    }
}

// =============================================================================
// Mock Activity Log
// =============================================================================

pub struct MockActivityLog {
    entries: Arc<Mutex<Vec<NewActivity>>>,
}

impl MockActivityLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn entries(&self) -> Vec<NewActivity> {
        self.entries.lock().unwrap().clone()
    }

    /// Entries for one log and event
    pub fn entries_for(&self, log_name: LogName, event: ActivityEvent) -> Vec<NewActivity> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.log_name == log_name && entry.event == event)
            .cloned()
            .collect()
    }
}

impl Default for MockActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseActivityLog for MockActivityLog {
    async fn record(&self, entry: NewActivity) -> Result<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

// =============================================================================
// Mock Media Storage
// =============================================================================

pub struct MockMediaStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    deleted: Arc<Mutex<Vec<String>>>,
}

impl MockMediaStorage {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    /// Keys passed to `delete`
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl Default for MockMediaStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMediaStorage for MockMediaStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(format!("/media/{key}"))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(key.to_string());
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub clock: MockClock,
    pub chats: Arc<InMemoryChatStore>,
    pub ebazaars: Arc<InMemoryEBazaarStore>,
    pub dedication_matcher: Arc<MockDedicationMatcher>,
    pub activity_log: Arc<MockActivityLog>,
    pub media_storage: Arc<MockMediaStorage>,
    pub utc_offset: FixedOffset,
    pub max_upload_bytes: usize,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Dependencies whose clock starts at `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        let clock = MockClock::at(now);
        Self {
            chats: Arc::new(InMemoryChatStore::new(clock.clone())),
            ebazaars: Arc::new(InMemoryEBazaarStore::new(clock.clone())),
            dedication_matcher: Arc::new(MockDedicationMatcher::new(clock.clone())),
            activity_log: Arc::new(MockActivityLog::new()),
            media_storage: Arc::new(MockMediaStorage::new()),
            utc_offset: Utc.fix(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            clock,
        }
    }

    /// Set a mock dedication matcher
    pub fn mock_matcher(mut self, matcher: MockDedicationMatcher) -> Self {
        self.dedication_matcher = Arc::new(matcher);
        self
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Build ServerDeps backed by these doubles
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.chats.clone(),
            self.ebazaars.clone(),
            self.dedication_matcher.clone(),
            self.activity_log.clone(),
            self.media_storage.clone(),
            Arc::new(self.clock.clone()),
            self.utc_offset,
            self.max_upload_bytes,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
