//! In-memory port implementations shared by use-case and route tests.
//!
//! Every fake is `Clone` and shares its state between clones, so a test can
//! hand one clone to the service under test and inspect the other.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::token_provider::ACCESS_TOKEN_TYPE;
use crate::auth::application::ports::outgoing::{
    CreateUserData, HashError, PasswordHasher, TokenClaims, TokenError, TokenProvider, UserQuery,
    UserQueryError, UserQueryResult, UserRepository, UserRepositoryError,
};
use crate::listing::application::domain::entities::{
    Listing, ListingDetails, MediaRecord, PropertyType,
};
use crate::listing::application::ports::outgoing::{
    ListingFilter, ListingQuery, ListingQueryError, ListingStore, ListingStoreError, ListingTx,
    NewListing, NewMedia,
};
use crate::multimedia::application::domain::entities::{MediaKind, MediaPayload, StoredObject};
use crate::multimedia::application::ports::outgoing::{MediaStore, MediaStoreError};
use crate::shared::pagination::{Page, PageRequest};

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
struct UsersState {
    rows: Vec<UserQueryResult>,
    next_id: i32,
    failure: Option<String>,
    cascade: Option<InMemoryListings>,
}

/// Backs both `UserQuery` and `UserRepository`.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    state: Arc<Mutex<UsersState>>,
}

impl InMemoryUsers {
    pub fn insert(&self, username: &str, is_admin: bool) -> UserId {
        self.insert_with_password(username, "password", is_admin)
    }

    pub fn insert_with_password(&self, username: &str, password: &str, is_admin: bool) -> UserId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = UserId::from(state.next_id);
        // Later inserts are strictly newer.
        let created_at = Utc::now() + Duration::milliseconds(state.next_id as i64);
        state.rows.push(UserQueryResult {
            id,
            username: username.to_string(),
            phone: "+221771234567".to_string(),
            password_hash: format!("hashed:{password}"),
            is_admin,
            created_at,
        });
        id
    }

    /// Inserts with a fixed id; later generated ids continue after it.
    pub fn insert_with_id(&self, id: i32, username: &str, is_admin: bool) -> UserId {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.rows.push(UserQueryResult {
            id: UserId::from(id),
            username: username.to_string(),
            phone: "+221771234567".to_string(),
            password_hash: "hashed:password".to_string(),
            is_admin,
            created_at: Utc::now() + Duration::milliseconds(id as i64),
        });
        UserId::from(id)
    }

    pub fn row_by_username(&self, username: &str) -> Option<UserQueryResult> {
        let state = self.state.lock().unwrap();
        state.rows.iter().find(|r| r.username == username).cloned()
    }

    pub fn row(&self, id: UserId) -> Option<UserQueryResult> {
        let state = self.state.lock().unwrap();
        state.rows.iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    /// Every following call answers with a database error.
    pub fn fail_with(&self, msg: &str) {
        self.state.lock().unwrap().failure = Some(msg.to_string());
    }

    /// `delete_user` also removes the user's listings and media from `listings`.
    pub fn cascade_to(&self, listings: &InMemoryListings) {
        self.state.lock().unwrap().cascade = Some(listings.clone());
    }

    fn check_query(&self) -> Result<(), UserQueryError> {
        match &self.state.lock().unwrap().failure {
            Some(msg) => Err(UserQueryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }

    fn check_repo(&self) -> Result<(), UserRepositoryError> {
        match &self.state.lock().unwrap().failure {
            Some(msg) => Err(UserRepositoryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.check_query()?;
        Ok(self.row(user_id))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.check_query()?;
        Ok(self.row_by_username(username.trim()))
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserQueryError> {
        self.check_query()?;
        let mut rows = self.state.lock().unwrap().rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .map(User::from)
            .collect();

        Ok(Page {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn count_users(&self) -> Result<u64, UserQueryError> {
        self.check_query()?;
        Ok(self.len() as u64)
    }

    async fn count_admins(&self) -> Result<u64, UserQueryError> {
        self.check_query()?;
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().filter(|r| r.is_admin).count() as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        self.check_repo()?;
        if self.row_by_username(&data.username).is_some() {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let row = UserQueryResult {
            id: UserId::from(state.next_id),
            username: data.username,
            phone: data.phone,
            password_hash: data.password_hash,
            is_admin: data.is_admin,
            created_at: Utc::now() + Duration::milliseconds(state.next_id as i64),
        };
        state.rows.push(row.clone());
        Ok(User::from(row))
    }

    async fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<User, UserRepositoryError> {
        self.check_repo()?;
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        row.is_admin = is_admin;
        Ok(User::from(row.clone()))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        self.check_repo()?;
        let cascade = {
            let mut state = self.state.lock().unwrap();
            let before = state.rows.len();
            state.rows.retain(|r| r.id != user_id);
            if state.rows.len() == before {
                return Err(UserRepositoryError::UserNotFound);
            }
            state.cascade.clone()
        };

        if let Some(listings) = cascade {
            listings.remove_owned_by(user_id);
        }
        Ok(())
    }
}

// ============================================================================
// Password hashing / tokens
// ============================================================================

/// Hash is `hashed:{password}`.
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Tokens look like `token-for-{user_id}`.
pub struct FakeTokenProvider;

impl FakeTokenProvider {
    pub fn bearer(user_id: UserId) -> String {
        format!("Bearer token-for-{user_id}")
    }
}

impl TokenProvider for FakeTokenProvider {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        Ok(format!("token-for-{user_id}"))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let sub = token
            .strip_prefix("token-for-")
            .and_then(|id| id.parse::<i32>().ok())
            .ok_or(TokenError::MalformedToken)?;

        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub,
            exp: now + 3600,
            iat: now,
            nbf: now,
            iss: "test".to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        })
    }
}

// ============================================================================
// Media store
// ============================================================================

#[derive(Default)]
struct MediaState {
    stored: Vec<(String, MediaKind)>,
    upload_calls: usize,
    delete_calls: usize,
    failing_upload: Option<(usize, MediaStoreError)>,
    fail_deletes: bool,
}

/// Remote store double. Uploaded ids look like `listings/images/{stem}_{n}`.
#[derive(Clone, Default)]
pub struct FakeMediaStore {
    state: Arc<Mutex<MediaState>>,
}

impl FakeMediaStore {
    pub fn seed(&self, remote_id: &str, kind: MediaKind) {
        self.state
            .lock()
            .unwrap()
            .stored
            .push((remote_id.to_string(), kind));
    }

    pub fn stored_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.stored.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn upload_calls(&self) -> usize {
        self.state.lock().unwrap().upload_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.state.lock().unwrap().delete_calls
    }

    /// The `n`-th upload (1-based) fails with `err`.
    pub fn fail_upload_number(&self, n: usize, err: MediaStoreError) {
        self.state.lock().unwrap().failing_upload = Some((n, err));
    }

    pub fn fail_deletes(&self) {
        self.state.lock().unwrap().fail_deletes = true;
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(
        &self,
        payload: &MediaPayload,
        kind: MediaKind,
    ) -> Result<StoredObject, MediaStoreError> {
        let mut state = self.state.lock().unwrap();
        state.upload_calls += 1;
        let n = state.upload_calls;

        if let Some((fail_at, err)) = &state.failing_upload {
            if *fail_at == n {
                return Err(err.clone());
            }
        }

        let folder = match kind {
            MediaKind::Image => "listings/images",
            MediaKind::Video => "listings/videos",
        };
        let stem = payload
            .file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&payload.file_name);
        let remote_id = format!("{folder}/{stem}_{n}");
        state.stored.push((remote_id.clone(), kind));

        Ok(StoredObject {
            url: format!("https://media.test/{kind}/upload/{remote_id}"),
            remote_id,
            kind,
        })
    }

    async fn delete(&self, remote_id: &str, _kind: MediaKind) -> bool {
        let mut state = self.state.lock().unwrap();
        state.delete_calls += 1;
        if state.fail_deletes {
            return false;
        }
        match state.stored.iter().position(|(id, _)| id == remote_id) {
            Some(pos) => {
                state.stored.remove(pos);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Listings
// ============================================================================

#[derive(Clone, Default)]
struct Tables {
    /// Listing rows; `media` is always empty here.
    listings: BTreeMap<i32, Listing>,
    media: BTreeMap<i32, MediaRecord>,
    next_listing_id: i32,
    next_media_id: i32,
}

impl Tables {
    fn assemble(&self, id: i32) -> Option<Listing> {
        let mut listing = self.listings.get(&id)?.clone();
        listing.media = self
            .media
            .values()
            .filter(|m| m.listing_id == id)
            .cloned()
            .collect();
        Some(listing)
    }
}

#[derive(Clone, Default)]
struct Failures {
    begin: Option<String>,
    media_inserts: Option<String>,
    commits: Option<String>,
    queries: Option<String>,
}

#[derive(Default)]
struct ListingsState {
    committed: Tables,
    failures: Failures,
}

/// Backs `ListingStore` and `ListingQuery`. Transactions work on a private
/// copy of the tables that replaces the committed state on `commit`.
#[derive(Clone, Default)]
pub struct InMemoryListings {
    state: Arc<Mutex<ListingsState>>,
}

impl InMemoryListings {
    /// Commits a rental listing with the given `(public_id, kind)` media rows.
    pub fn seed_listing(&self, owner: UserId, media: &[(&str, MediaKind)]) -> i32 {
        self.seed(owner, PropertyType::Rental, media)
    }

    pub fn seed_listing_of_type(&self, owner: UserId, property_type: PropertyType) -> i32 {
        self.seed(owner, property_type, &[])
    }

    fn seed(&self, owner: UserId, property_type: PropertyType, media: &[(&str, MediaKind)]) -> i32 {
        let mut state = self.state.lock().unwrap();
        let tables = &mut state.committed;
        tables.next_listing_id += 1;
        let id = tables.next_listing_id;
        let created_at = seeded_at(id);

        tables.listings.insert(
            id,
            Listing {
                id,
                owner,
                title: format!("Annonce numéro {id}"),
                description: "Maison familiale avec jardin et garage".to_string(),
                price: 100_000,
                property_type,
                created_at,
                updated_at: created_at,
                media: Vec::new(),
            },
        );

        for (public_id, kind) in media {
            tables.next_media_id += 1;
            let media_id = tables.next_media_id;
            tables.media.insert(
                media_id,
                MediaRecord {
                    id: media_id,
                    listing_id: id,
                    public_id: public_id.to_string(),
                    url: format!("https://media.test/{kind}/upload/{public_id}"),
                    file_type: *kind,
                    created_at,
                },
            );
        }

        id
    }

    pub fn get(&self, id: i32) -> Option<Listing> {
        self.state.lock().unwrap().committed.assemble(id)
    }

    pub fn media_of(&self, id: i32) -> Vec<MediaRecord> {
        self.get(id).map(|l| l.media).unwrap_or_default()
    }

    pub fn listing_count(&self) -> usize {
        self.state.lock().unwrap().committed.listings.len()
    }

    pub fn media_count(&self) -> usize {
        self.state.lock().unwrap().committed.media.len()
    }

    pub fn fail_begin(&self, msg: &str) {
        self.state.lock().unwrap().failures.begin = Some(msg.to_string());
    }

    pub fn fail_media_inserts(&self, msg: &str) {
        self.state.lock().unwrap().failures.media_inserts = Some(msg.to_string());
    }

    pub fn fail_commits(&self, msg: &str) {
        self.state.lock().unwrap().failures.commits = Some(msg.to_string());
    }

    pub fn fail_queries(&self, msg: &str) {
        self.state.lock().unwrap().failures.queries = Some(msg.to_string());
    }

    fn remove_owned_by(&self, owner: UserId) {
        let mut state = self.state.lock().unwrap();
        let tables = &mut state.committed;
        let ids: Vec<i32> = tables
            .listings
            .values()
            .filter(|l| l.owner == owner)
            .map(|l| l.id)
            .collect();
        tables.media.retain(|_, m| !ids.contains(&m.listing_id));
        tables.listings.retain(|id, _| !ids.contains(id));
    }

    fn read(&self) -> Result<Tables, ListingQueryError> {
        let state = self.state.lock().unwrap();
        match &state.failures.queries {
            Some(msg) => Err(ListingQueryError::DatabaseError(msg.clone())),
            None => Ok(state.committed.clone()),
        }
    }
}

/// Seeded rows are one second apart so ordering by date is deterministic.
fn seeded_at(id: i32) -> DateTime<Utc> {
    Utc::now() - Duration::days(1) + Duration::seconds(id as i64)
}

pub struct InMemoryListingTx {
    shared: Arc<Mutex<ListingsState>>,
    staged: Tables,
    failures: Failures,
}

#[async_trait]
impl ListingStore for InMemoryListings {
    type Tx = InMemoryListingTx;

    async fn begin(&self) -> Result<Self::Tx, ListingStoreError> {
        let state = self.state.lock().unwrap();
        if let Some(msg) = &state.failures.begin {
            return Err(ListingStoreError::DatabaseError(msg.clone()));
        }
        Ok(InMemoryListingTx {
            shared: self.state.clone(),
            staged: state.committed.clone(),
            failures: state.failures.clone(),
        })
    }
}

#[async_trait]
impl ListingTx for InMemoryListingTx {
    async fn insert_listing(&mut self, listing: NewListing) -> Result<i32, ListingStoreError> {
        self.staged.next_listing_id += 1;
        let id = self.staged.next_listing_id;
        let details: &ListingDetails = &listing.details;
        self.staged.listings.insert(
            id,
            Listing {
                id,
                owner: listing.owner,
                title: details.title().to_string(),
                description: details.description().to_string(),
                price: details.price(),
                property_type: details.property_type(),
                created_at: listing.created_at,
                updated_at: listing.created_at,
                media: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn insert_media(&mut self, media: NewMedia) -> Result<MediaRecord, ListingStoreError> {
        if let Some(msg) = &self.failures.media_inserts {
            return Err(ListingStoreError::DatabaseError(msg.clone()));
        }
        if !self.staged.listings.contains_key(&media.listing_id) {
            return Err(ListingStoreError::DatabaseError(
                "media references a missing listing".to_string(),
            ));
        }

        self.staged.next_media_id += 1;
        let record = MediaRecord {
            id: self.staged.next_media_id,
            listing_id: media.listing_id,
            public_id: media.public_id,
            url: media.url,
            file_type: media.file_type,
            created_at: media.created_at,
        };
        self.staged.media.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_listing(
        &mut self,
        listing_id: i32,
        details: &ListingDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ListingStoreError> {
        let row = self
            .staged
            .listings
            .get_mut(&listing_id)
            .ok_or(ListingStoreError::NotFound)?;
        row.title = details.title().to_string();
        row.description = details.description().to_string();
        row.price = details.price();
        row.property_type = details.property_type();
        row.updated_at = updated_at;
        Ok(())
    }

    async fn delete_media(&mut self, media_ids: &[i32]) -> Result<u64, ListingStoreError> {
        let removed = media_ids
            .iter()
            .filter(|id| self.staged.media.remove(id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn delete_listing(&mut self, listing_id: i32) -> Result<u64, ListingStoreError> {
        let before = self.staged.media.len();
        self.staged.media.retain(|_, m| m.listing_id != listing_id);
        let removed_media = (before - self.staged.media.len()) as u64;

        self.staged
            .listings
            .remove(&listing_id)
            .ok_or(ListingStoreError::NotFound)?;
        Ok(removed_media)
    }

    async fn commit(self) -> Result<(), ListingStoreError> {
        if let Some(msg) = &self.failures.commits {
            return Err(ListingStoreError::DatabaseError(msg.clone()));
        }
        self.shared.lock().unwrap().committed = self.staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), ListingStoreError> {
        Ok(())
    }
}

#[async_trait]
impl ListingQuery for InMemoryListings {
    async fn find_by_id(&self, listing_id: i32) -> Result<Option<Listing>, ListingQueryError> {
        Ok(self.read()?.assemble(listing_id))
    }

    async fn list(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, ListingQueryError> {
        let tables = self.read()?;
        let mut rows: Vec<&Listing> = tables
            .listings
            .values()
            .filter(|l| filter.property_type.map_or(true, |t| l.property_type == t))
            .filter(|l| filter.owner.map_or(true, |o| l.owner == o))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .filter_map(|l| tables.assemble(l.id))
            .collect();

        Ok(Page {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn count_listings(&self) -> Result<u64, ListingQueryError> {
        Ok(self.read()?.listings.len() as u64)
    }

    async fn media_for_owner(&self, owner: UserId) -> Result<Vec<MediaRecord>, ListingQueryError> {
        let tables = self.read()?;
        Ok(tables
            .media
            .values()
            .filter(|m| {
                tables
                    .listings
                    .get(&m.listing_id)
                    .is_some_and(|l| l.owner == owner)
            })
            .cloned()
            .collect())
    }
}
