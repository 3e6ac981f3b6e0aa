//! In-memory fakes for service tests
//!
//! `InMemoryStore` implements every repository port over plain vectors and
//! mirrors the storage contract: missing photos and parents are rejected,
//! duplicate reactions/votes surface as conflicts, and deleting a comment
//! removes its replies, reactions and votes.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use gallery_common::JwtService;
use gallery_core::entities::{
    Comment, CommentWithAuthor, Reaction, ReactionCount, Reactor, Role, User, Vote, VoteTally,
    VoteType,
};
use gallery_core::traits::{
    Clock, CommentRepository, ImageStore, ImageUpload, ReactionRepository, RepoResult,
    UserRepository, VoteRepository,
};
use gallery_core::{Actor, DomainError, GuestToken, Snowflake, SnowflakeGenerator};

use crate::services::ServiceContext;

const PHOTO_ID: i64 = 10;

/// The photo every harness starts with
pub(crate) fn photo() -> Snowflake {
    Snowflake::new(PHOTO_ID)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

// ============================================================================
// Clock / image store
// ============================================================================

pub(crate) struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()))
    }

    pub(crate) fn advance(&self, by: Duration) {
        *lock(&self.0) += by;
    }

    pub(crate) fn current(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current()
    }
}

struct FakeImageStore;

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn store(&self, upload: ImageUpload) -> RepoResult<String> {
        Ok(format!("/uploads/comments/test.{}", upload.kind.extension()))
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Default)]
pub(crate) struct InMemoryStore {
    photos: Mutex<HashSet<Snowflake>>,
    users: Mutex<HashMap<Snowflake, User>>,
    comments: Mutex<Vec<Comment>>,
    reactions: Mutex<Vec<Reaction>>,
    votes: Mutex<Vec<Vote>>,
    queries: AtomicUsize,
    race_next_insert: AtomicBool,
    vanish_next_mutation: AtomicBool,
}

impl InMemoryStore {
    pub(crate) fn put_user(&self, user: User) {
        lock(&self.users).insert(user.id, user);
    }

    pub(crate) fn reaction_rows(&self) -> usize {
        lock(&self.reactions).len()
    }

    pub(crate) fn vote_rows(&self) -> usize {
        lock(&self.votes).len()
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_query_count(&self) {
        self.queries.store(0, Ordering::SeqCst);
    }

    /// Make the next reaction or vote insert behave as if a concurrent
    /// request stored the same row first
    pub(crate) fn race_next_insert(&self) {
        self.race_next_insert.store(true, Ordering::SeqCst);
    }

    /// Make the next reaction delete, vote delete or vote type change find
    /// its row already removed by a concurrent request
    pub(crate) fn vanish_next_mutation(&self) {
        self.vanish_next_mutation.store(true, Ordering::SeqCst);
    }

    fn query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }

    fn lost_race(&self) -> bool {
        self.race_next_insert.swap(false, Ordering::SeqCst)
    }

    fn row_vanished(&self) -> bool {
        self.vanish_next_mutation.swap(false, Ordering::SeqCst)
    }

    fn comment_exists(&self, id: Snowflake) -> bool {
        lock(&self.comments).iter().any(|c| c.id == id)
    }

    fn reaction_counts(&self, comment_id: Snowflake) -> Vec<ReactionCount> {
        let mut rows: Vec<Reaction> = lock(&self.reactions)
            .iter()
            .filter(|r| r.comment_id == comment_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.created_at, r.id));

        let mut counts: Vec<ReactionCount> = Vec::new();
        for row in rows {
            match counts.iter_mut().find(|c| c.emoji == row.emoji) {
                Some(count) => count.count += 1,
                None => counts.push(ReactionCount::new(row.emoji, 1)),
            }
        }
        counts
    }

    fn own_emojis(&self, comment_id: Snowflake, actor: &Actor) -> Vec<String> {
        lock(&self.reactions)
            .iter()
            .filter(|r| r.comment_id == comment_id && r.actor == *actor)
            .map(|r| r.emoji.clone())
            .collect()
    }

    fn vote_tally(&self, comment_id: Snowflake) -> VoteTally {
        let mut tally = VoteTally::default();
        for vote in lock(&self.votes).iter().filter(|v| v.comment_id == comment_id) {
            tally.add(vote.vote_type, 1);
        }
        tally
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        self.query();
        Ok(lock(&self.users).get(&id).cloned())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_by_photo(&self, photo_id: Snowflake) -> RepoResult<Vec<CommentWithAuthor>> {
        self.query();
        let users = lock(&self.users);
        let mut comments: Vec<Comment> = lock(&self.comments)
            .iter()
            .filter(|c| c.photo_id == photo_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author = comment.user_id().and_then(|id| users.get(&id).cloned());
                CommentWithAuthor { comment, author }
            })
            .collect())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        self.query();
        Ok(lock(&self.comments).iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.query();
        if !lock(&self.photos).contains(&comment.photo_id) {
            return Err(DomainError::PhotoNotFound);
        }
        if let Some(parent_id) = comment.parent_id {
            if !self.comment_exists(parent_id) {
                return Err(DomainError::ParentNotFound(parent_id));
            }
        }
        lock(&self.comments).push(comment.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: Snowflake,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.query();
        let mut comments = lock(&self.comments);
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::CommentNotFound(id))?;
        comment.content = content.to_string();
        comment.updated_at = Some(updated_at);
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.query();
        let mut comments = lock(&self.comments);
        if !comments.iter().any(|c| c.id == id) {
            return Err(DomainError::CommentNotFound(id));
        }

        let doomed: HashSet<Snowflake> = comments
            .iter()
            .filter(|c| c.id == id || c.parent_id == Some(id))
            .map(|c| c.id)
            .collect();
        comments.retain(|c| !doomed.contains(&c.id));
        lock(&self.reactions).retain(|r| !doomed.contains(&r.comment_id));
        lock(&self.votes).retain(|v| !doomed.contains(&v.comment_id));
        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn count_by_emoji(&self, comment_id: Snowflake) -> RepoResult<Vec<ReactionCount>> {
        self.query();
        Ok(self.reaction_counts(comment_id))
    }

    async fn count_by_emoji_batch(
        &self,
        comment_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, Vec<ReactionCount>>> {
        self.query();
        Ok(comment_ids
            .iter()
            .map(|id| (*id, self.reaction_counts(*id)))
            .filter(|(_, counts)| !counts.is_empty())
            .collect())
    }

    async fn emojis_by_actor(
        &self,
        comment_id: Snowflake,
        actor: &Actor,
    ) -> RepoResult<Vec<String>> {
        self.query();
        Ok(self.own_emojis(comment_id, actor))
    }

    async fn emojis_by_actor_batch(
        &self,
        comment_ids: &[Snowflake],
        actor: &Actor,
    ) -> RepoResult<HashMap<Snowflake, Vec<String>>> {
        self.query();
        Ok(comment_ids
            .iter()
            .map(|id| (*id, self.own_emojis(*id, actor)))
            .filter(|(_, emojis)| !emojis.is_empty())
            .collect())
    }

    async fn find(
        &self,
        comment_id: Snowflake,
        actor: &Actor,
        emoji: &str,
    ) -> RepoResult<Option<Reaction>> {
        self.query();
        Ok(lock(&self.reactions)
            .iter()
            .find(|r| r.comment_id == comment_id && r.actor == *actor && r.is_emoji(emoji))
            .cloned())
    }

    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        self.query();
        if !self.comment_exists(reaction.comment_id) {
            return Err(DomainError::CommentNotFound(reaction.comment_id));
        }

        let mut reactions = lock(&self.reactions);
        if self.lost_race() {
            reactions.push(reaction.clone());
            return Err(DomainError::ReactionAlreadyExists);
        }
        let duplicate = reactions.iter().any(|r| {
            r.comment_id == reaction.comment_id
                && r.actor == reaction.actor
                && r.emoji == reaction.emoji
        });
        if duplicate {
            return Err(DomainError::ReactionAlreadyExists);
        }
        reactions.push(reaction.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        self.query();
        let mut reactions = lock(&self.reactions);
        if self.row_vanished() {
            reactions.retain(|r| r.id != id);
            return Ok(false);
        }
        let before = reactions.len();
        reactions.retain(|r| r.id != id);
        Ok(reactions.len() < before)
    }

    async fn find_reactors(&self, comment_id: Snowflake, emoji: &str) -> RepoResult<Vec<Reactor>> {
        self.query();
        let users = lock(&self.users);
        let mut rows: Vec<Reaction> = lock(&self.reactions)
            .iter()
            .filter(|r| r.comment_id == comment_id && r.is_emoji(emoji))
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.created_at, r.id));

        Ok(rows
            .into_iter()
            .map(|row| match row.actor {
                Actor::Authenticated { user_id } => {
                    let user = users.get(&user_id);
                    Reactor::new(
                        user.and_then(|u| u.name.clone()),
                        user.map(|u| u.username.clone()),
                        false,
                    )
                }
                Actor::Guest { .. } => Reactor::new(None, None, true),
            })
            .collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn tally(&self, comment_id: Snowflake) -> RepoResult<VoteTally> {
        self.query();
        Ok(self.vote_tally(comment_id))
    }

    async fn tally_batch(
        &self,
        comment_ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, VoteTally>> {
        self.query();
        Ok(comment_ids
            .iter()
            .map(|id| (*id, self.vote_tally(*id)))
            .filter(|(_, tally)| *tally != VoteTally::default())
            .collect())
    }

    async fn find(&self, comment_id: Snowflake, actor: &Actor) -> RepoResult<Option<Vote>> {
        self.query();
        Ok(lock(&self.votes)
            .iter()
            .find(|v| v.comment_id == comment_id && v.actor == *actor)
            .cloned())
    }

    async fn vote_types_by_actor_batch(
        &self,
        comment_ids: &[Snowflake],
        actor: &Actor,
    ) -> RepoResult<HashMap<Snowflake, VoteType>> {
        self.query();
        Ok(lock(&self.votes)
            .iter()
            .filter(|v| comment_ids.contains(&v.comment_id) && v.actor == *actor)
            .map(|v| (v.comment_id, v.vote_type))
            .collect())
    }

    async fn create(&self, vote: &Vote) -> RepoResult<()> {
        self.query();
        if !self.comment_exists(vote.comment_id) {
            return Err(DomainError::CommentNotFound(vote.comment_id));
        }

        let mut votes = lock(&self.votes);
        if self.lost_race() {
            votes.push(vote.clone());
            return Err(DomainError::VoteAlreadyExists);
        }
        if votes
            .iter()
            .any(|v| v.comment_id == vote.comment_id && v.actor == vote.actor)
        {
            return Err(DomainError::VoteAlreadyExists);
        }
        votes.push(vote.clone());
        Ok(())
    }

    async fn change_type(&self, id: Snowflake, vote_type: VoteType) -> RepoResult<bool> {
        self.query();
        let mut votes = lock(&self.votes);
        if self.row_vanished() {
            votes.retain(|v| v.id != id);
            return Ok(false);
        }
        Ok(votes
            .iter_mut()
            .find(|v| v.id == id)
            .map(|v| v.vote_type = vote_type)
            .is_some())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        self.query();
        let mut votes = lock(&self.votes);
        if self.row_vanished() {
            votes.retain(|v| v.id != id);
            return Ok(false);
        }
        let before = votes.len();
        votes.retain(|v| v.id != id);
        Ok(votes.len() < before)
    }
}

// ============================================================================
// Harness
// ============================================================================

pub(crate) struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
    jwt: Arc<JwtService>,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        lock(&store.photos).insert(photo());
        let clock = Arc::new(FixedClock::new());
        let jwt = Arc::new(JwtService::new("service-test-secret", 3600));

        let ctx = ServiceContext::builder()
            .user_repo(store.clone())
            .comment_repo(store.clone())
            .reaction_repo(store.clone())
            .vote_repo(store.clone())
            .image_store(Arc::new(FakeImageStore))
            .clock(clock.clone())
            .jwt_service(jwt.clone())
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();

        Self {
            ctx,
            store,
            clock,
            jwt,
        }
    }

    pub(crate) fn add_photo(&self, id: i64) -> Snowflake {
        let id = Snowflake::new(id);
        lock(&self.store.photos).insert(id);
        id
    }

    pub(crate) fn add_member(&self, id: i64, username: &str) -> User {
        let user = User::new(Snowflake::new(id), username);
        self.store.put_user(user.clone());
        user
    }

    pub(crate) fn add_admin(&self, id: i64, username: &str) -> User {
        let mut user = User::new(Snowflake::new(id), username);
        user.role = Role::Admin;
        self.store.put_user(user.clone());
        user
    }

    pub(crate) fn token_for(&self, user_id: Snowflake) -> String {
        self.jwt.encode_token(user_id, None).unwrap()
    }

    /// A guest comment on the default photo, stored directly
    pub(crate) fn add_guest_comment(&self) -> Snowflake {
        let comment = Comment::by_guest(
            self.ctx.generate_id(),
            photo(),
            "Visitor".to_string(),
            GuestToken::generate(),
            "hello".to_string(),
            self.clock.current(),
        );
        let id = comment.id;
        lock(&self.store.comments).push(comment);
        id
    }

    /// A reaction by a fresh guest actor, stored directly
    pub(crate) fn add_guest_reaction(&self, comment_id: Snowflake, emoji: &str) {
        let reaction = Reaction::new(
            self.ctx.generate_id(),
            comment_id,
            Actor::guest(GuestToken::generate()),
            emoji,
            self.clock.current(),
        );
        lock(&self.store.reactions).push(reaction);
    }
}
