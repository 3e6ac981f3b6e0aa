//! Service context - dependency container for services
//!
//! Built once at startup and shared by every request handler.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gallery_common::auth::JwtService;
use gallery_core::traits::{
    Clock, CommentRepository, ImageStore, ReactionRepository, SystemClock, UserRepository,
    VoteRepository,
};
use gallery_core::{CommentPolicy, Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Provides access to:
/// - Comment, reaction, vote and user repositories
/// - The image store used for comment attachments
/// - JWT validation, the clock, and the snowflake generator
/// - The comment policy (windows and reaction allow-list)
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    vote_repo: Arc<dyn VoteRepository>,

    // Collaborators
    image_store: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    policy: CommentPolicy,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    // === Collaborators ===

    pub fn image_store(&self) -> &dyn ImageStore {
        self.image_store.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn policy(&self) -> &CommentPolicy {
        &self.policy
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("policy", &self.policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The clock defaults to [`SystemClock`] and the policy to
/// [`CommentPolicy::default`]; everything else is required.
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    image_store: Option<Arc<dyn ImageStore>>,
    clock: Option<Arc<dyn Clock>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    policy: Option<CommentPolicy>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn policy(mut self, policy: CommentPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first unset dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| required("user_repo"))?,
            comment_repo: self.comment_repo.ok_or_else(|| required("comment_repo"))?,
            reaction_repo: self.reaction_repo.ok_or_else(|| required("reaction_repo"))?,
            vote_repo: self.vote_repo.ok_or_else(|| required("vote_repo"))?,
            image_store: self.image_store.ok_or_else(|| required("image_store"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            jwt_service: self.jwt_service.ok_or_else(|| required("jwt_service"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| required("snowflake_generator"))?,
            policy: self.policy.unwrap_or_default(),
        })
    }
}

fn required(dependency: &'static str) -> ServiceError {
    ServiceError::MissingDependency(dependency)
}
