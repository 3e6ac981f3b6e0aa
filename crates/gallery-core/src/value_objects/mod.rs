//! Value objects - immutable domain primitives

mod guest_token;
mod identity;
mod policy;
mod snowflake;

pub use guest_token::{GuestToken, MAX_GUEST_TOKEN_LEN};
pub use identity::{Actor, Requester};
pub use policy::{CommentPolicy, ReactionAllowList, DEFAULT_REACTIONS};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
