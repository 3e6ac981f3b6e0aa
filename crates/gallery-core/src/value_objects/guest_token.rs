//! Guest token - opaque ownership credential for guest-authored comments

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Number of random bytes behind a freshly generated token
const TOKEN_BYTES: usize = 16;

/// Longest token accepted from clients (column width)
pub const MAX_GUEST_TOKEN_LEN: usize = 64;

/// Client-held proof of authorship for a guest comment.
///
/// Generated server-side at submit time and returned once to the creator.
/// There is no recovery path when a client loses it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestToken(String);

impl GuestToken {
    /// Generate a new 128-bit token, hex encoded
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wrap a client-supplied token. Blank or oversized input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_GUEST_TOKEN_LEN {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Constant-time comparison against another token.
    /// Length is not secret; unequal lengths never match.
    pub fn matches(&self, other: &GuestToken) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Debug for GuestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GuestToken(***)")
    }
}
