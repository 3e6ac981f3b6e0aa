//! Snowflake ID - 64-bit time-ordered identifier
//!
//! Layout: 42 bits of milliseconds since [`Snowflake::EPOCH`], 10 bits of
//! worker id, 12 bits of per-millisecond sequence. Comments, reactions and
//! votes are keyed by these; photo and user ids owned by other subsystems
//! travel in the same wrapper.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const MAX_WORKER: u16 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const TIME_SHIFT: u32 = WORKER_BITS + SEQUENCE_BITS;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2024-01-01 00:00:00 UTC in Unix milliseconds
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Unix milliseconds at which the id was minted
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIME_SHIFT) + Self::EPOCH
    }

    pub fn worker_id(&self) -> u16 {
        // masked to 10 bits
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER)) as u16
    }

    /// Parse a decimal id. Zero and negatives never name a row.
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(SnowflakeParseError::InvalidFormat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

/// Ids are written as strings; JavaScript clients lose precision past 2^53.
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts both `"123"` and `123`, positive only, like [`Snowflake::parse`].
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(i64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(id) if id > 0 => Ok(Self(id)),
            Wire::Number(_) => Err(serde::de::Error::custom("id must be positive")),
            Wire::Text(text) => {
                Self::parse(&text).map_err(|_| serde::de::Error::custom("invalid id string"))
            }
        }
    }
}

/// Lock-free id source for one worker.
///
/// The last issued millisecond and sequence are packed into a single atomic
/// so one compare-exchange claims both. Up to 4096 ids per millisecond; past
/// that the caller spins into the next millisecond.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    // (millis since EPOCH << SEQUENCE_BITS) | sequence
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// `None` when `worker_id` does not fit in 10 bits
    pub fn try_new(worker_id: u16) -> Option<Self> {
        (worker_id <= MAX_WORKER).then(|| Self::new(worker_id))
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    pub fn generate(&self) -> Snowflake {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let last_tick = current >> SEQUENCE_BITS;
            let now = Self::tick();

            // A clock that steps backwards keeps issuing from the last tick
            let next = if now > last_tick {
                now << SEQUENCE_BITS
            } else if current & SEQUENCE_MASK < SEQUENCE_MASK {
                current + 1
            } else {
                std::hint::spin_loop();
                current = self.state.load(Ordering::Acquire);
                continue;
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let tick = next >> SEQUENCE_BITS;
                    let sequence = next & SEQUENCE_MASK;
                    return Snowflake::new(
                        (tick << TIME_SHIFT)
                            | (i64::from(self.worker_id) << SEQUENCE_BITS)
                            | sequence,
                    );
                }
                Err(actual) => current = actual,
            }
        }
    }

    fn tick() -> i64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX));
        (millis - Snowflake::EPOCH).max(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
