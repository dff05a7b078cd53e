//! Snowflake - time-ordered 64-bit identifier for chat entries
//!
//! Layout:
//! - Bits 63-22: milliseconds since [`Snowflake::EPOCH`]
//! - Bits 21-12: node id (0-1023)
//! - Bits 11-0:  per-millisecond sequence (0-4095)
//!
//! Ids sort in creation order, which is what history ordering relies on when
//! two entries share a `created_at`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const MAX_NODE_ID: u16 = (1 << NODE_BITS) - 1;

/// Chat entry identifier, serialised as a decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2025-01-01 00:00:00 UTC in milliseconds
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was minted
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> (NODE_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn node_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_NODE_ID)) as u16
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 as u64 & SEQUENCE_MASK) as u16
    }

    /// Creation instant, or the Unix epoch for ids outside chrono's range
    pub fn minted_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp_millis())
            .single()
            .unwrap_or_default()
    }
}

/// Error when parsing a Snowflake from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid snowflake: expected a decimal integer")]
pub struct SnowflakeParseError;

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| SnowflakeParseError)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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

// Browsers lose precision above 2^53, so ids travel as strings.
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Lock-free id generator
///
/// The last issued `(millis, sequence)` pair is packed into one atomic word,
/// so concurrent callers never hand out the same id and never go backwards,
/// even when the wall clock does.
pub struct SnowflakeGenerator {
    node_id: u16,
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Largest node id that fits the id layout
    pub const MAX_NODE_ID: u16 = MAX_NODE_ID;

    /// Create a generator for `node_id`; only the low 10 bits are used
    pub fn new(node_id: u16) -> Self {
        Self {
            node_id: node_id & MAX_NODE_ID,
            state: AtomicU64::new(0),
        }
    }

    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    /// Mint the next id
    pub fn generate(&self) -> Snowflake {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let now = elapsed_millis();
            let last = current >> SEQUENCE_BITS;
            let seq = current & SEQUENCE_MASK;

            // Either advance to the wall clock or bump the sequence. A clock
            // step backwards keeps using `last`; an exhausted sequence borrows
            // the next millisecond.
            let next = if now > last {
                now << SEQUENCE_BITS
            } else if seq < SEQUENCE_MASK {
                current + 1
            } else {
                (last + 1) << SEQUENCE_BITS
            };

            match self.state.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    let millis = next >> SEQUENCE_BITS;
                    let seq = next & SEQUENCE_MASK;
                    let raw = (millis << (NODE_BITS + SEQUENCE_BITS))
                        | (u64::from(self.node_id) << SEQUENCE_BITS)
                        | seq;
                    return Snowflake(raw as i64);
                }
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn elapsed_millis() -> u64 {
    let now = Utc::now().timestamp_millis();
    u64::try_from(now - Snowflake::EPOCH).unwrap_or(0)
}
