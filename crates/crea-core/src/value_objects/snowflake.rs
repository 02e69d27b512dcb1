//! Snowflake ids for every portal record.
//!
//! Layout (63 usable bits):
//! - Bits 62-22: milliseconds since [`Snowflake::EPOCH`]
//! - Bits 21-12: node id (0-1023)
//! - Bits 11-0:  per-millisecond sequence (0-4095)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const NODE_MASK: i64 = (1 << NODE_BITS) - 1;
const TIMESTAMP_SHIFT: u32 = NODE_BITS + SEQUENCE_BITS;

/// Time-ordered 64-bit record id, serialized as a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2025-01-01 00:00:00 UTC in milliseconds.
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch at which the id was minted.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    #[inline]
    pub fn node_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & NODE_MASK) as u16
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp()).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        match s.trim().parse::<i64>() {
            Ok(v) if v >= 0 => Ok(Self(v)),
            _ => Err(SnowflakeParseError::InvalidFormat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
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

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Strings on the wire: browsers lose precision above 2^53.
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Snowflake(n)),
            Raw::Text(s) => Snowflake::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Lock-free id generator.
///
/// The last issued `(timestamp, sequence)` pair is packed into one atomic so
/// that a single compare-and-swap both claims a sequence slot and advances
/// the clock.
pub struct SnowflakeGenerator {
    node_id: i64,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `node_id` does not fit in 10 bits.
    pub fn new(node_id: u16) -> Self {
        assert!(i64::from(node_id) <= NODE_MASK, "node id must be < 1024");
        Self {
            node_id: i64::from(node_id),
            state: AtomicI64::new(0),
        }
    }

    pub fn node_id(&self) -> u16 {
        self.node_id as u16
    }

    pub fn generate(&self) -> Snowflake {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let last_ts = current >> SEQUENCE_BITS;
            let last_seq = current & SEQUENCE_MASK;
            let now = Self::elapsed_millis();

            // A clock that steps backwards keeps issuing on the last timestamp.
            let (ts, seq) = if now > last_ts {
                (now, 0)
            } else if last_seq < SEQUENCE_MASK {
                (last_ts, last_seq + 1)
            } else {
                std::hint::spin_loop();
                current = self.state.load(Ordering::Acquire);
                continue;
            };

            let next = (ts << SEQUENCE_BITS) | seq;
            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    return Snowflake((ts << TIMESTAMP_SHIFT) | (self.node_id << SEQUENCE_BITS) | seq)
                }
                Err(actual) => current = actual,
            }
        }
    }

    fn elapsed_millis() -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(Snowflake::EPOCH);
        (now - Snowflake::EPOCH).max(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_parse_rejects_garbage_and_negatives() {
        assert_eq!(Snowflake::parse("42").unwrap().into_inner(), 42);
        assert!(Snowflake::parse("abc").is_err());
        assert!(Snowflake::parse("-5").is_err());
    }

    #[test]
    fn test_json_is_string() {
        let json = serde_json::to_string(&Snowflake::new(987_654_321_012_345)).unwrap();
        assert_eq!(json, "\"987654321012345\"");
    }

    #[test]
    fn test_json_accepts_string_or_number() {
        let a: Snowflake = serde_json::from_str("\"77\"").unwrap();
        let b: Snowflake = serde_json::from_str("77").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<Snowflake>("\"x\"").is_err());
    }

    #[test]
    fn test_generated_ids_increase() {
        let gen = SnowflakeGenerator::new(3);
        let mut last = Snowflake::default();
        for _ in 0..5000 {
            let id = gen.generate();
            assert!(id > last);
            assert_eq!(id.node_id(), 3);
            last = id;
        }
    }

    #[test]
    fn test_generated_ids_unique_across_threads() {
        let gen = Arc::new(SnowflakeGenerator::new(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                thread::spawn(move || (0..2000).map(|_| gen.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 8000);
    }

    #[test]
    fn test_timestamp_round_trips_through_created_at() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = SnowflakeGenerator::default().generate();
        let after = chrono::Utc::now().timestamp_millis();
        assert!(id.timestamp() >= before && id.timestamp() <= after);
        assert_eq!(id.created_at().timestamp_millis(), id.timestamp());
    }

    #[test]
    #[should_panic(expected = "node id must be < 1024")]
    fn test_node_id_out_of_range() {
        SnowflakeGenerator::new(1024);
    }
}
