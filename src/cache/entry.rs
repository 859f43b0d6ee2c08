//! Cache Entry Module
//!
//! Expiration timestamps and the persisted `[timestamp][payload]` form shared
//! by the storage adapters.

use chrono::Utc;

use crate::error::DecodeError;

// == Constants ==
/// Largest expiration timestamp (Unix seconds) that fits the 10-digit field.
///
/// Doubles as the "never expires" marker, so the read path compares
/// timestamps the same way for every entry.
pub const MAX_TS: u64 = 9_999_999_999;

/// Width in bytes of the leading timestamp field.
pub const TIMESTAMP_WIDTH: usize = 10;

// == Cache Entry ==
/// A payload together with its expiration timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Expiration timestamp (Unix seconds), `MAX_TS` = no expiration
    pub expires_at: u64,
    /// The stored content
    pub content: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now, or never if `None`.
    pub fn new(content: String, ttl_seconds: Option<u64>) -> Self {
        Self {
            expires_at: expiration_timestamp(current_timestamp(), ttl_seconds),
            content,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given instant.
    ///
    /// An entry is still live during the second it expires in; it is only
    /// expired once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at < now
    }

    // == Encode ==
    /// Renders the persisted form: ten timestamp digits followed directly by
    /// the content, with no separator.
    pub fn encode(&self) -> String {
        format!(
            "{:0width$}{}",
            self.expires_at.min(MAX_TS),
            self.content,
            width = TIMESTAMP_WIDTH
        )
    }

    // == Decode ==
    /// Parses the persisted form produced by [`CacheEntry::encode`].
    ///
    /// The timestamp is taken by position, so the payload may itself start
    /// with digits.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        if raw.len() < TIMESTAMP_WIDTH {
            return Err(DecodeError::Truncated { len: raw.len() });
        }

        let (stamp, payload) = raw.split_at(TIMESTAMP_WIDTH);
        if !stamp.iter().all(u8::is_ascii_digit) {
            return Err(DecodeError::InvalidTimestamp(
                String::from_utf8_lossy(stamp).into_owned(),
            ));
        }

        // Ten ASCII digits always parse into a u64.
        let expires_at = stamp
            .iter()
            .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0'));

        let content =
            String::from_utf8(payload.to_vec()).map_err(|_| DecodeError::InvalidUtf8)?;

        Ok(Self {
            expires_at,
            content,
        })
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Computes the expiration timestamp for a TTL measured from `now`.
///
/// `None` means no expiration and yields `MAX_TS`; otherwise the deadline is
/// clamped to `MAX_TS` so it always fits the 10-digit field.
pub fn expiration_timestamp(now: u64, ttl_seconds: Option<u64>) -> u64 {
    match ttl_seconds {
        Some(ttl) => now.saturating_add(ttl).min(MAX_TS),
        None => MAX_TS,
    }
}

/// Maps the `seconds` argument of an adapter `set` to a TTL.
///
/// Zero is the "never expires" sentinel, not "expire immediately".
pub fn ttl_from_seconds(seconds: u64) -> Option<u64> {
    (seconds > 0).then_some(seconds)
}
