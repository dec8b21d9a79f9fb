//! Expiry policy for URL mappings.

use chrono::{DateTime, Utc};

/// Decides whether a mapping with the given expiry has expired at `now`.
///
/// A missing expiry never expires. An expiry equal to `now` is still valid;
/// only timestamps strictly before `now` count as expired.
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|expires_at| expires_at < now)
}

/// Whole seconds a mapping has left to live, if it expires and is still live.
///
/// Returns `None` for mappings without an expiry, `Some(0)` once fewer than one
/// second remains or the deadline has passed.
pub fn remaining_seconds(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<u64> {
    expires_at.map(|expires_at| (expires_at - now).num_seconds().max(0) as u64)
}
