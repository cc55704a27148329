//! Error types shared by both table variants.

use thiserror::Error;

/// Fatal failure: the table gave up trying to rehash its keys after
/// exhausting the configured retry budget of freshly sampled hash-function
/// pairs. This typically means the hash family is flawed or misused (e.g.
/// samples are not actually independent), not a transient condition worth
/// retrying.
///
/// After this error the table still holds every entry (iteration and
/// cursors see all of them), but positional lookups are no longer
/// meaningful.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("rehash failed: no workable hash-function pair after {tries} tries")]
pub struct RehashFailed {
    /// The retry budget that was exhausted.
    pub tries: u32,
}

/// Misuse of a [`Cursor`](crate::u64_map::Cursor) or
/// [`Cursor`](crate::map::Cursor), reported by the violating call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CursorError {
    /// The table was structurally modified (put, remove, rehash) since this
    /// cursor captured its snapshot.
    #[error("table was structurally modified since the cursor was created")]
    Stale,
    /// `advance` was called with no entries left.
    #[error("cursor has no more entries")]
    Exhausted,
    /// An accessor or mutator was called before the first `advance`, or on
    /// an entry already removed through the cursor.
    #[error("cursor is not positioned on a live entry")]
    NotPositioned,
}
