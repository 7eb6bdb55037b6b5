use thiserror::Error;

/// Errors from the seen-cache store.
///
/// These never escape the cache client's public API: reads fail open and
/// writes are logged-only. The type exists so the internal helpers can use
/// `?` and the failure paths stay visible in logs.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
