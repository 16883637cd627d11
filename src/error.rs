use thiserror::Error;

/// type alias for all operations on a [`Cache`] or [`StoreEngine`] that could fail with a
/// [`CacheError`]
///
/// [`Cache`]: ./struct.Cache.html
/// [`StoreEngine`]: ./trait.StoreEngine.html
pub type Result<T> = std::result::Result<T, CacheError>;

/// The Error variants used by this crate.
///
/// A missing key is never an error, lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum CacheError {
    /// the redis server could not be reached, or rejected a command
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// a list command was issued against a string key, or a string command against a list key
    #[error("WRONGTYPE operation against key {key:?} holding the wrong kind of value")]
    WrongType {
        /// the offending key
        key: String,
    },

    /// `incr` was issued against a value that is not a base-10 integer
    #[error("value at key {key:?} is not an integer or out of range")]
    NotAnInteger {
        /// the offending key
        key: String,
    },

    /// a caller supplied transform failed on the raw value
    #[error("transform failed: {0}")]
    Transform(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// invalid command line input
    #[error("{0}")]
    Parsing(String),

    /// a replay could not be rendered as JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
