//! This module provides the key/value storage engines a [`Cache`] can sit on top of.
//! The two engines that are implemented are [`RedisEngine`], a thin wrapper around a
//! synchronous [`redis`] connection, and [`MemoryEngine`], an in-process stand-in with the
//! same command semantics that is handy for tests and demos.
//!
//! [`Cache`]: ../struct.Cache.html
//! [`redis`]: https://docs.rs/redis/latest/redis/
use crate::Result;

/// The primitive commands an external key/value store must offer.
///
/// Each command is expected to be atomic on its own. Nothing stronger is assumed, and no
/// two commands are ever required to happen together.
pub trait StoreEngine: Send + 'static {
    /// deletes every key in the currently selected namespace (database index)
    fn flush_db(&mut self) -> Result<()>;

    /// sets `key` to `value`, overwriting any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Gets the raw bytes associated with the given `key`
    ///
    /// Returns `None` if the given `key` does not exist.
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>>;

    /// increments the integer stored at `key` by one and returns the new value.
    /// A missing key counts as `0`.
    fn incr(&mut self, key: &str) -> Result<i64>;

    /// appends `value` to the tail of the list at `key`, creating the list if needed.
    /// Returns the length of the list after the push.
    fn rpush(&mut self, key: &str, value: &[u8]) -> Result<u64>;

    /// returns the elements of the list at `key` between `start` and `stop`, both inclusive.
    /// Negative indices count from the tail, so `lrange(key, 0, -1)` is the whole list.
    /// A missing key is an empty list.
    fn lrange(&mut self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;
}

mod memory;
mod redis_engine;

pub use self::memory::MemoryEngine;
pub use self::redis_engine::{RedisEngine, DEFAULT_REDIS_URL};
