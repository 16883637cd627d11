#![deny(missing_docs)]
//! An instrumented cache over an external key-value store.
//!
//! This crate provides the [`Cache`] type, which stores values under randomly generated keys
//! and keeps a record of how it was used, as well as a [`cachetrace`] executable that can be
//! used to drive a cache from the command line.
//!
//! ## Cache Operations
//! - `store` a value (text, bytes, integer or float) under a new UUID v4 key, returning the key
//! - `get` the raw bytes stored under a key, optionally converted by a caller supplied transform
//! - `get_str` / `get_int` typed reads, which fall back to a default value when the stored
//!   bytes can not be converted
//! - `replay` the recorded history of an operation
//!
//! A lookup of a key that does not exist is not an error: it returns `Ok(None)`, except for
//! `get_int`, which reads it as `0`.
//!
//! ## Instrumentation
//! Every call to `store` increments a counter kept in the store under the key `store`, and
//! appends the call's arguments to the list `store:inputs` and the returned key to the list
//! `store:outputs`. [`Instrumented`] composes this recording around any operation, and
//! [`Replay`] reads it back:
//!
//! ```text
//! store was called 2 times:
//! store(*("cat",)) -> 1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed
//! store(*(42,)) -> 6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b
//! ```
//!
//! ## Storage Engines
//! The store itself is external. A [`Cache`] talks to it through the [`StoreEngine`] trait,
//! which needs just six commands: `flush_db`, `set`, `get`, `incr`, `rpush` and `lrange`.
//! - [`RedisEngine`] uses a synchronous redis connection; the database index of the connection
//!   url is the namespace that gets flushed when a [`Cache`] is created
//! - [`MemoryEngine`] keeps everything in process, with the same command semantics
//!
//! [`Cache`]: ./struct.Cache.html
//! [`Instrumented`]: ./struct.Instrumented.html
//! [`Replay`]: ./struct.Replay.html
//! [`StoreEngine`]: ./trait.StoreEngine.html
//! [`RedisEngine`]: ./struct.RedisEngine.html
//! [`MemoryEngine`]: ./struct.MemoryEngine.html
//! [`cachetrace`]: ./bin/cachetrace.rs

pub use cache::{decode_int, decode_str, Cache, STORE_OPERATION};
pub use data::Data;
pub use engine::{MemoryEngine, RedisEngine, StoreEngine, DEFAULT_REDIS_URL};
pub use error::{CacheError, Result};
pub use instrument::{HistoryKeys, Instrumented};
pub use replay::{replay, Call, Replay};

mod cache;
mod data;
mod engine;
mod error;
mod instrument;
mod replay;
