use std::error::Error;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::data::Data;
use crate::engine::StoreEngine;
use crate::error::{CacheError, Result};
use crate::instrument::Instrumented;
use crate::replay::Replay;

/// name under which calls to [`Cache::store`] are counted and recorded
pub const STORE_OPERATION: &str = "store";

/// A cache that stores values under random keys in a [`StoreEngine`].
///
/// Creating a `Cache` flushes the engine's namespace, so it must not share a namespace with
/// unrelated data. Every call to [`store`] is counted and its input and output are recorded,
/// see [`replay`].
///
/// [`store`]: #method.store
/// [`replay`]: #method.replay
#[derive(Debug)]
pub struct Cache<E: StoreEngine> {
    engine: E,
    store_op: Instrumented,
}

impl<E: StoreEngine> Cache<E> {
    /// creates a `Cache` on top of `engine`, deleting everything in its namespace
    ///
    /// # Errors
    /// returns an error if the namespace could not be flushed
    #[instrument(skip(engine))]
    pub fn new(mut engine: E) -> Result<Cache<E>> {
        engine.flush_db()?;
        info!("namespace flushed, cache ready");
        Ok(Cache {
            engine,
            store_op: Instrumented::new(STORE_OPERATION).count_calls().call_history(),
        })
    }

    /// stores `data` under a freshly generated UUID v4 key and returns the key
    #[instrument(skip(self, data))]
    pub fn store(&mut self, data: impl Into<Data>) -> Result<String> {
        let data = data.into();
        self.store_op
            .call(&mut self.engine, &data.args_repr(), |engine| {
                let key = Uuid::new_v4().to_string();
                engine.set(&key, &data.to_bytes())?;
                debug!(%key, "stored value");
                Ok(key)
            })
    }

    /// returns the raw bytes stored under `key`, or `None` if there is no such key
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        self.engine.get(key)
    }

    /// returns the value stored under `key` converted by `transform`, or `None` if there is
    /// no such key (`transform` is not called in that case)
    ///
    /// # Errors
    /// a failing `transform` is returned as [`CacheError::Transform`]
    pub fn get_with<T, F, X>(&mut self, key: &str, transform: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> std::result::Result<T, X>,
        X: Into<Box<dyn Error + Send + Sync>>,
    {
        match self.engine.get(key)? {
            Some(raw) => transform(raw)
                .map(Some)
                .map_err(|e| CacheError::Transform(e.into())),
            None => Ok(None),
        }
    }

    /// returns the value stored under `key` as text.
    ///
    /// A value that is not valid UTF-8 is returned as an empty string.
    pub fn get_str(&mut self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |raw| Ok::<_, CacheError>(decode_str(raw)))
    }

    /// returns the value stored under `key` as a base-10 integer.
    ///
    /// A missing key, or a value that does not parse as an integer, is returned as `0`.
    pub fn get_int(&mut self, key: &str) -> Result<i64> {
        Ok(self
            .get_with(key, |raw| Ok::<_, CacheError>(decode_int(&raw)))?
            .unwrap_or_else(|| {
                debug!(key, "key not found, reading as 0");
                0
            }))
    }

    /// reads the call history of the operation `name` using this cache's own engine.
    /// Use [`Replay::load`] to read it through any other connection.
    pub fn replay(&mut self, name: &str) -> Result<Replay> {
        Replay::load(&mut self.engine, name)
    }

    /// the underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// the underlying engine, mutably, e.g. to pass to [`Replay::load`]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// consumes the cache, returning the underlying engine
    pub fn into_engine(self) -> E {
        self.engine
    }
}

/// decodes raw store bytes as UTF-8 text, substituting an empty string if they are not valid
/// UTF-8
pub fn decode_str(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_else(|e| {
        debug!(error = %e, "value is not UTF-8");
        String::new()
    })
}

/// parses raw store bytes as a base-10 integer (surrounding whitespace allowed), substituting
/// `0` if they are not one
pub fn decode_int(raw: &[u8]) -> i64 {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or_else(|| {
            debug!("value is not an integer");
            0
        })
}
