use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, instrument};

use super::StoreEngine;
use crate::error::{CacheError, Result};

/// An in-process [`StoreEngine`] that mimics the redis commands used by a [`Cache`].
///
/// Handles are cheap to clone and every clone shares the same namespace, which makes it
/// possible to point several caches (or threads) at one "server". Individual commands are
/// atomic per key because they run under the map's per-shard lock.
///
/// [`Cache`]: ../struct.Cache.html
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    // maps keys to either a plain value or a list of values
    map: Arc<DashMap<String, Slot>>,
}

/// what can live under a single key
#[derive(Debug, Clone)]
enum Slot {
    Value(Vec<u8>),
    List(Vec<Vec<u8>>),
}

impl MemoryEngine {
    /// creates a new, empty, namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// number of keys currently held in the namespace
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// returns `true` if the namespace holds no keys
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl StoreEngine for MemoryEngine {
    #[instrument(skip(self))]
    fn flush_db(&mut self) -> Result<()> {
        debug!(keys = self.map.len(), "flushing memory namespace");
        self.map.clear();
        Ok(())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.map.insert(key.to_owned(), Slot::Value(value.to_vec()));
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.map.get(key).as_deref() {
            None => Ok(None),
            Some(Slot::Value(bytes)) => Ok(Some(bytes.clone())),
            Some(Slot::List(_)) => Err(CacheError::WrongType { key: key.to_owned() }),
        }
    }

    fn incr(&mut self, key: &str) -> Result<i64> {
        let mut slot = self
            .map
            .entry(key.to_owned())
            .or_insert_with(|| Slot::Value(b"0".to_vec()));

        match &mut *slot {
            Slot::Value(bytes) => {
                let next = std::str::from_utf8(bytes)
                    .ok()
                    .and_then(|s| s.parse::<i64>().ok())
                    .and_then(|n| n.checked_add(1))
                    .ok_or_else(|| CacheError::NotAnInteger { key: key.to_owned() })?;
                *bytes = next.to_string().into_bytes();
                Ok(next)
            }
            Slot::List(_) => Err(CacheError::WrongType { key: key.to_owned() }),
        }
    }

    fn rpush(&mut self, key: &str, value: &[u8]) -> Result<u64> {
        let mut slot = self
            .map
            .entry(key.to_owned())
            .or_insert_with(|| Slot::List(Vec::new()));

        match &mut *slot {
            Slot::List(list) => {
                list.push(value.to_vec());
                Ok(list.len() as u64)
            }
            Slot::Value(_) => Err(CacheError::WrongType { key: key.to_owned() }),
        }
    }

    fn lrange(&mut self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        match self.map.get(key).as_deref() {
            None => Ok(vec![]),
            Some(Slot::List(list)) => Ok(match list_range(list.len(), start, stop) {
                Some((from, to)) => list[from..=to].to_vec(),
                None => vec![],
            }),
            Some(Slot::Value(_)) => Err(CacheError::WrongType { key: key.to_owned() }),
        }
    }
}

/// converts redis style `start`/`stop` indices into an inclusive range of valid positions
/// within a list of length `len`. Returns `None` when the range selects nothing.
fn list_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}
