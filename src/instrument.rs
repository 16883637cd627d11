//! Call counting and call history, composed explicitly around an operation.
//!
//! An [`Instrumented`] value names an operation and says which records to keep for it. Its
//! [`call`] method wraps the real work:
//!
//! 1. the input representation is appended to `<name>:inputs` (call history)
//! 2. the counter stored under `<name>` is incremented (call counting)
//! 3. the inner operation runs
//! 4. the display form of its output is appended to `<name>:outputs` (call history)
//!
//! All records live in the same [`StoreEngine`] as the data, so they are wiped together with it.
//!
//! [`call`]: ./struct.Instrumented.html#method.call
use std::fmt::Display;

use tracing::trace;

use crate::engine::StoreEngine;
use crate::Result;

/// The store keys holding the records of a single operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryKeys {
    /// key of the invocation counter, the bare operation name
    pub counter: String,
    /// key of the list of input representations
    pub inputs: String,
    /// key of the list of output representations
    pub outputs: String,
}

impl HistoryKeys {
    /// builds the keys used for the operation called `name`
    pub fn for_operation(name: &str) -> Self {
        HistoryKeys {
            counter: name.to_owned(),
            inputs: format!("{}:inputs", name),
            outputs: format!("{}:outputs", name),
        }
    }
}

/// Wraps an operation so that its invocations are counted and/or recorded.
#[derive(Debug, Clone)]
pub struct Instrumented {
    keys: HistoryKeys,
    count_calls: bool,
    call_history: bool,
}

impl Instrumented {
    /// an operation called `name` with no records enabled yet
    pub fn new(name: &str) -> Self {
        Instrumented {
            keys: HistoryKeys::for_operation(name),
            count_calls: false,
            call_history: false,
        }
    }

    /// keep an invocation counter for this operation
    pub fn count_calls(mut self) -> Self {
        self.count_calls = true;
        self
    }

    /// keep the input and output history of this operation
    pub fn call_history(mut self) -> Self {
        self.call_history = true;
        self
    }

    /// the operation name
    pub fn name(&self) -> &str {
        &self.keys.counter
    }

    /// runs `op` against `engine`, recording `input` and the returned output around it.
    ///
    /// If `op` fails its error is returned as-is and no output is recorded.
    pub fn call<E, O, F>(&self, engine: &mut E, input: &str, op: F) -> Result<O>
    where
        E: StoreEngine,
        O: Display,
        F: FnOnce(&mut E) -> Result<O>,
    {
        if self.call_history {
            engine.rpush(&self.keys.inputs, input.as_bytes())?;
        }
        if self.count_calls {
            let calls = engine.incr(&self.keys.counter)?;
            trace!(operation = self.name(), calls);
        }

        let output = op(engine)?;

        if self.call_history {
            engine.rpush(&self.keys.outputs, output.to_string().as_bytes())?;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::CacheError;

    #[test]
    fn keys_are_derived_from_the_name() {
        let keys = HistoryKeys::for_operation("store");
        assert_eq!(keys.counter, "store");
        assert_eq!(keys.inputs, "store:inputs");
        assert_eq!(keys.outputs, "store:outputs");
    }

    #[test]
    fn counting_only_leaves_no_history() {
        let mut engine = MemoryEngine::new();
        let op = Instrumented::new("double").count_calls();
        let out = op.call(&mut engine, "(2,)", |_| Ok(4)).unwrap();

        assert_eq!(out, 4);
        assert_eq!(engine.get("double").unwrap(), Some(b"1".to_vec()));
        assert!(engine.lrange("double:inputs", 0, -1).unwrap().is_empty());
    }

    #[test]
    fn failed_operation_records_input_but_not_output() {
        let mut engine = MemoryEngine::new();
        let op = Instrumented::new("fail").count_calls().call_history();
        let res: Result<u8> = op.call(&mut engine, "()", |_| {
            Err(CacheError::Parsing("boom".to_owned()))
        });

        assert!(res.is_err());
        assert_eq!(engine.lrange("fail:inputs", 0, -1).unwrap().len(), 1);
        assert!(engine.lrange("fail:outputs", 0, -1).unwrap().is_empty());
        assert_eq!(engine.get("fail").unwrap(), Some(b"1".to_vec()));
    }
}
