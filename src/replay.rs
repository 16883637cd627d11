use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::engine::StoreEngine;
use crate::instrument::HistoryKeys;
use crate::Result;

/// A single recorded invocation, as the display strings that were logged for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    /// representation of the arguments, e.g. `("cat",)`
    pub input: String,
    /// representation of the returned value
    pub output: String,
}

/// The recorded history of one instrumented operation.
///
/// Displaying a `Replay` gives a summary line followed by one line per call:
///
/// ```text
/// store was called 2 times:
/// store(*("cat",)) -> 1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed
/// store(*(42,)) -> 6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    /// the operation name
    pub name: String,
    /// value of the invocation counter
    pub calls: u64,
    /// recorded calls in the order they were made
    pub history: Vec<Call>,
}

impl Replay {
    /// reads the counter and call history of the operation `name` from `engine`.
    ///
    /// This never writes to the store. A missing or unreadable counter counts as zero, and a
    /// logged entry that is not valid UTF-8 is shown as an empty string.
    #[instrument(skip(engine))]
    pub fn load<E: StoreEngine>(engine: &mut E, name: &str) -> Result<Replay> {
        let keys = HistoryKeys::for_operation(name);

        let calls = engine
            .get(&keys.counter)?
            .and_then(|raw| String::from_utf8(raw).ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let inputs = engine.lrange(&keys.inputs, 0, -1)?;
        let outputs = engine.lrange(&keys.outputs, 0, -1)?;
        debug!(calls, inputs = inputs.len(), outputs = outputs.len());

        let history = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| Call {
                input: String::from_utf8(input).unwrap_or_default(),
                output: String::from_utf8(output).unwrap_or_default(),
            })
            .collect();

        Ok(Replay {
            name: name.to_owned(),
            calls,
            history,
        })
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.calls)?;
        for call in &self.history {
            writeln!(f, "{}(*{}) -> {}", self.name, call.input, call.output)?;
        }
        Ok(())
    }
}

/// prints the call history of the operation `name`, read from `engine`, to stdout
pub fn replay<E: StoreEngine>(engine: &mut E, name: &str) -> Result<()> {
    print!("{}", Replay::load(engine, name)?);
    Ok(())
}
