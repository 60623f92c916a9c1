#![forbid(unsafe_code)]

//! Fixed-interval tick simulation driven by a FIFO command queue.
//!
//! The engine owns an opaque JSON state map. Each [`step`](SimulationEngine::step)
//! advances the tick counter by the elapsed milliseconds and applies at most
//! one queued command, so throughput is capped at one command per tick.
//!
//! There is no background timer. The host calls
//! [`advance`](SimulationEngine::advance) with the wall-clock time that
//! passed since its last frame; the engine runs one step per whole interval
//! accumulated while it is running. Steps therefore never overlap and
//! [`stop`](SimulationEngine::stop) takes effect before the next call.
//!
//! # Example
//!
//! ```
//! use mythoras_runtime::simulation::{Command, SimulationEngine};
//! use serde_json::json;
//!
//! let mut engine = SimulationEngine::default();
//! engine.enqueue_command(Command::new("1", "setState").with_payload(json!({ "gold": 10 })));
//! engine.step(50);
//! assert_eq!(engine.state()["gold"], json!(10));
//! assert_eq!(engine.snapshot().processed_commands, 1);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use web_time::{SystemTime, UNIX_EPOCH};

/// Default step interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 50;

/// Upper bound on steps run by one [`SimulationEngine::advance`] call.
/// Backlog beyond it is dropped.
pub const MAX_STEPS_PER_ADVANCE: u32 = 1024;

/// Opaque simulation state.
pub type StateMap = Map<String, Value>;

/// Built-in command types.
pub mod command_types {
    /// Does nothing; still counts as processed.
    pub const NOOP: &str = "noop";
    /// Shallow-merges the payload object into the state.
    pub const SET_STATE: &str = "setState";
}

/// A queued instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Epoch milliseconds, stamped on enqueue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl Command {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            payload: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Externally visible engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: StateMap,
    #[serde(rename = "processedCommands")]
    pub processed_commands: u64,
}

/// Applies one command type to the state.
pub type Reducer = Box<dyn Fn(&mut StateMap, &Command)>;

/// Errors from decoding or encoding snapshots.
#[derive(Debug)]
pub enum SimulationError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "snapshot encode error: {e}"),
            Self::Decode(e) => write!(f, "snapshot decode error: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) | Self::Decode(e) => Some(e),
        }
    }
}

/// Toy tick engine.
pub struct SimulationEngine {
    tick: u64,
    running: bool,
    interval_ms: u64,
    accumulated: Duration,
    queue: VecDeque<Command>,
    processed_commands: u64,
    state: StateMap,
    reducers: FxHashMap<String, Reducer>,
}

impl fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reducers: Vec<&str> = self.reducers.keys().map(String::as_str).collect();
        reducers.sort_unstable();
        f.debug_struct("SimulationEngine")
            .field("tick", &self.tick)
            .field("running", &self.running)
            .field("interval_ms", &self.interval_ms)
            .field("queued", &self.queue.len())
            .field("processed_commands", &self.processed_commands)
            .field("reducers", &reducers)
            .finish_non_exhaustive()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(StateMap::new())
    }
}

impl SimulationEngine {
    #[must_use]
    pub fn new(initial_state: StateMap) -> Self {
        Self {
            tick: 0,
            running: false,
            interval_ms: DEFAULT_TICK_MS,
            accumulated: Duration::ZERO,
            queue: VecDeque::new(),
            processed_commands: 0,
            state: initial_state,
            reducers: FxHashMap::default(),
        }
    }

    /// Begin accepting [`advance`](Self::advance) time. Idempotent: a second
    /// call while running keeps the current interval.
    pub fn start(&mut self, interval_ms: u64) {
        if self.running {
            return;
        }
        self.running = true;
        self.interval_ms = interval_ms.max(1);
        self.accumulated = Duration::ZERO;
        tracing::debug!(
            target: "mythoras.simulation",
            interval_ms = self.interval_ms,
            "simulation started"
        );
    }

    /// Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.accumulated = Duration::ZERO;
        tracing::debug!(target: "mythoras.simulation", tick = self.tick, "simulation stopped");
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[inline]
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    #[must_use]
    pub fn processed_commands(&self) -> u64 {
        self.processed_commands
    }

    #[inline]
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &StateMap {
        &self.state
    }

    /// Advance the tick by `delta_ms` and apply at most one queued command.
    ///
    /// Returns the command that was applied, if any. Unknown command types
    /// are dequeued and counted but leave the state untouched.
    pub fn step(&mut self, delta_ms: u64) -> Option<Command> {
        self.tick = self.tick.saturating_add(delta_ms);
        let command = self.queue.pop_front()?;
        self.apply_command(&command);
        self.processed_commands = self.processed_commands.saturating_add(1);
        tracing::trace!(
            target: "mythoras.simulation",
            tick = self.tick,
            id = %command.id,
            kind = %command.kind,
            "command applied"
        );
        Some(command)
    }

    /// Feed elapsed wall-clock time; runs one step per whole interval while
    /// running. Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let interval = Duration::from_millis(self.interval_ms);

        let mut steps = 0;
        while self.accumulated >= interval {
            if steps == MAX_STEPS_PER_ADVANCE {
                tracing::warn!(
                    target: "mythoras.simulation",
                    dropped_ms = u64::try_from(self.accumulated.as_millis()).unwrap_or(u64::MAX),
                    "advance backlog dropped"
                );
                self.accumulated = Duration::ZERO;
                break;
            }
            self.accumulated -= interval;
            self.step(self.interval_ms);
            steps += 1;
        }
        steps
    }

    /// Queue a command, stamping it with the current epoch milliseconds.
    pub fn enqueue_command(&mut self, command: Command) {
        self.enqueue_command_at(command, epoch_millis());
    }

    /// Queue a command with an explicit timestamp.
    pub fn enqueue_command_at(&mut self, mut command: Command, timestamp_ms: u64) {
        command.timestamp = Some(timestamp_ms);
        tracing::trace!(
            target: "mythoras.simulation",
            id = %command.id,
            kind = %command.kind,
            queued = self.queue.len() + 1,
            "command enqueued"
        );
        self.queue.push_back(command);
    }

    /// Install a reducer for `kind`. Registered reducers take precedence over
    /// the built-in `noop` and `setState`.
    pub fn register_reducer(
        &mut self,
        kind: impl Into<String>,
        reducer: impl Fn(&mut StateMap, &Command) + 'static,
    ) {
        self.reducers.insert(kind.into(), Box::new(reducer));
    }

    fn apply_command(&mut self, command: &Command) {
        if let Some(reducer) = self.reducers.get(&command.kind) {
            reducer(&mut self.state, command);
            return;
        }
        match command.kind.as_str() {
            command_types::NOOP => {}
            command_types::SET_STATE => match &command.payload {
                Some(Value::Object(patch)) => {
                    for (key, value) in patch {
                        self.state.insert(key.clone(), value.clone());
                    }
                }
                None | Some(Value::Null) => {}
                Some(_) => tracing::debug!(
                    target: "mythoras.simulation",
                    id = %command.id,
                    "setState payload is not an object; ignored"
                ),
            },
            other => tracing::debug!(
                target: "mythoras.simulation",
                id = %command.id,
                kind = other,
                "unknown command type ignored"
            ),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            state: self.state.clone(),
            processed_commands: self.processed_commands,
        }
    }

    /// Restore tick, state and processed count. The queue is left alone.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.tick = snapshot.tick;
        self.state = snapshot.state;
        self.processed_commands = snapshot.processed_commands;
    }

    /// Snapshot as JSON: `{"tick", "state", "processedCommands"}`.
    pub fn serialize(&self) -> Result<String, SimulationError> {
        serde_json::to_string(&self.snapshot()).map_err(SimulationError::Encode)
    }

    pub fn deserialize(raw: &str) -> Result<Snapshot, SimulationError> {
        serde_json::from_str(raw).map_err(SimulationError::Decode)
    }

    /// Parse a serialized snapshot and apply it.
    pub fn restore(&mut self, raw: &str) -> Result<(), SimulationError> {
        let snapshot = Self::deserialize(raw)?;
        self.apply_snapshot(snapshot);
        Ok(())
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
