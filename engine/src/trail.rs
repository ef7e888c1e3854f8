//! Explanation trail: the auditable record of one computation
//!
//! Each stage appends exactly one entry before it returns, on success and on
//! failure. Entries are never modified once recorded; the trail only exposes
//! shared access to what it holds. A trail belongs to the single call that
//! created it and is not meant to be shared between requests.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailEntry {
    pub stage: String,
    pub inputs: Value,
    pub outputs: Value,
    pub notes: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ExplanationTrail {
    entries: Vec<TrailEntry>,
}

impl ExplanationTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed stage
    pub fn record(&mut self, entry: TrailEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// First entry recorded by `stage`
    pub fn stage(&self, stage: &str) -> Option<&TrailEntry> {
        self.entries.iter().find(|e| e.stage == stage)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<TrailEntry> {
        self.entries
    }
}

/// Collects inputs and notes while a stage runs, then appends a single entry.
///
/// Consuming `finish` guarantees a stage cannot write twice.
#[derive(Debug)]
pub struct StageRecorder {
    stage: &'static str,
    inputs: Value,
    notes: Vec<String>,
}

impl StageRecorder {
    pub fn begin(stage: &'static str, inputs: Value) -> Self {
        StageRecorder {
            stage,
            inputs,
            notes: Vec::new(),
        }
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn finish(self, trail: &mut ExplanationTrail, outputs: Value) {
        trail.record(TrailEntry {
            stage: self.stage.to_string(),
            inputs: self.inputs,
            outputs,
            notes: self.notes,
        });
    }

    /// Finish with the stage's result: the success value, or the error envelope
    pub fn finish_with<T: Serialize>(
        self,
        trail: &mut ExplanationTrail,
        result: &crate::Result<T>,
    ) {
        let outputs = match result {
            Ok(value) => snapshot(value),
            Err(err) => snapshot(&err.envelope()),
        };
        self.finish(trail, outputs);
    }
}

/// Serialize `value` into a trail snapshot
pub fn snapshot<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| json!({ "snapshot_error": err.to_string() }))
}
