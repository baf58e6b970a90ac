use crate::form::{ConstraintSpec, ProblemForm};
use crate::problem::Direction;
use crate::solution::SolveResult;
use time::OffsetDateTime;

/// Snapshot of one solve. Entries are only handed out by shared reference.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    sequence: usize,
    created_at: OffsetDateTime,
    direction: Direction,
    objective: Vec<f64>,
    constraints: Vec<ConstraintSpec>,
    result: SolveResult,
}

impl HistoryEntry {
    pub fn new(form: &ProblemForm, result: SolveResult) -> Self {
        Self {
            sequence: 0,
            created_at: OffsetDateTime::now_utc(),
            direction: form.direction,
            objective: form.objective.clone(),
            constraints: form.constraints.clone(),
            result,
        }
    }

    /// 1-based position within the session.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn clock_time(&self) -> String {
        let t = self.created_at.time();
        format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[ConstraintSpec] {
        &self.constraints
    }

    pub fn result(&self) -> &SolveResult {
        &self.result
    }
}

/// Append-only log of the solves made during one session.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, mut entry: HistoryEntry) -> &HistoryEntry {
        entry.sequence = self.entries.len() + 1;
        tracing::debug!(sequence = entry.sequence, status = %entry.result.status, "history append");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// The `n` newest entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        tracing::debug!(discarded = self.entries.len(), "history cleared");
        self.entries = Vec::new();
    }
}
