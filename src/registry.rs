//! Ordered registry of plotted functions.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::render::Color;

static ENTRY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a plot entry.
///
/// Identifiers are never reused, so they stay valid as cache keys after other
/// entries are removed and indices shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

impl EntryId {
    fn next() -> Self {
        Self(ENTRY_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A user expression and the color it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotEntry {
    id: EntryId,
    expression: String,
    color: Color,
}

impl PlotEntry {
    /// Create an entry for raw expression text.
    pub fn new(expression: impl Into<String>, color: Color) -> Self {
        Self {
            id: EntryId::next(),
            expression: expression.into(),
            color,
        }
    }

    /// Access the entry identifier.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Access the expression exactly as entered.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Access the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// Errors from registry mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No entry exists at the requested position.
    #[error("no function at index {index} (registry holds {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries.
        len: usize,
    },
}

/// Plot entries in display order.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: Vec<PlotEntry>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its identifier.
    pub fn push(&mut self, entry: PlotEntry) -> EntryId {
        let id = entry.id();
        self.entries.push(entry);
        id
    }

    /// Remove and return the entry at `index`, shifting later entries down.
    pub fn remove(&mut self, index: usize) -> Result<PlotEntry, RegistryError> {
        if index >= self.entries.len() {
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Access all entries in display order.
    pub fn entries(&self) -> &[PlotEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether an entry with `id` is still registered.
    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }
}
