//! Drag-and-drop reordering of form steps and footer links.
//!
//! Reordering is a plain remove-then-insert splice. Form steps add one rule:
//! a designated final step (typically checkout) always stays last, no matter
//! what is dragged where.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Index {index} out of range (length: {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Step {0:?} must stay last")]
    PinnedLast(String),

    #[error("Step {0:?} is already present")]
    Duplicate(String),
}

/// Move the item at `from` so that it ends up at index `to`.
///
/// Both indices refer to the list as it is before the move.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), OrderError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(OrderError::OutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

/// Ordered step identifiers with an optional step pinned to the end.
///
/// Deserialization goes through [`StepOrder::new`], so a stored ordering with
/// the pinned step misplaced or missing is repaired on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredStepOrder")]
pub struct StepOrder {
    steps: Vec<String>,
    pinned_last: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredStepOrder {
    steps: Vec<String>,
    pinned_last: Option<String>,
}

impl From<StoredStepOrder> for StepOrder {
    fn from(stored: StoredStepOrder) -> Self {
        StepOrder::new(stored.steps, stored.pinned_last)
    }
}

impl StepOrder {
    /// Build from an ordering loaded from the backend.
    ///
    /// Duplicates are dropped (first occurrence wins) and the pinned step is
    /// moved to, or appended at, the end.
    pub fn new(steps: Vec<String>, pinned_last: Option<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(steps.len() + 1);
        for step in steps {
            if !unique.contains(&step) {
                unique.push(step);
            }
        }

        if let Some(pinned) = &pinned_last {
            unique.retain(|s| s != pinned);
            unique.push(pinned.clone());
        }

        Self {
            steps: unique,
            pinned_last,
        }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn pinned_last(&self) -> Option<&str> {
        self.pinned_last.as_deref()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps that can be reordered.
    fn movable_len(&self) -> usize {
        match self.pinned_last {
            Some(_) => self.steps.len().saturating_sub(1),
            None => self.steps.len(),
        }
    }

    fn pinned_error(&self) -> OrderError {
        OrderError::PinnedLast(self.pinned_last.clone().unwrap_or_default())
    }

    /// Drag the step at `from` to `to`. The pinned step cannot be moved and
    /// nothing can be dropped after it.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), OrderError> {
        let len = self.steps.len();
        let movable = self.movable_len();

        for index in [from, to] {
            if index >= len {
                return Err(OrderError::OutOfRange { index, len });
            }
            if index >= movable {
                return Err(self.pinned_error());
            }
        }

        move_item(&mut self.steps, from, to)
    }

    /// Add a step just before the pinned step (or at the end).
    pub fn insert(&mut self, step: impl Into<String>) -> Result<(), OrderError> {
        let step = step.into();
        if self.steps.contains(&step) {
            return Err(OrderError::Duplicate(step));
        }
        let at = self.movable_len();
        self.steps.insert(at, step);
        Ok(())
    }

    /// Remove the step at `index`. The pinned step cannot be removed.
    pub fn remove(&mut self, index: usize) -> Result<String, OrderError> {
        let len = self.steps.len();
        if index >= len {
            return Err(OrderError::OutOfRange { index, len });
        }
        if index >= self.movable_len() {
            return Err(self.pinned_error());
        }
        Ok(self.steps.remove(index))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
