//! Checkpointed state for atomic calls
//!
//! A caller opens a checkpoint with `begin`, then either folds the changes
//! into the enclosing scope with `commit` or discards them with `rollback`.
//! Checkpoints nest.

/// Checkpoint control implemented by every collaborator ledger
pub trait Journal {
    /// Open a checkpoint
    fn begin(&mut self);

    /// Keep all changes made since the matching `begin`
    fn commit(&mut self);

    /// Discard all changes made since the matching `begin`
    fn rollback(&mut self);

    /// Number of open checkpoints
    fn depth(&self) -> usize;
}

/// State wrapper holding the live value plus a stack of checkpoints
#[derive(Debug, Clone, Default)]
pub struct Journaled<T: Clone> {
    current: T,
    checkpoints: Vec<T>,
}

impl<T: Clone> Journaled<T> {
    pub fn new(state: T) -> Self {
        Self {
            current: state,
            checkpoints: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.current
    }
}

impl<T: Clone> Journal for Journaled<T> {
    fn begin(&mut self) {
        self.checkpoints.push(self.current.clone());
    }

    fn commit(&mut self) {
        if self.checkpoints.pop().is_none() {
            tracing::warn!("Journal: commit without an open checkpoint");
        }
    }

    fn rollback(&mut self) {
        match self.checkpoints.pop() {
            Some(previous) => self.current = previous,
            None => tracing::warn!("Journal: rollback without an open checkpoint"),
        }
    }

    fn depth(&self) -> usize {
        self.checkpoints.len()
    }
}
