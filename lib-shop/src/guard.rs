//! Reentrancy guard
//!
//! A collaborator invoked during a shop call must not be able to start a
//! second shop call before the first finishes. The guard is held for the
//! whole call and released on drop, on success and on error alike.

use std::cell::Cell;

use crate::errors::{ShopError, ShopResult};

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: Cell<bool>,
}

/// Held while a shop call is in flight
#[derive(Debug)]
pub struct GuardHandle<'a> {
    guard: &'a ReentrancyGuard,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the guarded section; fails if a call is already in flight
    pub fn enter(&self) -> ShopResult<GuardHandle<'_>> {
        if self.entered.replace(true) {
            return Err(ShopError::Reentrancy);
        }
        Ok(GuardHandle { guard: self })
    }

    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }
}

impl Drop for GuardHandle<'_> {
    fn drop(&mut self) {
        self.guard.entered.set(false);
    }
}
