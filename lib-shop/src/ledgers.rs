//! Collaborator bundle handed to every shop call
//!
//! The shop references its collaborators but never owns them. A call
//! borrows them for its duration through [`Ledgers`], which also opens and
//! closes the checkpoint that makes the call atomic.

use lib_tokens::{FungibleLedger, ItemRegistry, NativeBank};

use crate::events::EventIndexer;

pub struct Ledgers<'a> {
    pub native: &'a mut dyn NativeBank,
    pub payment: &'a mut dyn FungibleLedger,
    pub items: &'a mut dyn ItemRegistry,
    pub events: &'a mut dyn EventIndexer,
}

impl<'a> Ledgers<'a> {
    pub fn new(
        native: &'a mut dyn NativeBank,
        payment: &'a mut dyn FungibleLedger,
        items: &'a mut dyn ItemRegistry,
        events: &'a mut dyn EventIndexer,
    ) -> Self {
        Self {
            native,
            payment,
            items,
            events,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.native.begin();
        self.payment.begin();
        self.items.begin();
    }

    pub(crate) fn commit(&mut self) {
        self.native.commit();
        self.payment.commit();
        self.items.commit();
    }

    pub(crate) fn rollback(&mut self) {
        self.native.rollback();
        self.payment.rollback();
        self.items.rollback();
    }
}

impl std::fmt::Debug for Ledgers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledgers")
            .field("payment", &self.payment.address())
            .field("items", &self.items.address())
            .field("events", &self.events.event_count())
            .finish()
    }
}
