//! Shop ledger primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: No String identifiers in ledger state. Ever.

pub mod primitives;

pub use primitives::{Address, AddressParseError, Amount, ItemId, NATIVE_UNIT};
