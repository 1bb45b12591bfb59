//! Collaborator ledgers for the shop
//!
//! The exchange core consumes three external ledgers through the traits
//! defined here. Each trait is paired with an in-memory implementation used
//! by tests and simulations.
//!
//! # Key Types
//!
//! - [`NativeBank`]: native currency balances owned by the execution environment
//! - [`FungibleLedger`]: balances, allowances, role-gated minting and burning
//! - [`ItemRegistry`]: unique item ownership, approvals, minting and burning
//! - [`AuthoritySet`]: (principal, role) capability pairs
//! - [`Journal`]: checkpoint/commit/rollback used to make shop calls atomic

pub mod access;
pub mod errors;
pub mod fungible;
pub mod items;
pub mod journal;
pub mod native;

pub use access::{AuthoritySet, Role};
pub use errors::{TokenError, TokenResult};
pub use fungible::{FungibleLedger, FungibleState, InMemoryFungibleLedger};
pub use items::{InMemoryItemRegistry, ItemRegistry, RegistryState};
pub use journal::{Journal, Journaled};
pub use native::{InMemoryNativeBank, NativeBank};
