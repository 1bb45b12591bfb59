//! Shop Errors

use lib_tokens::{Role, TokenError};
use lib_types::{Address, Amount, ItemId};
use thiserror::Error;

/// Error during a shop operation
///
/// Every error aborts the whole call; no partial state change survives it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Insufficient native reserve: have {have}, need {need}")]
    InsufficientReserve { have: Amount, need: Amount },

    #[error("Item unavailable: {0}")]
    ItemUnavailable(ItemId),

    #[error("Caller {caller} does not own item {item_id}")]
    NotOwner { item_id: ItemId, caller: Address },

    #[error("Unauthorized: {0} is not the custodian")]
    Unauthorized(Address),

    #[error("Reentrant call rejected")]
    Reentrancy,

    #[error("Collaborator mismatch for {collaborator}: expected {expected}, got {actual}")]
    CollaboratorMismatch {
        collaborator: &'static str,
        expected: Address,
        actual: Address,
    },

    #[error("Shop is missing capability {role:?} on the {collaborator}")]
    MissingCapability {
        collaborator: &'static str,
        role: Role,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Collaborator failures surface unchanged
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Result type for shop operations
pub type ShopResult<T> = Result<T, ShopError>;
