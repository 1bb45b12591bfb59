//! Collaborator Ledger Errors

use lib_types::{Address, Amount, ItemId};
use thiserror::Error;

use crate::access::Role;

/// Error raised by a native bank, fungible ledger or item registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Account {account} is missing role {role:?}")]
    MissingRole { role: Role, account: Address },

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item already exists: {0}")]
    ItemAlreadyExists(ItemId),

    #[error("Operator {operator} is neither owner nor approved for item {item}")]
    NotApproved { item: ItemId, operator: Address },

    #[error("Account {account} does not own item {item}")]
    NotItemOwner { item: ItemId, account: Address },

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("Arithmetic overflow")]
    Overflow,
}

/// Result type for collaborator ledger operations
pub type TokenResult<T> = Result<T, TokenError>;
