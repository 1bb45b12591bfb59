//! Shop Events
//!
//! Every committed shop call emits exactly one event carrying the caller and
//! the exact integer amounts involved. Rolled-back calls emit nothing.

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount, ItemId};

/// Shop events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShopEvent {
    /// Native currency exchanged for fungible tokens
    TokensPurchased {
        buyer: Address,
        /// Native units debited from the buyer
        native_amount: Amount,
        /// Fungible units minted to the buyer
        token_amount: Amount,
        /// Native units kept by the shop (native_amount mod ratio)
        retained: Amount,
    },

    /// Fungible tokens burned for native currency
    TokensReturned {
        seller: Address,
        token_amount: Amount,
        native_amount: Amount,
    },

    /// Item bought with fungible tokens
    ItemPurchased {
        buyer: Address,
        item_id: ItemId,
        price: Amount,
    },

    /// Item burned for a fungible refund
    ItemReturned {
        owner: Address,
        item_id: ItemId,
        refund: Amount,
    },

    /// Pool tokens withdrawn by the custodian
    Withdrawal { custodian: Address, amount: Amount },

    /// Custodian role handed over
    CustodyTransferred { previous: Address, current: Address },
}

impl ShopEvent {
    /// Account that initiated the call
    pub fn actor(&self) -> &Address {
        match self {
            ShopEvent::TokensPurchased { buyer, .. } => buyer,
            ShopEvent::TokensReturned { seller, .. } => seller,
            ShopEvent::ItemPurchased { buyer, .. } => buyer,
            ShopEvent::ItemReturned { owner, .. } => owner,
            ShopEvent::Withdrawal { custodian, .. } => custodian,
            ShopEvent::CustodyTransferred { previous, .. } => previous,
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ShopEvent::TokensPurchased { .. } => "tokens_purchased",
            ShopEvent::TokensReturned { .. } => "tokens_returned",
            ShopEvent::ItemPurchased { .. } => "item_purchased",
            ShopEvent::ItemReturned { .. } => "item_returned",
            ShopEvent::Withdrawal { .. } => "withdrawal",
            ShopEvent::CustodyTransferred { .. } => "custody_transferred",
        }
    }

    /// Render for off-chain audit
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for ShopEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopEvent::TokensPurchased {
                buyer,
                native_amount,
                token_amount,
                ..
            } => write!(f, "TokensPurchased({} paid {} for {})", buyer, native_amount, token_amount),
            ShopEvent::TokensReturned {
                seller,
                token_amount,
                native_amount,
            } => write!(f, "TokensReturned({} burned {} for {})", seller, token_amount, native_amount),
            ShopEvent::ItemPurchased { buyer, item_id, price } => {
                write!(f, "ItemPurchased({} bought {} for {})", buyer, item_id, price)
            }
            ShopEvent::ItemReturned { owner, item_id, refund } => {
                write!(f, "ItemReturned({} returned {} for {})", owner, item_id, refund)
            }
            ShopEvent::Withdrawal { custodian, amount } => {
                write!(f, "Withdrawal({} took {})", custodian, amount)
            }
            ShopEvent::CustodyTransferred { previous, current } => {
                write!(f, "CustodyTransferred({} -> {})", previous, current)
            }
        }
    }
}

/// Event indexer interface
///
/// Implement this to index shop events for audit queries.
pub trait EventIndexer {
    /// Index a new event
    fn index_event(&mut self, event: ShopEvent);

    /// Get all events initiated by an account
    fn get_account_events(&self, account: &Address) -> Vec<&ShopEvent>;

    /// Get all events of one type (see [`ShopEvent::event_type`])
    fn get_events_by_type(&self, event_type: &str) -> Vec<&ShopEvent>;

    /// Get the most recent event
    fn get_latest_event(&self) -> Option<&ShopEvent>;

    fn event_count(&self) -> usize;
}

/// In-memory event indexer for testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventIndexer {
    events: Vec<ShopEvent>,
}

impl InMemoryEventIndexer {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[ShopEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventIndexer for InMemoryEventIndexer {
    fn index_event(&mut self, event: ShopEvent) {
        self.events.push(event);
    }

    fn get_account_events(&self, account: &Address) -> Vec<&ShopEvent> {
        self.events.iter().filter(|e| e.actor() == account).collect()
    }

    fn get_events_by_type(&self, event_type: &str) -> Vec<&ShopEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    fn get_latest_event(&self) -> Option<&ShopEvent> {
        self.events.last()
    }

    fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let event = ShopEvent::ItemPurchased {
            buyer: Address::new([2u8; 32]),
            item_id: ItemId(0),
            price: 100,
        };

        assert_eq!(event.actor(), &Address::new([2u8; 32]));
        assert_eq!(event.event_type(), "item_purchased");
        assert!(event.to_string().contains("#0"));
    }

    #[test]
    fn test_json_carries_exact_amounts() {
        let event = ShopEvent::TokensPurchased {
            buyer: Address::new([1u8; 32]),
            native_amount: 1_000_000_000_000_000_003,
            token_amount: 200_000_000_000_000_000,
            retained: 3,
        };

        let json = event.to_json().unwrap();
        assert!(json.contains("\"native_amount\":1000000000000000003"));
        assert!(json.contains(&format!("\"buyer\":\"0x{}\"", "01".repeat(32))));

        let back: ShopEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_indexer() {
        let mut indexer = InMemoryEventIndexer::new();
        let alice = Address::new([1u8; 32]);
        let bob = Address::new([2u8; 32]);

        indexer.index_event(ShopEvent::TokensPurchased {
            buyer: alice,
            native_amount: 10,
            token_amount: 2,
            retained: 0,
        });
        indexer.index_event(ShopEvent::ItemPurchased {
            buyer: alice,
            item_id: ItemId(1),
            price: 2,
        });
        indexer.index_event(ShopEvent::Withdrawal {
            custodian: bob,
            amount: 2,
        });

        assert_eq!(indexer.event_count(), 3);
        assert_eq!(indexer.get_account_events(&alice).len(), 2);
        assert_eq!(indexer.get_events_by_type("withdrawal").len(), 1);
        assert_eq!(indexer.get_latest_event().map(|e| e.event_type()), Some("withdrawal"));

        indexer.clear();
        assert_eq!(indexer.event_count(), 0);
    }
}
