//! Shared deployment for shop integration tests

#![allow(dead_code)]

use lib_shop::{InMemoryEventIndexer, Ledgers, Shop, ShopConfig, ShopEvent, ShopResult};
use lib_tokens::{
    FungibleLedger, InMemoryFungibleLedger, InMemoryItemRegistry, InMemoryNativeBank, ItemRegistry,
    Role,
};
use lib_types::{Address, Amount, ItemId, NATIVE_UNIT};

pub const RATIO: Amount = 5;
pub const ITEM_PRICE: Amount = NATIVE_UNIT / 10;
pub const INITIAL_FUNDS: Amount = 100 * NATIVE_UNIT;

pub fn addr(id: u8) -> Address {
    Address::new([id; 32])
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deployer, two users and a deployed shop wired to fresh ledgers
pub struct TestEnv {
    pub shop: Shop,
    pub bank: InMemoryNativeBank,
    pub token: InMemoryFungibleLedger,
    pub nft: InMemoryItemRegistry,
    pub indexer: InMemoryEventIndexer,
    pub deployer: Address,
    pub alice: Address,
    pub bob: Address,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_params(RATIO, ITEM_PRICE)
    }

    pub fn with_params(ratio: Amount, item_price: Amount) -> Self {
        init_logging();

        let deployer = addr(0xD0);
        let alice = addr(0xA1);
        let bob = addr(0xB0);
        let shop_address = addr(0x50);

        let mut token = InMemoryFungibleLedger::new(
            addr(0x70),
            "My Token".to_string(),
            "MTK".to_string(),
            18,
            deployer,
        );
        let mut nft =
            InMemoryItemRegistry::new(addr(0x80), "My NFT".to_string(), "NFT".to_string(), deployer);

        let shop = Shop::new(ShopConfig::new(
            ratio,
            item_price,
            shop_address,
            token.address(),
            nft.address(),
            deployer,
        ))
        .unwrap();

        token.grant_role(&deployer, Role::Minter, shop_address).unwrap();
        nft.grant_role(&deployer, Role::Minter, shop_address).unwrap();

        let mut bank = InMemoryNativeBank::new();
        for account in [deployer, alice, bob] {
            bank.credit(&account, INITIAL_FUNDS).unwrap();
        }

        Self {
            shop,
            bank,
            token,
            nft,
            indexer: InMemoryEventIndexer::new(),
            deployer,
            alice,
            bob,
        }
    }

    pub fn ledgers(&mut self) -> Ledgers<'_> {
        Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        )
    }

    pub fn buy_tokens(&mut self, caller: Address, value: Amount) -> ShopResult<ShopEvent> {
        let mut ledgers = Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        );
        self.shop.buy_tokens(&mut ledgers, &caller, value)
    }

    pub fn return_tokens(&mut self, caller: Address, amount: Amount) -> ShopResult<ShopEvent> {
        let mut ledgers = Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        );
        self.shop.return_tokens(&mut ledgers, &caller, amount)
    }

    pub fn buy_item(&mut self, caller: Address, item_id: u64) -> ShopResult<ShopEvent> {
        let mut ledgers = Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        );
        self.shop.buy_item(&mut ledgers, &caller, ItemId(item_id))
    }

    pub fn return_item(&mut self, caller: Address, item_id: u64) -> ShopResult<ShopEvent> {
        let mut ledgers = Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        );
        self.shop.return_item(&mut ledgers, &caller, ItemId(item_id))
    }

    pub fn withdraw(&mut self, caller: Address) -> ShopResult<ShopEvent> {
        let mut ledgers = Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        );
        self.shop.withdraw(&mut ledgers, &caller)
    }

    pub fn withdraw_amount(&mut self, caller: Address, amount: Amount) -> ShopResult<ShopEvent> {
        let mut ledgers = Ledgers::new(
            &mut self.bank,
            &mut self.token,
            &mut self.nft,
            &mut self.indexer,
        );
        self.shop.withdraw_amount(&mut ledgers, &caller, amount)
    }

    /// Allow the shop to pull `amount` of `owner`'s tokens
    pub fn approve_shop_tokens(&mut self, owner: Address, amount: Amount) {
        let shop = self.shop.address();
        self.token.approve(&owner, &shop, amount).unwrap();
    }

    /// Allow the shop to burn `owner`'s item
    pub fn approve_shop_item(&mut self, owner: Address, item_id: u64) {
        let shop = self.shop.address();
        self.nft.approve(&owner, &shop, ItemId(item_id)).unwrap();
    }

    pub fn native_balance(&self, account: &Address) -> Amount {
        lib_tokens::NativeBank::balance_of(&self.bank, account)
    }

    pub fn token_balance(&self, account: &Address) -> Amount {
        self.token.balance_of(account)
    }

    pub fn pool(&self) -> Amount {
        self.shop.pool_balance(&self.token)
    }

    pub fn reserve(&self) -> Amount {
        self.shop.reserve_balance(&self.bank)
    }
}
