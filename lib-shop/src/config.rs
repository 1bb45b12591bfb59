//! Shop deployment configuration
//!
//! Parameters are fixed at deployment. They can be built in code or loaded
//! from a TOML file:
//!
//! ```toml
//! ratio = 5
//! item_price = 100000000000000000
//! shop_address = "0x0101..."
//! payment_token = "0x0202..."
//! item_registry = "0x0303..."
//! custodian = "0x0404..."
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use lib_types::{Address, Amount};

/// Error loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration handling
pub type ConfigResult<T> = Result<T, ConfigError>;

/// TOML integers are 64-bit signed; larger amounts are written as strings.
mod amount_repr {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use lib_types::Amount;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        match i64::try_from(*amount) {
            Ok(value) => serializer.serialize_i64(value),
            Err(_) => serializer.collect_str(amount),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(value) => Ok(Amount::from(value)),
            Repr::Text(text) => text.replace('_', "").parse().map_err(de::Error::custom),
        }
    }
}

/// Immutable parameters of one deployed shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Native units per one fungible unit
    #[serde(with = "amount_repr")]
    pub ratio: Amount,
    /// Fungible units per item
    #[serde(with = "amount_repr")]
    pub item_price: Amount,
    /// The shop's own account (holds the pool and the native reserve)
    pub shop_address: Address,
    /// Fungible ledger the shop mints, burns and collects in
    pub payment_token: Address,
    /// Item registry the shop mints and burns in
    pub item_registry: Address,
    /// Initial custodian of the pool
    pub custodian: Address,
}

impl ShopConfig {
    pub fn new(
        ratio: Amount,
        item_price: Amount,
        shop_address: Address,
        payment_token: Address,
        item_registry: Address,
        custodian: Address,
    ) -> Self {
        Self {
            ratio,
            item_price,
            shop_address,
            payment_token,
            item_registry,
            custodian,
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: ShopConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded shop configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.ratio == 0 {
            return Err(ConfigError::Invalid("ratio must be positive".to_string()));
        }
        if self.item_price == 0 {
            return Err(ConfigError::Invalid("item_price must be positive".to_string()));
        }

        let addresses = [
            ("shop_address", &self.shop_address),
            ("payment_token", &self.payment_token),
            ("item_registry", &self.item_registry),
            ("custodian", &self.custodian),
        ];
        for (name, address) in addresses {
            if address.is_zero() {
                return Err(ConfigError::Invalid(format!("{} is the zero address", name)));
            }
        }

        if self.shop_address == self.payment_token || self.shop_address == self.item_registry {
            return Err(ConfigError::Invalid(
                "shop_address must differ from its collaborators".to_string(),
            ));
        }
        if self.custodian == self.shop_address {
            return Err(ConfigError::Invalid(
                "custodian must differ from shop_address".to_string(),
            ));
        }
        if self.payment_token == self.item_registry {
            return Err(ConfigError::Invalid(
                "payment_token and item_registry must differ".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> ShopConfig {
        ShopConfig::new(
            5,
            100_000_000_000_000_000,
            Address::new([1u8; 32]),
            Address::new([2u8; 32]),
            Address::new([3u8; 32]),
            Address::new([4u8; 32]),
        )
    }

    #[test]
    fn test_toml_round_trip() {
        let config = sample();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("ratio = 5"));

        let parsed = ShopConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample().to_toml_string().unwrap()).unwrap();

        let loaded = ShopConfig::load(file.path()).unwrap();
        assert_eq!(loaded.ratio, 5);
        assert_eq!(loaded.custodian, Address::new([4u8; 32]));
    }

    #[test]
    fn test_missing_file() {
        let result = ShopConfig::load("/nonexistent/shop.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_rejects_zero_ratio() {
        let mut config = sample();
        config.ratio = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_address() {
        let mut config = sample();
        config.custodian = Address::zero();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("custodian"));
    }

    #[test]
    fn test_rejects_shop_as_custodian() {
        let mut config = sample();
        config.custodian = config.shop_address;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("custodian"));

        let rendered = config.to_toml_string().unwrap();
        assert!(matches!(
            ShopConfig::from_toml_str(&rendered),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_shop_aliasing_collaborator() {
        let mut config = sample();
        config.shop_address = config.payment_token;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_large_amounts_as_strings() {
        let mut config = sample();
        config.item_price = 10u128.pow(24);
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains(r#"item_price = "1000000000000000000000000""#));

        let parsed = ShopConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.item_price, 10u128.pow(24));

        let underscored = rendered.replace(
            r#""1000000000000000000000000""#,
            r#""1_000_000_000_000_000_000_000_000""#,
        );
        assert_eq!(
            ShopConfig::from_toml_str(&underscored).unwrap().item_price,
            10u128.pow(24)
        );
    }

    #[test]
    fn test_rejects_bad_address_hex() {
        let content = r#"
            ratio = 5
            item_price = 10
            shop_address = "0x01"
            payment_token = "0x02"
            item_registry = "0x03"
            custodian = "0x04"
        "#;
        assert!(matches!(
            ShopConfig::from_toml_str(content),
            Err(ConfigError::Parse(_))
        ));
    }
}
