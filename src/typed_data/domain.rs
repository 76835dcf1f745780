//! StarkNet domain separator for typed data

use serde_json::json;

use super::TypedDataField;

/// Name under which the domain type must be declared
pub const DOMAIN_TYPE_NAME: &str = "StarkNetDomain";

/// Domain separator to prevent replay attacks across different chains/applications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarkNetDomain {
    pub name: String,
    pub version: String,
    pub chain_id: String,
}

impl StarkNetDomain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: chain_id.into(),
        }
    }

    /// Domain on the mainnet chain
    pub fn mainnet(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, "SN_MAIN")
    }

    /// Domain on the goerli testnet chain
    pub fn testnet(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, "SN_GOERLI")
    }

    /// Field list of the `StarkNetDomain` type, all encoded as short strings
    pub fn type_fields() -> Vec<TypedDataField> {
        vec![
            TypedDataField::new("name", "string"),
            TypedDataField::new("version", "string"),
            TypedDataField::new("chainId", "string"),
        ]
    }

    pub fn to_value(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "version": self.version,
            "chainId": self.chain_id,
        })
    }
}
