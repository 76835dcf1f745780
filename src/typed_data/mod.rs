//! StarkNet typed data: off-chain messages hashed for account signatures
//!
//! A typed-data object carries its own type schema, a domain separator and
//! the message itself. Hashing walks the schema recursively:
//!
//! - `encode_type` renders one type as `Name(field:type,...)`. Referenced
//!   struct types are not appended; each struct is hashed on its own.
//! - the type hash is the starknet_keccak of that string
//! - a struct hash is the Pedersen chain hash of the type hash followed by
//!   the encoded field values, in schema order
//! - the message hash chains the `"StarkNet Message"` prefix, the domain
//!   hash, the signer address and the message struct hash
//!
//! Hashing is pure: the same typed data and address always give the same felt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod domain;
mod hash;

#[cfg(test)]
mod tests;

pub use domain::{StarkNetDomain, DOMAIN_TYPE_NAME};
pub use hash::{encode_type, get_message_hash, get_struct_hash, get_type_hash, MESSAGE_PREFIX};

/// One field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }
}

/// Type name to its ordered field list
pub type Types = BTreeMap<String, Vec<TypedDataField>>;

/// A typed-data signing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedData {
    pub types: Types,
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    pub domain: serde_json::Value,
    pub message: serde_json::Value,
}

impl TypedData {
    /// Build a typed-data object from a domain and a message; the domain's
    /// type definition is added to `types`.
    pub fn new(
        domain: &StarkNetDomain,
        mut types: Types,
        primary_type: impl Into<String>,
        message: serde_json::Value,
    ) -> Self {
        types.insert(DOMAIN_TYPE_NAME.to_string(), StarkNetDomain::type_fields());
        Self {
            types,
            primary_type: primary_type.into(),
            domain: domain.to_value(),
            message,
        }
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
