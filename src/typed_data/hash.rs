//! Typed-data hashing functions

use serde_json::Value;
use starknet_core::utils::cairo_short_string_to_felt;
use starknet_crypto::Felt;
use tracing::debug;

use super::domain::DOMAIN_TYPE_NAME;
use super::{TypedData, Types};
use crate::codec::{to_field, to_hex};
use crate::error::{AccountError, Result};
use crate::hash::compute_hash_on_elements;
use crate::selector::{selector_from_name, starknet_keccak};

/// Literal prefix of every message hash, encoded as a Cairo short string
pub const MESSAGE_PREFIX: &str = "StarkNet Message";

const PRIMITIVE_TYPES: [&str; 5] = ["felt", "string", "shortstring", "bool", "selector"];

fn is_known_type(types: &Types, type_name: &str) -> bool {
    types.contains_key(type_name) || PRIMITIVE_TYPES.contains(&type_name)
}

/// Render a type as `Name(field1:type1,field2:type2)`
///
/// Struct types referenced by fields are not appended: every struct gets
/// its own type hash when its value is hashed.
pub fn encode_type(types: &Types, type_name: &str) -> Result<String> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| AccountError::UnknownType(type_name.to_string()))?;

    let members = fields
        .iter()
        .map(|field| format!("{}:{}", field.name, field.r#type))
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!("{}({})", type_name, members))
}

/// starknet_keccak of the encoded type
pub fn get_type_hash(types: &Types, type_name: &str) -> Result<Felt> {
    let encoded = encode_type(types, type_name)?;
    Ok(starknet_keccak(encoded.as_bytes()))
}

/// Chain hash of the type hash followed by every field value in schema order
pub fn get_struct_hash(types: &Types, type_name: &str, data: &Value) -> Result<Felt> {
    let fields = types
        .get(type_name)
        .ok_or_else(|| AccountError::UnknownType(type_name.to_string()))?;

    let object = data.as_object().ok_or_else(|| {
        AccountError::type_mismatch(type_name, type_name, format!("expected an object, got {}", data))
    })?;

    let mut elements = Vec::with_capacity(fields.len() + 1);
    elements.push(get_type_hash(types, type_name)?);

    for field in fields {
        let value = object.get(&field.name).ok_or_else(|| {
            AccountError::type_mismatch(&field.name, &field.r#type, "missing value")
        })?;
        elements.push(encode_value(types, &field.name, &field.r#type, value)?);
    }

    Ok(compute_hash_on_elements(&elements))
}

/// Final message hash signed by the account at `account_address`
pub fn get_message_hash(typed_data: &TypedData, account_address: Felt) -> Result<Felt> {
    let prefix = cairo_short_string_to_felt(MESSAGE_PREFIX)
        .map_err(|e| AccountError::Other(format!("Failed to encode message prefix: {}", e)))?;

    let domain_hash = get_struct_hash(&typed_data.types, DOMAIN_TYPE_NAME, &typed_data.domain)?;
    let message_hash =
        get_struct_hash(&typed_data.types, &typed_data.primary_type, &typed_data.message)?;

    let hash = compute_hash_on_elements(&[prefix, domain_hash, account_address, message_hash]);

    debug!(
        "Typed data {} hashed for {}: {}",
        typed_data.primary_type,
        to_hex(&account_address),
        to_hex(&hash)
    );

    Ok(hash)
}

fn encode_value(types: &Types, field: &str, field_type: &str, value: &Value) -> Result<Felt> {
    if types.contains_key(field_type) {
        return get_struct_hash(types, field_type, value);
    }

    if let Some(element_type) = field_type.strip_suffix('*') {
        if !is_known_type(types, element_type) {
            return Err(AccountError::UnknownType(element_type.to_string()));
        }

        let elements = value.as_array().ok_or_else(|| {
            AccountError::type_mismatch(field, field_type, format!("expected an array, got {}", value))
        })?;

        let encoded = elements
            .iter()
            .map(|element| encode_value(types, field, element_type, element))
            .collect::<Result<Vec<_>>>()?;

        return Ok(compute_hash_on_elements(&encoded));
    }

    match field_type {
        "felt" => encode_felt(field, value),
        "string" | "shortstring" => encode_short_string(field, field_type, value),
        "bool" => match value {
            Value::Bool(flag) => Ok(if *flag { Felt::ONE } else { Felt::ZERO }),
            other => Err(AccountError::type_mismatch(
                field,
                field_type,
                format!("expected a boolean, got {}", other),
            )),
        },
        "selector" => match value {
            Value::String(name) => to_field(name).or_else(|_| Ok(selector_from_name(name))),
            other => Err(AccountError::type_mismatch(
                field,
                field_type,
                format!("expected an entrypoint name, got {}", other),
            )),
        },
        unknown => Err(AccountError::UnknownType(unknown.to_string())),
    }
}

fn encode_felt(field: &str, value: &Value) -> Result<Felt> {
    match value {
        Value::Number(number) => to_field(&number.to_string())
            .map_err(|e| AccountError::type_mismatch(field, "felt", e.to_string())),
        Value::String(text) => {
            to_field(text).map_err(|e| AccountError::type_mismatch(field, "felt", e.to_string()))
        }
        other => Err(AccountError::type_mismatch(
            field,
            "felt",
            format!("expected a number, got {}", other),
        )),
    }
}

fn encode_short_string(field: &str, field_type: &str, value: &Value) -> Result<Felt> {
    match value {
        Value::String(text) => match to_field(text) {
            Ok(felt) => Ok(felt),
            Err(_) => cairo_short_string_to_felt(text)
                .map_err(|e| AccountError::type_mismatch(field, field_type, e.to_string())),
        },
        Value::Number(_) => encode_felt(field, value),
        other => Err(AccountError::type_mismatch(
            field,
            field_type,
            format!("expected a string, got {}", other),
        )),
    }
}
