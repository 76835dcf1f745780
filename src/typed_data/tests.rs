//! Typed-data hashing tests over a mail fixture

use serde_json::json;
use starknet_crypto::Felt;

use super::*;
use crate::codec::to_field;
use crate::error::AccountError;
use crate::hash::compute_hash_on_elements;
use crate::selector::starknet_keccak;

const SIGNER: &str = "0x2a7f6a7a3f1b2f6bd1d6c1f4a5ff82b5e2f5a9a0c8e0d4f33c1b2e5a7f9d8c1";

fn signer() -> Felt {
    to_field(SIGNER).unwrap()
}

fn mail_fixture() -> TypedData {
    TypedData::from_json(
        &json!({
            "types": {
                "StarkNetDomain": [
                    { "name": "name", "type": "string" },
                    { "name": "version", "type": "felt" },
                    { "name": "chainId", "type": "felt" }
                ],
                "Person": [
                    { "name": "name", "type": "string" },
                    { "name": "wallet", "type": "felt" }
                ],
                "Mail": [
                    { "name": "from", "type": "Person" },
                    { "name": "to", "type": "Person" },
                    { "name": "contents", "type": "string" }
                ],
                "Reply": [
                    { "name": "from", "type": "Person" },
                    { "name": "to", "type": "Person" },
                    { "name": "contents", "type": "string" }
                ]
            },
            "primaryType": "Mail",
            "domain": { "name": "StarkNet Mail", "version": "1", "chainId": 1 },
            "message": {
                "from": { "name": "Cow", "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826" },
                "to": { "name": "Bob", "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB" },
                "contents": "Hello, Bob!"
            }
        })
        .to_string(),
    )
    .unwrap()
}

fn bag_fixture() -> TypedData {
    TypedData::from_json(
        &json!({
            "types": {
                "StarkNetDomain": [
                    { "name": "name", "type": "string" },
                    { "name": "version", "type": "felt" },
                    { "name": "chainId", "type": "felt" }
                ],
                "Person": [
                    { "name": "name", "type": "string" },
                    { "name": "wallet", "type": "felt" }
                ],
                "Bag": [
                    { "name": "ids", "type": "felt*" },
                    { "name": "owners", "type": "Person*" },
                    { "name": "sealed", "type": "bool" },
                    { "name": "entrypoint", "type": "selector" }
                ]
            },
            "primaryType": "Bag",
            "domain": { "name": "Bags", "version": "1", "chainId": "0x534e5f474f45524c49" },
            "message": {
                "ids": ["1", "0x2", 3],
                "owners": [
                    { "name": "Cow", "wallet": "0x1" },
                    { "name": "Bob", "wallet": "0x2" }
                ],
                "sealed": true,
                "entrypoint": "transfer"
            }
        })
        .to_string(),
    )
    .unwrap()
}

#[test]
fn test_encode_type_is_flat() {
    let typed_data = mail_fixture();

    assert_eq!(
        encode_type(&typed_data.types, "Mail").unwrap(),
        "Mail(from:Person,to:Person,contents:string)"
    );
    assert_eq!(
        encode_type(&typed_data.types, "StarkNetDomain").unwrap(),
        "StarkNetDomain(name:string,version:felt,chainId:felt)"
    );
}

#[test]
fn test_type_hash_is_keccak_of_encoded_type() {
    let typed_data = mail_fixture();
    let expected = starknet_keccak(b"Person(name:string,wallet:felt)");
    assert_eq!(get_type_hash(&typed_data.types, "Person").unwrap(), expected);
}

#[test]
fn test_struct_hash_chains_type_hash_and_fields() {
    let typed_data = mail_fixture();
    let person = json!({ "name": "0x426f62", "wallet": "0x2" });

    let expected = compute_hash_on_elements(&[
        get_type_hash(&typed_data.types, "Person").unwrap(),
        Felt::from(0x426f62u64),
        Felt::from(2u64),
    ]);

    assert_eq!(
        get_struct_hash(&typed_data.types, "Person", &person).unwrap(),
        expected
    );
}

#[test]
fn test_nested_struct_is_substituted_by_its_hash() {
    let typed_data = mail_fixture();
    let message = &typed_data.message;

    let from = get_struct_hash(&typed_data.types, "Person", &message["from"]).unwrap();
    let to = get_struct_hash(&typed_data.types, "Person", &message["to"]).unwrap();
    let contents = starknet_core::utils::cairo_short_string_to_felt("Hello, Bob!").unwrap();

    let expected = compute_hash_on_elements(&[
        get_type_hash(&typed_data.types, "Mail").unwrap(),
        from,
        to,
        contents,
    ]);

    assert_eq!(
        get_struct_hash(&typed_data.types, "Mail", message).unwrap(),
        expected
    );
}

#[test]
fn test_message_hash_layout() {
    let typed_data = mail_fixture();

    let prefix = starknet_core::utils::cairo_short_string_to_felt(MESSAGE_PREFIX).unwrap();
    let domain = get_struct_hash(&typed_data.types, DOMAIN_TYPE_NAME, &typed_data.domain).unwrap();
    let message = get_struct_hash(&typed_data.types, "Mail", &typed_data.message).unwrap();

    assert_eq!(
        get_message_hash(&typed_data, signer()).unwrap(),
        compute_hash_on_elements(&[prefix, domain, signer(), message])
    );
}

#[test]
fn test_message_hash_is_deterministic() {
    let a = get_message_hash(&mail_fixture(), signer()).unwrap();
    let b = get_message_hash(&mail_fixture(), signer()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_changing_a_field_value_changes_the_hash() {
    let original = get_message_hash(&mail_fixture(), signer()).unwrap();

    let mut changed = mail_fixture();
    changed.message["contents"] = json!("Hello, Cow!");

    assert_ne!(get_message_hash(&changed, signer()).unwrap(), original);
}

#[test]
fn test_changing_field_order_changes_the_hash() {
    let original = get_message_hash(&mail_fixture(), signer()).unwrap();

    let mut reordered = mail_fixture();
    reordered
        .types
        .get_mut("Person")
        .unwrap()
        .reverse();

    assert_ne!(get_message_hash(&reordered, signer()).unwrap(), original);
}

#[test]
fn test_changing_primary_type_changes_the_hash() {
    let original = get_message_hash(&mail_fixture(), signer()).unwrap();

    let mut reply = mail_fixture();
    reply.primary_type = "Reply".to_string();

    assert_ne!(get_message_hash(&reply, signer()).unwrap(), original);
}

#[test]
fn test_changing_signer_changes_the_hash() {
    let a = get_message_hash(&mail_fixture(), signer()).unwrap();
    let b = get_message_hash(&mail_fixture(), signer() + Felt::ONE).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_arrays_fold_over_element_encodings() {
    let typed_data = bag_fixture();
    let types = &typed_data.types;
    let message = &typed_data.message;

    let ids = compute_hash_on_elements(&[Felt::from(1u64), Felt::from(2u64), Felt::from(3u64)]);
    let owners = compute_hash_on_elements(&[
        get_struct_hash(types, "Person", &message["owners"][0]).unwrap(),
        get_struct_hash(types, "Person", &message["owners"][1]).unwrap(),
    ]);

    let expected = compute_hash_on_elements(&[
        get_type_hash(types, "Bag").unwrap(),
        ids,
        owners,
        Felt::ONE,
        crate::selector::selector_from_name("transfer"),
    ]);

    assert_eq!(get_struct_hash(types, "Bag", message).unwrap(), expected);
}

#[test]
fn test_array_order_matters() {
    let original = get_message_hash(&bag_fixture(), signer()).unwrap();

    let mut reversed = bag_fixture();
    reversed.message["ids"] = json!([3, "0x2", "1"]);

    assert_ne!(get_message_hash(&reversed, signer()).unwrap(), original);
}

#[test]
fn test_unknown_field_type_is_rejected() {
    let mut typed_data = mail_fixture();
    typed_data
        .types
        .get_mut("Mail")
        .unwrap()
        .push(TypedDataField::new("attachment", "Attachment"));
    typed_data.message["attachment"] = json!({ "size": 1 });

    match get_message_hash(&typed_data, signer()) {
        Err(AccountError::UnknownType(name)) => assert_eq!(name, "Attachment"),
        other => panic!("expected UnknownType, got {:?}", other),
    }
}

#[test]
fn test_unknown_primary_type_is_rejected() {
    let mut typed_data = mail_fixture();
    typed_data.primary_type = "Letter".to_string();

    assert!(matches!(
        get_message_hash(&typed_data, signer()),
        Err(AccountError::UnknownType(_))
    ));
}

#[test]
fn test_missing_domain_type_is_rejected() {
    let mut typed_data = mail_fixture();
    typed_data.types.remove(DOMAIN_TYPE_NAME);

    assert!(matches!(
        get_message_hash(&typed_data, signer()),
        Err(AccountError::UnknownType(_))
    ));
}

#[test]
fn test_unknown_array_element_type_is_rejected_even_when_empty() {
    let mut typed_data = bag_fixture();
    typed_data.types.get_mut("Bag").unwrap()[0] = TypedDataField::new("ids", "u256*");
    typed_data.message["ids"] = json!([]);

    assert!(matches!(
        get_message_hash(&typed_data, signer()),
        Err(AccountError::UnknownType(_))
    ));
}

#[test]
fn test_non_numeric_felt_is_a_type_mismatch() {
    let mut typed_data = mail_fixture();
    typed_data.message["from"]["wallet"] = json!("not a number");

    match get_message_hash(&typed_data, signer()) {
        Err(AccountError::TypeMismatch { field, expected, .. }) => {
            assert_eq!(field, "wallet");
            assert_eq!(expected, "felt");
        }
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_wide_json_number_felt_keeps_every_digit() {
    let mut typed_data = mail_fixture();
    typed_data.message["from"]["wallet"] =
        serde_json::from_str("36893488147419103232").unwrap();
    let from_number = get_message_hash(&typed_data, signer()).unwrap();

    typed_data.message["from"]["wallet"] = json!("0x20000000000000000");
    let from_hex = get_message_hash(&typed_data, signer()).unwrap();

    assert_eq!(from_number, from_hex);
}

#[test]
fn test_fractional_and_negative_felts_are_type_mismatches() {
    for bad in [json!(1.5), json!(-3)] {
        let mut typed_data = mail_fixture();
        typed_data.message["from"]["wallet"] = bad;

        assert!(matches!(
            get_message_hash(&typed_data, signer()),
            Err(AccountError::TypeMismatch { .. })
        ));
    }
}

#[test]
fn test_missing_field_is_a_type_mismatch() {
    let mut typed_data = mail_fixture();
    typed_data.message.as_object_mut().unwrap().remove("contents");

    assert!(matches!(
        get_message_hash(&typed_data, signer()),
        Err(AccountError::TypeMismatch { .. })
    ));
}

#[test]
fn test_struct_value_must_be_an_object() {
    let mut typed_data = mail_fixture();
    typed_data.message["to"] = json!("Bob");

    assert!(matches!(
        get_message_hash(&typed_data, signer()),
        Err(AccountError::TypeMismatch { .. })
    ));
}

#[test]
fn test_overlong_short_string_is_a_type_mismatch() {
    let mut typed_data = mail_fixture();
    typed_data.message["contents"] = json!("this sentence is far too long for one felt");

    assert!(matches!(
        get_message_hash(&typed_data, signer()),
        Err(AccountError::TypeMismatch { .. })
    ));
}

#[test]
fn test_domain_builder_produces_hashable_typed_data() {
    let domain = StarkNetDomain::testnet("Example Dapp", "1");
    let mut types = Types::new();
    types.insert(
        "Greeting".to_string(),
        vec![TypedDataField::new("text", "string")],
    );

    let typed_data = TypedData::new(&domain, types, "Greeting", json!({ "text": "gm" }));

    assert_eq!(typed_data.domain["chainId"], "SN_GOERLI");
    assert!(typed_data.types.contains_key(DOMAIN_TYPE_NAME));
    assert!(get_message_hash(&typed_data, signer()).is_ok());
}

#[test]
fn test_serde_round_trip_keeps_primary_type_name() {
    let typed_data = mail_fixture();
    let json = serde_json::to_value(&typed_data).unwrap();
    assert_eq!(json["primaryType"], "Mail");
    assert_eq!(json["types"]["Person"][1]["type"], "felt");
}
