//! Pedersen chain hash over a sequence of field elements

use starknet_crypto::{pedersen_hash, Felt};

/// Fold `elements` through the Pedersen hash, starting from zero and folding
/// in the element count last:
///
/// `h(h(...h(h(0, x1), x2)..., xn), n)`
///
/// The fold is not commutative; element order and the trailing length are
/// part of the value the network checks.
pub fn compute_hash_on_elements(elements: &[Felt]) -> Felt {
    let mut acc = Felt::ZERO;
    for element in elements {
        acc = pedersen_hash(&acc, element);
    }
    pedersen_hash(&acc, &Felt::from(elements.len() as u64))
}
