//! Fixed-purpose calldata assembly for the Monad-side bridge call.
//!
//! The Monad bridge contract has no published ABI binding, so the call is
//! assembled by hand: a 4-byte selector followed by one 32-byte slot per
//! argument, each zero-left-padded big-endian. This encoder supports exactly
//! the ordered tuple shapes the bridge tools need (`uint256`, `uint16`,
//! `address`); a new call shape means adding a type tag here, not growing a
//! general ABI encoder.

use ethers::types::{Address, Bytes, U256};
use thiserror::Error;

/// The argument types the encoder knows how to pack into a 32-byte slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Uint256,
    Uint16,
    Address,
}

/// A value to be packed under a [`TypeTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256),
    Address(Address),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("argument {index} cannot be encoded as {tag:?}")]
    UnsupportedType { index: usize, tag: TypeTag },
    #[error("argument {index} exceeds the width of a {tag:?} slot")]
    ValueOutOfRange { index: usize, tag: TypeTag },
}

/// Encodes `selector` plus `args` into `4 + 32 * args.len()` bytes.
///
/// Arguments are packed in the given order with no separators. Each uint is
/// big-endian, zero-left-padded; addresses occupy the low 20 bytes of their
/// slot.
pub fn encode_call(selector: [u8; 4], args: &[(TypeTag, AbiValue)]) -> Result<Bytes, EncodeError> {
    let mut out = Vec::with_capacity(4 + 32 * args.len());
    out.extend_from_slice(&selector);

    for (index, (tag, value)) in args.iter().enumerate() {
        let mut slot = [0u8; 32];
        match (tag, value) {
            (TypeTag::Uint256, AbiValue::Uint(v)) => {
                v.to_big_endian(&mut slot);
            }
            (TypeTag::Uint16, AbiValue::Uint(v)) => {
                if *v > U256::from(u16::MAX) {
                    return Err(EncodeError::ValueOutOfRange { index, tag: *tag });
                }
                v.to_big_endian(&mut slot);
            }
            (TypeTag::Address, AbiValue::Address(a)) => {
                slot[12..].copy_from_slice(a.as_bytes());
            }
            _ => return Err(EncodeError::UnsupportedType { index, tag: *tag }),
        }
        out.extend_from_slice(&slot);
    }

    Ok(out.into())
}

/// Zero-left-pads a 20-byte address into a raw 32-byte slot. Used for the
/// `bytes32 recipient` argument of the Sepolia bridge contract.
pub fn address_to_bytes32(address: Address) -> [u8; 32] {
    let mut slot = [0u8; 32];
    slot[12..].copy_from_slice(address.as_bytes());
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn slot(bytes: &Bytes, i: usize) -> &[u8] {
        &bytes[4 + 32 * i..4 + 32 * (i + 1)]
    }

    #[test]
    fn encodes_the_bridge_tuple_into_132_bytes() {
        let selector = [0xe5, 0xd4, 0x86, 0xa5];
        let recipient = Address::from_str("0x00000000219ab540356cbb839cbe05303d7705fa").unwrap();
        let encoded = encode_call(
            selector,
            &[
                (TypeTag::Uint256, AbiValue::Uint(U256::from(5u64))),
                (TypeTag::Uint16, AbiValue::Uint(U256::from(10_002u64))),
                (TypeTag::Uint256, AbiValue::Uint(U256::from(6_000_000u64))),
                (TypeTag::Address, AbiValue::Address(recipient)),
            ],
        )
        .unwrap();

        assert_eq!(encoded.len(), 4 + 32 * 4);
        assert_eq!(&encoded[..4], selector);

        let mut expected = [0u8; 32];
        U256::from(5u64).to_big_endian(&mut expected);
        assert_eq!(slot(&encoded, 0), expected);

        U256::from(10_002u64).to_big_endian(&mut expected);
        assert_eq!(slot(&encoded, 1), expected);

        U256::from(6_000_000u64).to_big_endian(&mut expected);
        assert_eq!(slot(&encoded, 2), expected);

        assert_eq!(slot(&encoded, 3), address_to_bytes32(recipient));
    }

    #[test]
    fn rejects_uint16_overflow() {
        let err = encode_call(
            [0; 4],
            &[(TypeTag::Uint16, AbiValue::Uint(U256::from(70_000u64)))],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EncodeError::ValueOutOfRange {
                index: 0,
                tag: TypeTag::Uint16
            }
        );
    }

    #[test]
    fn rejects_mismatched_tag_and_value() {
        let err = encode_call([0; 4], &[(TypeTag::Address, AbiValue::Uint(U256::one()))])
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnsupportedType {
                index: 0,
                tag: TypeTag::Address
            }
        );
    }

    #[test]
    fn empty_argument_list_is_just_the_selector() {
        let encoded = encode_call([1, 2, 3, 4], &[]).unwrap();
        assert_eq!(encoded.as_ref(), [1, 2, 3, 4]);
    }
}
