//! Host implementations behind the builtins that are more than one operator.

use crate::env::DynamicEnv;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// Clamp a requested prefix length into `0..=len`.
fn clamp_len(n: &BigInt, len: usize) -> usize {
    if n.is_negative() {
        0
    } else {
        n.to_usize().map_or(len, |n| n.min(len))
    }
}

pub fn take_byte_string(n: BigInt, mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.truncate(clamp_len(&n, bytes.len()));
    bytes
}

pub fn drop_byte_string(n: BigInt, mut bytes: Vec<u8>) -> Vec<u8> {
    let k = clamp_len(&n, bytes.len());
    bytes.split_off(k)
}

pub fn concatenate(mut left: Vec<u8>, right: Vec<u8>) -> Vec<u8> {
    left.extend_from_slice(&right);
    left
}

pub fn sha2_256(bytes: Vec<u8>) -> Vec<u8> {
    Sha256::digest(&bytes).to_vec()
}

pub fn sha3_256(bytes: Vec<u8>) -> Vec<u8> {
    Sha3_256::digest(&bytes).to_vec()
}

/// Ed25519 verification. Keys or signatures of the wrong length, and keys
/// that are not valid curve points, verify as `false`.
pub fn verify_signature(public_key: Vec<u8>, message: Vec<u8>, signature: Vec<u8>) -> bool {
    let Ok(key_bytes) = <[u8; 32]>::try_from(public_key.as_slice()) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature.as_slice()) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };
    key.verify(&message, &Signature::from_bytes(&sig_bytes)).is_ok()
}

/// Generic over the branch payload: the selection never looks inside it.
pub fn if_then_else<T>(condition: bool, then_branch: T, else_branch: T) -> T {
    if condition {
        then_branch
    } else {
        else_branch
    }
}

pub fn char_to_string(c: char) -> String {
    c.to_string()
}

pub fn append(mut left: String, right: String) -> String {
    left.push_str(&right);
    left
}

/// Emit `message` to every sink in `env`, then hand it back unchanged.
pub fn trace(env: &mut DynamicEnv, message: String) -> String {
    env.emit(&message);
    message
}
