//! Stable numeric codes for builtins.
//!
//! Serialized programs embed these codes, so the table is append-only: a code
//! once assigned names the same builtin forever, and a new builtin takes the
//! next unused code. The assignment follows the order builtins were added to
//! the language, not the declaration order of [`DefaultFun`].

use crate::error::DecodeError;
use crate::fun::DefaultFun;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// The permanent code of `fun`.
pub const fn encode_tag(fun: DefaultFun) -> u64 {
    use DefaultFun::*;
    match fun {
        AddInteger => 0,
        SubtractInteger => 1,
        MultiplyInteger => 2,
        DivideInteger => 3,
        RemainderInteger => 4,
        LessThanInteger => 5,
        LessThanEqInteger => 6,
        GreaterThanInteger => 7,
        GreaterThanEqInteger => 8,
        EqInteger => 9,
        Concatenate => 10,
        TakeByteString => 11,
        DropByteString => 12,
        Sha2_256 => 13,
        Sha3_256 => 14,
        VerifySignature => 15,
        EqByteString => 16,
        QuotientInteger => 17,
        ModInteger => 18,
        LtByteString => 19,
        GtByteString => 20,
        IfThenElse => 21,
        CharToString => 22,
        Append => 23,
        Trace => 24,
    }
}

/// The builtin with permanent code `code`.
pub fn decode_tag(code: u64) -> Result<DefaultFun, DecodeError> {
    use DefaultFun::*;
    let fun = match code {
        0 => AddInteger,
        1 => SubtractInteger,
        2 => MultiplyInteger,
        3 => DivideInteger,
        4 => RemainderInteger,
        5 => LessThanInteger,
        6 => LessThanEqInteger,
        7 => GreaterThanInteger,
        8 => GreaterThanEqInteger,
        9 => EqInteger,
        10 => Concatenate,
        11 => TakeByteString,
        12 => DropByteString,
        13 => Sha2_256,
        14 => Sha3_256,
        15 => VerifySignature,
        16 => EqByteString,
        17 => QuotientInteger,
        18 => ModInteger,
        19 => LtByteString,
        20 => GtByteString,
        21 => IfThenElse,
        22 => CharToString,
        23 => Append,
        24 => Trace,
        _ => {
            debug!(code, "rejecting unrecognized builtin code");
            return Err(DecodeError::UnknownTag(code));
        }
    };
    Ok(fun)
}

// ---------------------------------------------------------------------------
// Byte-level encoding (unsigned LEB128)
// ---------------------------------------------------------------------------

/// Append the code of `fun` to `out` as an unsigned LEB128 varint.
pub fn write_tag(out: &mut Vec<u8>, fun: DefaultFun) {
    let mut v = encode_tag(fun);
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Read a builtin code at `*offset`, advancing `offset` past it.
///
/// Only the canonical (shortest) encoding is accepted, so overlong and
/// overflowing varints are both rejected. On error `offset` is left where it
/// was.
pub fn read_tag(bytes: &[u8], offset: &mut usize) -> Result<DefaultFun, DecodeError> {
    let mut pos = *offset;
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *bytes.get(pos).ok_or(DecodeError::UnexpectedEof)?;
        pos += 1;
        let payload = u64::from(byte & 0x7f);
        if (shift == 63 && payload > 1) || shift > 63 {
            return Err(DecodeError::InvalidVarint);
        }
        value |= payload << shift;
        if byte & 0x80 == 0 {
            // A zero final group after the first byte is padding; `write_tag` never emits it.
            if byte == 0 && shift > 0 {
                return Err(DecodeError::InvalidVarint);
            }
            break;
        }
        shift += 7;
    }
    let fun = decode_tag(value)?;
    *offset = pos;
    Ok(fun)
}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

impl Serialize for DefaultFun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(encode_tag(*self))
    }
}

impl<'de> Deserialize<'de> for DefaultFun {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u64::deserialize(deserializer)?;
        decode_tag(code).map_err(D::Error::custom)
    }
}
