//! The closed enumeration of builtin functions.
//!
//! Declaration order is *not* the wire order. The numeric codes live in
//! [`crate::codec`] and must never be derived from this enum.

use crate::error::DecodeError;
use plinth_core::{ExMemory, ExMemoryUsage};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount)]
pub enum DefaultFun {
    // Integers
    AddInteger,
    SubtractInteger,
    MultiplyInteger,
    DivideInteger,
    QuotientInteger,
    RemainderInteger,
    ModInteger,
    LessThanInteger,
    LessThanEqInteger,
    GreaterThanInteger,
    GreaterThanEqInteger,
    EqInteger,
    // Bytestrings
    Concatenate,
    TakeByteString,
    DropByteString,
    Sha2_256,
    Sha3_256,
    VerifySignature,
    EqByteString,
    LtByteString,
    GtByteString,
    // Polymorphic
    IfThenElse,
    // Strings
    CharToString,
    Append,
    Trace,
}

impl DefaultFun {
    /// Source-level name, used in diagnostics and program text.
    pub fn display_name(self) -> &'static str {
        use DefaultFun::*;
        match self {
            AddInteger => "addInteger",
            SubtractInteger => "subtractInteger",
            MultiplyInteger => "multiplyInteger",
            DivideInteger => "divideInteger",
            QuotientInteger => "quotientInteger",
            RemainderInteger => "remainderInteger",
            ModInteger => "modInteger",
            LessThanInteger => "lessThanInteger",
            LessThanEqInteger => "lessThanEqualsInteger",
            GreaterThanInteger => "greaterThanInteger",
            GreaterThanEqInteger => "greaterThanEqualsInteger",
            EqInteger => "equalsInteger",
            Concatenate => "concatenate",
            TakeByteString => "takeByteString",
            DropByteString => "dropByteString",
            Sha2_256 => "sha2_256",
            Sha3_256 => "sha3_256",
            VerifySignature => "verifySignature",
            EqByteString => "equalsByteString",
            LtByteString => "lessThanByteString",
            GtByteString => "greaterThanByteString",
            IfThenElse => "ifThenElse",
            CharToString => "charToString",
            Append => "append",
            Trace => "trace",
        }
    }
}

impl fmt::Display for DefaultFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DefaultFun {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefaultFun::iter()
            .find(|fun| fun.display_name() == s)
            .ok_or_else(|| DecodeError::UnknownName(s.to_string()))
    }
}

/// A tag costs the same regardless of which builtin it names.
impl ExMemoryUsage for DefaultFun {
    fn memory_usage(&self) -> ExMemory {
        ExMemory(1)
    }
}
