//! The closed universe of values a builtin can consume or produce.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// The primitive types of the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Unit,
    Bool,
    Integer,
    Char,
    String,
    ByteString,
}

/// A value of one of the universe's primitive types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Unit,
    Bool(bool),
    Integer(BigInt),
    Char(char),
    String(String),
    ByteString(Vec<u8>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Unit => ValueType::Unit,
            Value::Bool(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Integer,
            Value::Char(_) => ValueType::Char,
            Value::String(_) => ValueType::String,
            Value::ByteString(_) => ValueType::ByteString,
        }
    }

    pub fn integer(n: impl Into<BigInt>) -> Self {
        Value::Integer(n.into())
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::ByteString(b.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Literal syntax: `()`, `true`, `42`, `'c'`, `"text"`, `#cafe`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::String(s) => write!(f, "{:?}", s),
            Value::ByteString(bytes) => {
                write!(f, "#")?;
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::ByteString(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

// ---------------------------------------------------------------------------
// KnownType
// ---------------------------------------------------------------------------

/// A host type with a fixed place in the universe.
///
/// `project` views a [`Value`] as `Self` and returns `None` on a type
/// mismatch; `inject` goes the other way and never fails. [`Value`] itself is
/// the carrier for type-agnostic builtins and projects every value.
pub trait KnownType: Sized {
    /// Name used when rendering builtin signatures.
    const TYPE_NAME: &'static str;

    fn inject(self) -> Value;

    fn project(value: &Value) -> Option<Self>;
}

impl KnownType for () {
    const TYPE_NAME: &'static str = "unit";

    fn inject(self) -> Value {
        Value::Unit
    }

    fn project(value: &Value) -> Option<Self> {
        matches!(value, Value::Unit).then_some(())
    }
}

impl KnownType for bool {
    const TYPE_NAME: &'static str = "bool";

    fn inject(self) -> Value {
        Value::Bool(self)
    }

    fn project(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl KnownType for BigInt {
    const TYPE_NAME: &'static str = "integer";

    fn inject(self) -> Value {
        Value::Integer(self)
    }

    fn project(value: &Value) -> Option<Self> {
        value.as_integer().cloned()
    }
}

impl KnownType for char {
    const TYPE_NAME: &'static str = "char";

    fn inject(self) -> Value {
        Value::Char(self)
    }

    fn project(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl KnownType for String {
    const TYPE_NAME: &'static str = "string";

    fn inject(self) -> Value {
        Value::String(self)
    }

    fn project(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl KnownType for Vec<u8> {
    const TYPE_NAME: &'static str = "bytestring";

    fn inject(self) -> Value {
        Value::ByteString(self)
    }

    fn project(value: &Value) -> Option<Self> {
        value.as_bytes().map(<[u8]>::to_vec)
    }
}

impl KnownType for Value {
    const TYPE_NAME: &'static str = "a";

    fn inject(self) -> Value {
        self
    }

    fn project(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
