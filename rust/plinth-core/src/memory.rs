//! Abstract memory sizes used to price builtin calls.
//!
//! Every size is O(1) to compute except strings, which count chars.

use crate::universe::Value;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Size of a value in abstract memory units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExMemory(pub u64);

impl ExMemory {
    pub const ZERO: ExMemory = ExMemory(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Add for ExMemory {
    type Output = ExMemory;

    fn add(self, rhs: ExMemory) -> ExMemory {
        ExMemory(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for ExMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ExMemory {
    fn from(n: u64) -> Self {
        ExMemory(n)
    }
}

pub trait ExMemoryUsage {
    fn memory_usage(&self) -> ExMemory;
}

impl ExMemoryUsage for () {
    fn memory_usage(&self) -> ExMemory {
        ExMemory(1)
    }
}

impl ExMemoryUsage for bool {
    fn memory_usage(&self) -> ExMemory {
        ExMemory(1)
    }
}

impl ExMemoryUsage for char {
    fn memory_usage(&self) -> ExMemory {
        ExMemory(1)
    }
}

/// One unit per started 64-bit word of magnitude; zero still takes a word.
impl ExMemoryUsage for BigInt {
    fn memory_usage(&self) -> ExMemory {
        let bits = self.bits();
        ExMemory(1 + bits.saturating_sub(1) / 64)
    }
}

impl ExMemoryUsage for str {
    fn memory_usage(&self) -> ExMemory {
        ExMemory(self.chars().count() as u64)
    }
}

impl ExMemoryUsage for String {
    fn memory_usage(&self) -> ExMemory {
        self.as_str().memory_usage()
    }
}

impl ExMemoryUsage for [u8] {
    fn memory_usage(&self) -> ExMemory {
        ExMemory(self.len() as u64)
    }
}

impl ExMemoryUsage for Vec<u8> {
    fn memory_usage(&self) -> ExMemory {
        self.as_slice().memory_usage()
    }
}

impl ExMemoryUsage for Value {
    fn memory_usage(&self) -> ExMemory {
        match self {
            Value::Unit => ().memory_usage(),
            Value::Bool(b) => b.memory_usage(),
            Value::Integer(n) => n.memory_usage(),
            Value::Char(c) => c.memory_usage(),
            Value::String(s) => s.memory_usage(),
            Value::ByteString(b) => b.memory_usage(),
        }
    }
}
