//! The meaning of every [`DefaultFun`].

use crate::fun::DefaultFun;
use crate::meaning::{to_dynamic_builtin_meaning, to_static_builtin_meaning, BuiltinMeaning, Costing};
use crate::ops;
use num_bigint::BigInt;
use num_integer::Integer;
use once_cell::sync::Lazy;
use plinth_core::{non_zero_arg, Value};
use strum::IntoEnumIterator;

static REGISTRY: Lazy<BuiltinRegistry> = Lazy::new(BuiltinRegistry::new);

/// One [`BuiltinMeaning`] per builtin, indexed by declaration position.
///
/// Immutable once built, so the global instance is shared freely across
/// threads.
#[derive(Debug)]
pub struct BuiltinRegistry {
    meanings: Vec<BuiltinMeaning>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            meanings: DefaultFun::iter().map(to_builtin_meaning).collect(),
        }
    }

    pub fn global() -> &'static BuiltinRegistry {
        &REGISTRY
    }

    pub fn lookup(&self, fun: DefaultFun) -> &BuiltinMeaning {
        &self.meanings[fun as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinMeaning> {
        self.meanings.iter()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the meaning of `fun`.
pub fn to_builtin_meaning(fun: DefaultFun) -> BuiltinMeaning {
    use DefaultFun::*;
    match fun {
        AddInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x + y,
            Costing::Two(|m| Some(&m.add_integer)),
        ),
        SubtractInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x - y,
            Costing::Two(|m| Some(&m.subtract_integer)),
        ),
        MultiplyInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x * y,
            Costing::Two(|m| Some(&m.multiply_integer)),
        ),
        DivideInteger => to_static_builtin_meaning(
            fun,
            non_zero_arg(|x: BigInt, y: BigInt| x.div_floor(&y)),
            Costing::Two(|m| Some(&m.divide_integer)),
        ),
        QuotientInteger => to_static_builtin_meaning(
            fun,
            non_zero_arg(|x: BigInt, y: BigInt| x / y),
            Costing::Two(|m| Some(&m.quotient_integer)),
        ),
        RemainderInteger => to_static_builtin_meaning(
            fun,
            non_zero_arg(|x: BigInt, y: BigInt| x % y),
            Costing::Two(|m| Some(&m.remainder_integer)),
        ),
        ModInteger => to_static_builtin_meaning(
            fun,
            non_zero_arg(|x: BigInt, y: BigInt| x.mod_floor(&y)),
            Costing::Two(|m| Some(&m.mod_integer)),
        ),
        LessThanInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x < y,
            Costing::Two(|m| Some(&m.less_than_integer)),
        ),
        LessThanEqInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x <= y,
            Costing::Two(|m| Some(&m.less_than_equals_integer)),
        ),
        GreaterThanInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x > y,
            Costing::Two(|m| Some(&m.greater_than_integer)),
        ),
        GreaterThanEqInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x >= y,
            Costing::Two(|m| Some(&m.greater_than_equals_integer)),
        ),
        EqInteger => to_static_builtin_meaning(
            fun,
            |x: BigInt, y: BigInt| x == y,
            Costing::Two(|m| Some(&m.equals_integer)),
        ),
        Concatenate => to_static_builtin_meaning(
            fun,
            ops::concatenate,
            Costing::Two(|m| Some(&m.concatenate)),
        ),
        TakeByteString => to_static_builtin_meaning(
            fun,
            ops::take_byte_string,
            Costing::Two(|m| Some(&m.take_byte_string)),
        ),
        DropByteString => to_static_builtin_meaning(
            fun,
            ops::drop_byte_string,
            Costing::Two(|m| Some(&m.drop_byte_string)),
        ),
        Sha2_256 => to_static_builtin_meaning(
            fun,
            ops::sha2_256,
            Costing::One(|m| Some(&m.sha2_256)),
        ),
        Sha3_256 => to_static_builtin_meaning(
            fun,
            ops::sha3_256,
            Costing::One(|m| Some(&m.sha3_256)),
        ),
        VerifySignature => to_static_builtin_meaning(
            fun,
            ops::verify_signature,
            Costing::Three(|m| Some(&m.verify_signature)),
        ),
        EqByteString => to_static_builtin_meaning(
            fun,
            |x: Vec<u8>, y: Vec<u8>| x == y,
            Costing::Two(|m| Some(&m.equals_byte_string)),
        ),
        LtByteString => to_static_builtin_meaning(
            fun,
            |x: Vec<u8>, y: Vec<u8>| x < y,
            Costing::Two(|m| Some(&m.less_than_byte_string)),
        ),
        GtByteString => to_static_builtin_meaning(
            fun,
            |x: Vec<u8>, y: Vec<u8>| x > y,
            Costing::Two(|m| Some(&m.greater_than_byte_string)),
        ),
        IfThenElse => to_static_builtin_meaning(
            fun,
            ops::if_then_else::<Value>,
            Costing::Three(|m| Some(&m.if_then_else)),
        ),
        CharToString => to_static_builtin_meaning(
            fun,
            ops::char_to_string,
            Costing::One(|m| m.char_to_string.as_ref()),
        ),
        Append => to_static_builtin_meaning(
            fun,
            ops::append,
            Costing::Two(|m| m.append.as_ref()),
        ),
        Trace => to_dynamic_builtin_meaning(
            fun,
            ops::trace,
            Costing::One(|m| Some(&m.trace)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meaning::BuiltinClass;

    #[test]
    fn test_registry_is_total_and_ordered() {
        let registry = BuiltinRegistry::new();
        for fun in DefaultFun::iter() {
            assert_eq!(registry.lookup(fun).fun(), fun);
        }
    }

    #[test]
    fn test_only_trace_is_dynamic() {
        let dynamic: Vec<_> = BuiltinRegistry::global()
            .iter()
            .filter(|m| m.class() == BuiltinClass::Dynamic)
            .map(BuiltinMeaning::fun)
            .collect();
        assert_eq!(dynamic, vec![DefaultFun::Trace]);
    }

    #[test]
    fn test_costing_arity_matches_denotation() {
        for meaning in BuiltinRegistry::global().iter() {
            assert_eq!(meaning.arity(), meaning.costing().arity(), "{}", meaning.name());
        }
    }

    #[test]
    fn test_signatures() {
        let registry = BuiltinRegistry::global();
        let sig = |fun| registry.lookup(fun).signature();
        assert_eq!(sig(DefaultFun::DivideInteger), "integer -> integer -> integer");
        assert_eq!(sig(DefaultFun::LessThanInteger), "integer -> integer -> bool");
        assert_eq!(
            sig(DefaultFun::VerifySignature),
            "bytestring -> bytestring -> bytestring -> bool"
        );
        assert_eq!(sig(DefaultFun::IfThenElse), "bool -> a -> a -> a");
        assert_eq!(sig(DefaultFun::TakeByteString), "integer -> bytestring -> bytestring");
        assert_eq!(sig(DefaultFun::Trace), "string -> string");
        assert_eq!(sig(DefaultFun::CharToString), "char -> string");
    }
}
