//! Deterministic, payload-free failure for partial builtins.

use crate::universe::{KnownType, Value};
use num_bigint::BigInt;
use num_traits::Zero;

/// Outcome of applying a builtin.
///
/// `Failure` deliberately carries nothing: every engine must fail the same
/// way on the same input, so there is no message to disagree about. The
/// evaluator aborts the current reduction on `Failure`; it is not retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum EvaluationResult<T> {
    Success(T),
    Failure,
}

impl<T> EvaluationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, EvaluationResult::Failure)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EvaluationResult<U> {
        match self {
            EvaluationResult::Success(x) => EvaluationResult::Success(f(x)),
            EvaluationResult::Failure => EvaluationResult::Failure,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> EvaluationResult<U>) -> EvaluationResult<U> {
        match self {
            EvaluationResult::Success(x) => f(x),
            EvaluationResult::Failure => EvaluationResult::Failure,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            EvaluationResult::Success(x) => Some(x),
            EvaluationResult::Failure => None,
        }
    }
}

impl<T> From<Option<T>> for EvaluationResult<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(x) => EvaluationResult::Success(x),
            None => EvaluationResult::Failure,
        }
    }
}

/// Lift `op` so that it fails whenever `forbidden` holds for its second
/// argument, instead of letting the host operation panic.
pub fn guard_second_arg<A, B, P, F>(forbidden: P, op: F) -> impl Fn(A, B) -> EvaluationResult<A>
where
    P: Fn(&B) -> bool,
    F: Fn(A, B) -> A,
{
    move |a, b| {
        if forbidden(&b) {
            EvaluationResult::Failure
        } else {
            EvaluationResult::Success(op(a, b))
        }
    }
}

/// [`guard_second_arg`] specialised to a zero divisor.
pub fn non_zero_arg<F>(op: F) -> impl Fn(BigInt, BigInt) -> EvaluationResult<BigInt>
where
    F: Fn(BigInt, BigInt) -> BigInt,
{
    guard_second_arg(BigInt::is_zero, op)
}

// ---------------------------------------------------------------------------
// IntoEvaluation
// ---------------------------------------------------------------------------

/// Anything a builtin's host function may return: a plain universe value
/// (always a success) or an [`EvaluationResult`] over one.
pub trait IntoEvaluation {
    const RESULT_TYPE: &'static str;

    fn into_evaluation(self) -> EvaluationResult<Value>;
}

macro_rules! total_result {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoEvaluation for $ty {
                const RESULT_TYPE: &'static str = <$ty as KnownType>::TYPE_NAME;

                fn into_evaluation(self) -> EvaluationResult<Value> {
                    EvaluationResult::Success(self.inject())
                }
            }
        )*
    };
}

total_result!((), bool, BigInt, char, String, Vec<u8>, Value);

impl<T: KnownType> IntoEvaluation for EvaluationResult<T> {
    const RESULT_TYPE: &'static str = T::TYPE_NAME;

    fn into_evaluation(self) -> EvaluationResult<Value> {
        self.map(KnownType::inject)
    }
}
