//! What a builtin means: its denotation, its signature and its cost.
//!
//! A meaning is built from an ordinary typed Rust function. The
//! [`HostFunction`] and [`DynamicHostFunction`] traits erase the argument
//! types behind a uniform `&[Value]` calling convention, projecting each
//! argument into the universe type the function expects.

use crate::cost::{
    BuiltinCostModel, CostingFun, ExBudget, ModelOneArgument, ModelThreeArguments,
    ModelTwoArguments,
};
use crate::env::DynamicEnv;
use crate::fun::DefaultFun;
use plinth_core::{
    CallError, EvaluationResult, ExMemory, ExMemoryUsage, IntoEvaluation, KnownType, Value,
};
use std::fmt;
use tracing::warn;

type StaticFn = Box<dyn Fn(&[Value]) -> Result<EvaluationResult<Value>, CallError> + Send + Sync>;
type DynamicFn = Box<
    dyn Fn(&mut DynamicEnv, &[Value]) -> Result<EvaluationResult<Value>, CallError> + Send + Sync,
>;

/// Whether a builtin needs a live [`DynamicEnv`] to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinClass {
    /// Pure and environment-independent.
    Static,
    /// Takes the dynamic environment as an extra leading argument.
    Dynamic,
}

enum Denotation {
    Static(StaticFn),
    Dynamic(DynamicFn),
}

// ---------------------------------------------------------------------------
// Costing references
// ---------------------------------------------------------------------------

/// Selects a builtin's costing function out of a [`BuiltinCostModel`].
///
/// The selector returns `None` for a builtin the model has no coefficients
/// for; such a call is priced at [`ExBudget::ZERO`].
#[derive(Clone, Copy)]
pub enum Costing {
    One(fn(&BuiltinCostModel) -> Option<&CostingFun<ModelOneArgument>>),
    Two(fn(&BuiltinCostModel) -> Option<&CostingFun<ModelTwoArguments>>),
    Three(fn(&BuiltinCostModel) -> Option<&CostingFun<ModelThreeArguments>>),
}

impl Costing {
    pub fn arity(&self) -> usize {
        match self {
            Costing::One(_) => 1,
            Costing::Two(_) => 2,
            Costing::Three(_) => 3,
        }
    }

    pub fn is_priced(&self, model: &BuiltinCostModel) -> bool {
        match self {
            Costing::One(select) => select(model).is_some(),
            Costing::Two(select) => select(model).is_some(),
            Costing::Three(select) => select(model).is_some(),
        }
    }

    /// `None` if `sizes` does not match the arity.
    fn run(&self, model: &BuiltinCostModel, sizes: &[ExMemory]) -> Option<Option<ExBudget>> {
        Some(match (self, sizes) {
            (Costing::One(select), &[x]) => select(model).map(|f| f.run(x)),
            (Costing::Two(select), &[x, y]) => select(model).map(|f| f.run(x, y)),
            (Costing::Three(select), &[x, y, z]) => select(model).map(|f| f.run(x, y, z)),
            _ => return None,
        })
    }
}

impl fmt::Debug for Costing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Costing::<{} argument(s)>", self.arity())
    }
}

// ---------------------------------------------------------------------------
// Host functions
// ---------------------------------------------------------------------------

/// A typed Rust function usable as a static denotation.
///
/// Implemented for `Fn(A) -> R`, `Fn(A, B) -> R` and `Fn(A, B, C) -> R`
/// where every parameter is a [`KnownType`] and `R` is [`IntoEvaluation`].
pub trait HostFunction<Args>: Send + Sync + 'static {
    const ARITY: usize;

    fn param_types() -> Vec<&'static str>;

    fn result_type() -> &'static str;

    fn apply(&self, name: &'static str, args: &[Value])
        -> Result<EvaluationResult<Value>, CallError>;
}

/// A typed Rust function taking the [`DynamicEnv`] before its arguments.
pub trait DynamicHostFunction<Args>: Send + Sync + 'static {
    const ARITY: usize;

    fn param_types() -> Vec<&'static str>;

    fn result_type() -> &'static str;

    fn apply(
        &self,
        name: &'static str,
        env: &mut DynamicEnv,
        args: &[Value],
    ) -> Result<EvaluationResult<Value>, CallError>;
}

fn check_arity(name: &'static str, expected: usize, args: &[Value]) -> Result<(), CallError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CallError::ArityMismatch {
            builtin: name,
            expected,
            found: args.len(),
        })
    }
}

fn project<T: KnownType>(name: &'static str, args: &[Value], position: usize) -> Result<T, CallError> {
    let value = &args[position];
    T::project(value).ok_or(CallError::TypeMismatch {
        builtin: name,
        position,
        expected: T::TYPE_NAME,
        found: value.value_type(),
    })
}

macro_rules! host_function_impls {
    ($(($arity:literal; $($ty:ident @ $pos:tt),+)),* $(,)?) => {
        $(
            impl<F, R, $($ty),+> HostFunction<($($ty,)+)> for F
            where
                F: Fn($($ty),+) -> R + Send + Sync + 'static,
                R: IntoEvaluation,
                $($ty: KnownType,)+
            {
                const ARITY: usize = $arity;

                fn param_types() -> Vec<&'static str> {
                    vec![$($ty::TYPE_NAME),+]
                }

                fn result_type() -> &'static str {
                    R::RESULT_TYPE
                }

                fn apply(
                    &self,
                    name: &'static str,
                    args: &[Value],
                ) -> Result<EvaluationResult<Value>, CallError> {
                    check_arity(name, $arity, args)?;
                    Ok(self($(project::<$ty>(name, args, $pos)?),+).into_evaluation())
                }
            }

            impl<F, R, $($ty),+> DynamicHostFunction<($($ty,)+)> for F
            where
                F: Fn(&mut DynamicEnv, $($ty),+) -> R + Send + Sync + 'static,
                R: IntoEvaluation,
                $($ty: KnownType,)+
            {
                const ARITY: usize = $arity;

                fn param_types() -> Vec<&'static str> {
                    vec![$($ty::TYPE_NAME),+]
                }

                fn result_type() -> &'static str {
                    R::RESULT_TYPE
                }

                fn apply(
                    &self,
                    name: &'static str,
                    env: &mut DynamicEnv,
                    args: &[Value],
                ) -> Result<EvaluationResult<Value>, CallError> {
                    check_arity(name, $arity, args)?;
                    Ok(self(env, $(project::<$ty>(name, args, $pos)?),+).into_evaluation())
                }
            }
        )*
    };
}

host_function_impls! {
    (1; A @ 0),
    (2; A @ 0, B @ 1),
    (3; A @ 0, B @ 1, C @ 2),
}

// ---------------------------------------------------------------------------
// BuiltinMeaning
// ---------------------------------------------------------------------------

pub struct BuiltinMeaning {
    fun: DefaultFun,
    params: Vec<&'static str>,
    result: &'static str,
    denotation: Denotation,
    costing: Costing,
}

/// A [`BuiltinClass::Static`] meaning from a pure host function.
pub fn to_static_builtin_meaning<Args, F>(fun: DefaultFun, f: F, costing: Costing) -> BuiltinMeaning
where
    F: HostFunction<Args>,
{
    debug_assert_eq!(<F as HostFunction<Args>>::ARITY, costing.arity(), "{}", fun);
    let name = fun.display_name();
    BuiltinMeaning {
        fun,
        params: <F as HostFunction<Args>>::param_types(),
        result: <F as HostFunction<Args>>::result_type(),
        denotation: Denotation::Static(Box::new(move |args: &[Value]| f.apply(name, args))),
        costing,
    }
}

/// A [`BuiltinClass::Dynamic`] meaning from a host function that receives
/// the environment explicitly.
pub fn to_dynamic_builtin_meaning<Args, F>(
    fun: DefaultFun,
    f: F,
    costing: Costing,
) -> BuiltinMeaning
where
    F: DynamicHostFunction<Args>,
{
    debug_assert_eq!(<F as DynamicHostFunction<Args>>::ARITY, costing.arity(), "{}", fun);
    let name = fun.display_name();
    BuiltinMeaning {
        fun,
        params: <F as DynamicHostFunction<Args>>::param_types(),
        result: <F as DynamicHostFunction<Args>>::result_type(),
        denotation: Denotation::Dynamic(Box::new(
            move |env: &mut DynamicEnv, args: &[Value]| f.apply(name, env, args),
        )),
        costing,
    }
}

impl BuiltinMeaning {
    pub fn fun(&self) -> DefaultFun {
        self.fun
    }

    pub fn name(&self) -> &'static str {
        self.fun.display_name()
    }

    pub fn class(&self) -> BuiltinClass {
        match self.denotation {
            Denotation::Static(_) => BuiltinClass::Static,
            Denotation::Dynamic(_) => BuiltinClass::Dynamic,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn param_types(&self) -> &[&'static str] {
        &self.params
    }

    pub fn result_type(&self) -> &'static str {
        self.result
    }

    /// e.g. `integer -> integer -> integer`.
    pub fn signature(&self) -> String {
        let mut parts = self.params.clone();
        parts.push(self.result);
        parts.join(" -> ")
    }

    pub fn costing(&self) -> Costing {
        self.costing
    }

    /// Apply a static builtin.
    pub fn invoke(&self, args: &[Value]) -> Result<EvaluationResult<Value>, CallError> {
        match &self.denotation {
            Denotation::Static(f) => f(args),
            Denotation::Dynamic(_) => Err(CallError::MissingEnvironment {
                builtin: self.name(),
            }),
        }
    }

    /// Apply any builtin; static builtins ignore `env`.
    pub fn invoke_with_env(
        &self,
        env: &mut DynamicEnv,
        args: &[Value],
    ) -> Result<EvaluationResult<Value>, CallError> {
        match &self.denotation {
            Denotation::Static(f) => f(args),
            Denotation::Dynamic(f) => f(env, args),
        }
    }

    /// Price a call from argument sizes. The denotation is never touched.
    pub fn cost(&self, model: &BuiltinCostModel, sizes: &[ExMemory]) -> Result<ExBudget, CallError> {
        let priced = self
            .costing
            .run(model, sizes)
            .ok_or(CallError::ArityMismatch {
                builtin: self.name(),
                expected: self.costing.arity(),
                found: sizes.len(),
            })?;
        Ok(priced.unwrap_or_else(|| {
            warn!(builtin = self.name(), "no calibrated cost, charging zero");
            ExBudget::ZERO
        }))
    }

    /// [`BuiltinMeaning::cost`] applied to the sizes of `args`.
    pub fn cost_of_args(
        &self,
        model: &BuiltinCostModel,
        args: &[Value],
    ) -> Result<ExBudget, CallError> {
        let sizes: Vec<ExMemory> = args.iter().map(ExMemoryUsage::memory_usage).collect();
        self.cost(model, &sizes)
    }
}

impl fmt::Debug for BuiltinMeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinMeaning")
            .field("name", &self.name())
            .field("signature", &self.signature())
            .field("class", &self.class())
            .field("costing", &self.costing)
            .finish()
    }
}
