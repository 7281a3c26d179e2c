//! Evaluatable program tree.
//!
//! The parser hands the evaluator a [`Program`]: a list of statements, each
//! an [`Expr`]. Function positions hold a [`FunctionExpr`] that is resolved
//! through the session registry when the statement runs.

use std::rc::Rc;

use tracing::debug;

use crate::session::{Context, Registry};
use crate::vm::assign::{execute, execute_selective, Assignment, Indexes, Selection};
use crate::vm::error::{AplError, AplResult};
use crate::vm::function::FunctionRef;
use crate::vm::value::{AxisValue, Value};

/// A primitive symbol or an operator applied to operand functions.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionExpr {
    Primitive(String),
    Derived {
        operator: String,
        left: Box<FunctionExpr>,
        right: Option<Box<FunctionExpr>>,
    },
}

impl FunctionExpr {
    pub fn primitive(symbol: &str) -> Self {
        FunctionExpr::Primitive(symbol.to_string())
    }

    /// `f op` with a single operand.
    pub fn derived(operator: &str, left: FunctionExpr) -> Self {
        FunctionExpr::Derived {
            operator: operator.to_string(),
            left: Box::new(left),
            right: None,
        }
    }

    pub fn resolve(&self, registry: &Registry) -> AplResult<FunctionRef> {
        match self {
            FunctionExpr::Primitive(symbol) => Ok(Rc::new(registry.primitive(symbol)?)),
            FunctionExpr::Derived {
                operator,
                left,
                right,
            } => {
                let op = registry.operator(operator)?;
                let left = left.resolve(registry)?;
                let right = right
                    .as_ref()
                    .map(|f| f.resolve(registry))
                    .transpose()?;
                op.derive(left, right)
            }
        }
    }
}

/// Left-hand side of an assignment statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `a←R`
    Name(String),
    /// `a[I]←R`
    Indexed { name: String, indexes: Box<Expr> },
    /// `(a b c)←R`
    Names(Vec<String>),
    /// `(L f[axis] a)←R` with a selective primitive `f`
    Selective {
        name: String,
        symbol: String,
        left: Option<Box<Expr>>,
        axis: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Variable(String),
    Monadic {
        func: FunctionExpr,
        right: Box<Expr>,
    },
    Dyadic {
        func: FunctionExpr,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `R[axis]` as passed to an axis-taking primitive
    WithAxis {
        value: Box<Expr>,
        axis: Box<Expr>,
    },
    /// Plain or modified (`a f←R`) assignment
    Assign {
        target: AssignTarget,
        modifier: Option<FunctionExpr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate right to left: the right argument before the left one.
    pub fn eval(&self, ctx: &mut Context) -> AplResult<Value> {
        match self {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Variable(name) => ctx
                .lookup(name)
                .cloned()
                .ok_or_else(|| AplError::UndefinedVariable(name.clone())),
            Expr::Monadic { func, right } => {
                let r = right.eval(ctx)?;
                let f = func.resolve(ctx.registry())?;
                f.call(ctx, None, &r)
            }
            Expr::Dyadic { func, left, right } => {
                let r = right.eval(ctx)?;
                let l = left.eval(ctx)?;
                let f = func.resolve(ctx.registry())?;
                f.call(ctx, Some(&l), &r)
            }
            Expr::WithAxis { value, axis } => {
                let axis = axis.eval(ctx)?;
                let value = value.eval(ctx)?;
                Ok(Value::Axis(AxisValue::new(value, axis)))
            }
            Expr::Assign {
                target,
                modifier,
                right,
            } => {
                let r = right.eval(ctx)?;
                let modifier = modifier
                    .as_ref()
                    .map(|f| f.resolve(ctx.registry()))
                    .transpose()?;
                let assignment = match target {
                    AssignTarget::Name(name) => Assignment::name(name),
                    AssignTarget::Indexed { name, indexes } => {
                        let idx = indexes.eval(ctx)?;
                        Assignment::indexed(name, Indexes::Value(idx))
                    }
                    AssignTarget::Names(names) => {
                        let names: Vec<&str> = names.iter().map(String::as_str).collect();
                        Assignment::names(&names)
                    }
                    AssignTarget::Selective {
                        name,
                        symbol,
                        left,
                        axis,
                    } => {
                        let mut selection = Selection::new(ctx.registry().primitive(symbol)?);
                        if let Some(axis) = axis {
                            selection = selection.with_axis(axis.eval(ctx)?);
                        }
                        if let Some(left) = left {
                            selection = selection.with_left(left.eval(ctx)?);
                        }
                        return execute_selective(ctx, name, &selection, modifier, r);
                    }
                };
                let assignment = match modifier {
                    Some(f) => assignment.with_modifier(f),
                    None => assignment,
                };
                execute(ctx, &assignment, r)
            }
        }
    }
}

/// Statements evaluated in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Expr>,
}

impl Program {
    pub fn new(statements: Vec<Expr>) -> Self {
        Self { statements }
    }

    /// Run every statement and return the value of the last one, or `None`
    /// for an empty program. Evaluation stops at the first error.
    pub fn eval(&self, ctx: &mut Context) -> AplResult<Option<Value>> {
        let mut last = None;
        for (i, stmt) in self.statements.iter().enumerate() {
            let value = stmt.eval(ctx)?;
            if ctx.debug() {
                debug!(statement = i, result = value.type_name(), "evaluated");
            }
            last = Some(value);
        }
        Ok(last)
    }
}
