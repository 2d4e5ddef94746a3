//! AST node types produced by the parser.
//!
//! [`Value`] is the single recursive type every tree is built from.  Nodes own
//! their children outright (`Box`/`Vec`), so a parse result is a plain tree
//! with no sharing.

use log::debug;
use serde::Serialize;
use std::fmt;
use std::mem;

use crate::error::{Result, SubjsError};

/// Bare identifier text, used as a call/method name and as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ident(pub String);

impl Ident {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Ident(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every node kind the grammar can build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Integer literal.
    Number(i64),

    /// String literal, quotes stripped.
    Str(String),

    /// A single identifier.  Appears as a method-call receiver segment.
    Ident(Ident),

    /// Dotted identifier chain with no trailing call: `a.b.c`.
    Path(Vec<Ident>),

    /// `left + right`
    Add(AddExpr),

    /// `name(args)`
    Call(CallExpr),

    /// `receiver.method(args)`
    MethodCall(MethodCallExpr),
}

impl Value {
    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Ident(_) => "identifier",
            Value::Path(_) => "path",
            Value::Add(_) => "addition",
            Value::Call(_) => "call",
            Value::MethodCall(_) => "method call",
        }
    }

    /// `true` for number and string literals.
    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Number(_) | Value::Str(_))
    }
}

impl fmt::Display for Value {
    /// Literals print their raw value; composite nodes use the prefix form
    /// from [`crate::ast_printer::AstPrinter`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),

            Value::Str(s) => write!(f, "{}", s),

            other => f.write_str(&crate::ast_printer::AstPrinter::print(other)),
        }
    }
}

/// Binary addition / concatenation node.
#[derive(Debug, PartialEq, Serialize)]
pub struct AddExpr {
    pub left: Box<Value>,
    pub right: Box<Value>,
}

impl AddExpr {
    pub fn new(left: Value, right: Value) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Add two already-resolved operands.
    ///
    /// Numbers are summed, strings are concatenated.  Any other pairing,
    /// including an operand that is still a composite node, is a
    /// [`SubjsError::TypeMismatch`].  Operands are *not* resolved here.
    pub fn resolve(&self) -> Result<Value> {
        debug!(
            "Resolving addition of {} and {}",
            self.left.kind(),
            self.right.kind()
        );

        match (self.left.as_ref(), self.right.as_ref()) {
            (Value::Number(l), Value::Number(r)) => l
                .checked_add(*r)
                .map(Value::Number)
                .ok_or(SubjsError::Overflow {
                    left: *l,
                    right: *r,
                }),

            (Value::Str(l), Value::Str(r)) => {
                let mut joined = String::with_capacity(l.len() + r.len());
                joined.push_str(l);
                joined.push_str(r);

                Ok(Value::Str(joined))
            }

            (l, r) => Err(SubjsError::TypeMismatch {
                left: l.kind(),
                right: r.kind(),
            }),
        }
    }

    /// Owning form of [`AddExpr::resolve`]: the left string is extended in
    /// place, which keeps folding a long concatenation chain linear.
    pub fn into_resolved(mut self) -> Result<Value> {
        let left: Value = mem::replace(&mut *self.left, Value::Number(0));
        let right: Value = mem::replace(&mut *self.right, Value::Number(0));

        match (left, right) {
            (Value::Str(mut l), Value::Str(r)) => {
                l.push_str(&r);

                Ok(Value::Str(l))
            }

            (left, right) => AddExpr::new(left, right).resolve(),
        }
    }
}

impl Clone for AddExpr {
    fn clone(&self) -> Self {
        let mut rights: Vec<&Value> = vec![self.right.as_ref()];
        let mut base: &Value = self.left.as_ref();

        while let Value::Add(inner) = base {
            rights.push(inner.right.as_ref());
            base = inner.left.as_ref();
        }

        // rights[0] is this node's own right operand.
        let mut left: Value = base.clone();

        for right in rights[1..].iter().rev() {
            left = Value::Add(AddExpr::new(left, (*right).clone()));
        }

        AddExpr::new(left, self.right.as_ref().clone())
    }
}

impl Drop for AddExpr {
    /// Long `+` chains build trees as deep as they have terms; take them apart
    /// with an explicit stack so dropping never recurses per level.
    fn drop(&mut self) {
        let mut pending: Vec<Value> = Vec::new();

        for side in [&mut self.left, &mut self.right] {
            if matches!(**side, Value::Add(_)) {
                pending.push(mem::replace(&mut **side, Value::Number(0)));
            }
        }

        while let Some(value) = pending.pop() {
            if let Value::Add(mut add) = value {
                for side in [&mut add.left, &mut add.right] {
                    if matches!(**side, Value::Add(_)) {
                        pending.push(mem::replace(&mut **side, Value::Number(0)));
                    }
                }
            }
        }
    }
}

/// Free function call.  `args` is empty (never absent) for `f()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub name: Ident,
    pub args: Vec<Value>,
}

/// Method call.  `receiver` holds either the path segments before the method
/// name (as [`Value::Ident`]s) or exactly one wrapped sub-expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCallExpr {
    pub receiver: Vec<Value>,
    pub method: Ident,
    pub args: Vec<Value>,
}
