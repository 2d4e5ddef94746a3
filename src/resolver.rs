//! Bottom-up driver for [`AddExpr::resolve`].
//!
//! `AddExpr::resolve` only combines operands that are already literals.  The
//! [`Resolver`] walks an addition tree, resolves both children first and then
//! resolves the parent, so `1+2+3` collapses to `6`.  Nodes it has no rule for
//! (paths, calls) are returned untouched; an addition that has one as an
//! operand therefore fails with a type mismatch.

use log::{debug, info};

use crate::error::Result;
use crate::value::{AddExpr, Value};

pub struct Resolver;

impl Resolver {
    /// Resolve `value` bottom-up and return the result.
    ///
    /// `+` chains nest to the left, so the left spine is walked with a loop
    /// and only right operands (parenthesised groups) recurse.
    pub fn resolve(value: &Value) -> Result<Value> {
        let Value::Add(add) = value else {
            return Ok(value.clone());
        };

        let mut rights: Vec<&Value> = vec![add.right.as_ref()];
        let mut base: &Value = add.left.as_ref();

        while let Value::Add(inner) = base {
            rights.push(inner.right.as_ref());
            base = inner.left.as_ref();
        }

        debug!("Resolving addition chain of {} term(s)", rights.len() + 1);

        let mut acc: Value = base.clone();

        for right in rights.into_iter().rev() {
            let right: Value = Self::resolve(right)?;

            acc = AddExpr::new(acc, right).into_resolved()?;
        }

        Ok(acc)
    }
}

/// Resolve a whole tree, logging the entry point.
pub fn resolve(value: &Value) -> Result<Value> {
    info!("Resolving {} node", value.kind());

    Resolver::resolve(value)
}
