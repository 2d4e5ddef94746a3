use crate::value::Value;

/// Converts a [`Value`] tree to a parenthesised prefix form.
///
/// * numbers print as-is, strings keep double quotes: `"hi"`
/// * paths join with dots: `a.b.c`
/// * `(+ left right)`, `(call f args…)`, `(method m (receiver…) args…)`
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(value: &Value) -> String {
        match value {
            // ── literals ────────────────────────────────────────────────
            Value::Number(n) => n.to_string(),

            Value::Str(s) => format!("\"{}\"", s),

            // ── names ───────────────────────────────────────────────────
            Value::Ident(ident) => ident.to_string(),

            Value::Path(segments) => segments
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join("."),

            // ── addition ────────────────────────────────────────────────
            Value::Add(add) => {
                // Walk the left spine iteratively; only grouped right
                // operands recurse.
                let mut rights: Vec<&Value> = vec![add.right.as_ref()];
                let mut base: &Value = add.left.as_ref();

                while let Value::Add(inner) = base {
                    rights.push(inner.right.as_ref());
                    base = inner.left.as_ref();
                }

                let mut s = "(+ ".repeat(rights.len());
                s.push_str(&Self::print(base));

                for right in rights.into_iter().rev() {
                    s.push(' ');
                    s.push_str(&Self::print(right));
                    s.push(')');
                }

                s
            }

            // ── calls ───────────────────────────────────────────────────
            Value::Call(call) => {
                let mut s = format!("(call {}", call.name);
                Self::push_args(&mut s, &call.args);
                s.push(')');
                s
            }

            Value::MethodCall(call) => {
                let receiver: Vec<String> = call.receiver.iter().map(Self::print).collect();

                let mut s = format!("(method {} ({})", call.method, receiver.join(" "));
                Self::push_args(&mut s, &call.args);
                s.push(')');
                s
            }
        }
    }

    fn push_args(s: &mut String, args: &[Value]) {
        for arg in args {
            s.push(' ');
            s.push_str(&Self::print(arg));
        }
    }
}
