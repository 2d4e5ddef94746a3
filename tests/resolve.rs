#[cfg(test)]
mod resolve_tests {
    use subjs::error::SubjsError;
    use subjs::parser::parse;
    use subjs::resolver::{resolve, Resolver};
    use subjs::value::*;

    fn resolved(src: &str) -> Result<Value, SubjsError> {
        resolve(&parse(src).expect("source should parse"))
    }

    #[test]
    fn test_add_expr_resolve() {
        let sum = AddExpr::new(Value::Number(2), Value::Number(3));
        assert_eq!(sum.resolve().unwrap(), Value::Number(5));

        let concat = AddExpr::new(Value::Str("a".into()), Value::Str("b".into()));
        assert_eq!(concat.resolve().unwrap(), Value::Str("ab".into()));

        let mixed = AddExpr::new(Value::Number(2), Value::Str("b".into()));
        assert!(matches!(
            mixed.resolve(),
            Err(SubjsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_resolves_bottom_up() {
        assert_eq!(resolved("1+2+3").unwrap(), Value::Number(6));
        assert_eq!(resolved("(1+2)+(3+4)").unwrap(), Value::Number(10));
        assert_eq!(
            resolved(r#"'foo'+("bar"+'baz')"#).unwrap(),
            Value::Str("foobarbaz".into())
        );
        assert_eq!(resolved("'😊'+'世'").unwrap(), Value::Str("😊世".into()));
    }

    #[test]
    fn test_literals_and_other_nodes_pass_through() {
        assert_eq!(resolved("7").unwrap(), Value::Number(7));

        let call = parse("f(1+2)").unwrap();
        assert_eq!(Resolver::resolve(&call).unwrap(), call);
    }

    #[test]
    fn test_unresolvable_operands_are_type_mismatches() {
        let cases = [
            ("1+'a'", "number", "string"),
            ("'a'+(1+2)", "string", "number"),
            ("f()+1", "call", "number"),
            ("1+a.b", "number", "path"),
            ("('x').len()+1", "method call", "number"),
        ];

        for (input, left, right) in cases {
            match resolved(input) {
                Err(err @ SubjsError::TypeMismatch { .. }) => {
                    assert!(err.is_resolve_error(), "{}", input);
                    assert!(!err.is_syntax_error(), "{}", input);
                    assert_eq!(
                        err.to_string(),
                        format!("Type mismatch: cannot add {} and {}", left, right)
                    );
                }
                other => panic!("input {:?}: expected type mismatch, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = resolved("9223372036854775807+1").unwrap_err();

        assert!(matches!(
            err,
            SubjsError::Overflow {
                left: i64::MAX,
                right: 1
            }
        ));
        assert!(err.is_resolve_error());
    }

    #[test]
    fn test_long_sums_resolve_iteratively() {
        let terms = 100_000;

        let numbers = vec!["1"; terms].join("+");
        assert_eq!(resolved(&numbers).unwrap(), Value::Number(terms as i64));

        let strings = vec!["'ab'"; terms].join("+");
        assert_eq!(resolved(&strings).unwrap(), Value::Str("ab".repeat(terms)));

        let grouped = format!("{}+(2+3)+4", numbers);
        assert_eq!(resolved(&grouped).unwrap(), Value::Number(terms as i64 + 9));
    }

    #[test]
    fn test_long_sum_mismatch_reports_first_bad_pair() {
        let source = format!("{}+'x'+1", vec!["1"; 10_000].join("+"));

        assert!(matches!(
            resolved(&source),
            Err(SubjsError::TypeMismatch {
                left: "number",
                right: "string"
            })
        ));
    }

    #[test]
    fn test_call_with_long_sum_argument_passes_through() {
        let call = parse(&format!("f({})", vec!["1"; 100_000].join("+"))).unwrap();

        assert!(matches!(resolve(&call).unwrap(), Value::Call(_)));
    }
}
