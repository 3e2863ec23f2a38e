use crate::expression::constants::{MAX_NESTING_DEPTH, MAX_TREE_DEPTH};
use crate::expression::{
    ArithmeticError, BinaryOperator, Evaluation, Expression, ExpressionError, Number, evaluate,
    parse,
};

fn render(input: &str) -> String {
    match evaluate(input) {
        Ok(value) => value.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

fn error_of(input: &str) -> ExpressionError {
    match evaluate(input) {
        Ok(value) => panic!("expected '{}' to fail, got {}", input, value),
        Err(e) => e,
    }
}

#[test]
fn test_basic_scenarios() {
    assert_eq!(render("2+2"), "4");
    assert_eq!(render("7/2"), "7 ÷ 2 = 3 remainder 1");
    assert_eq!(render("2**10"), "1024");
    assert_eq!(render("-3+5"), "2");
    assert_eq!(render("10%3"), "1");
    assert_eq!(render("foo(1)"), "Error: Expression not allowed");
}

#[test]
fn test_division_reports_floor_quotient_and_remainder() {
    for a in -20_i64..=20 {
        for b in -7_i64..=7 {
            if b == 0 {
                continue;
            }
            let quotient = (a as f64 / b as f64).floor() as i64;
            let remainder = a - quotient * b;
            assert!(remainder.abs() < b.abs());
            assert!(remainder == 0 || (remainder < 0) == (b < 0));

            let expected = format!("{} ÷ {} = {} remainder {}", a, b, quotient, remainder);
            assert_eq!(render(&format!("{}/{}", a, b)), expected);
        }
    }
}

#[test]
fn test_division_report_fields() {
    let result = evaluate("-7 / 2");
    assert!(result.is_ok());
    if let Ok(Evaluation::Division(report)) = result {
        assert_eq!(report.dividend, Number::Int(-7));
        assert_eq!(report.divisor, Number::Int(2));
        assert_eq!(report.quotient, Number::Int(-4));
        assert_eq!(report.remainder, Number::Int(1));
    } else {
        panic!("expected a division report");
    }
}

#[test]
fn test_float_division_report() {
    assert_eq!(render("7.5/2"), "7.5 ÷ 2 = 3.0 remainder 1.5");
    assert_eq!(render("7/-2.0"), "7 ÷ -2.0 = -4.0 remainder -1.0");
}

#[test]
fn test_bare_literals_evaluate_to_themselves() {
    assert_eq!(evaluate("42"), Ok(Evaluation::Number(Number::Int(42))));
    assert_eq!(evaluate("0"), Ok(Evaluation::Number(Number::Int(0))));
    assert_eq!(evaluate("3.25"), Ok(Evaluation::Number(Number::Float(3.25))));
    assert_eq!(evaluate(" 1_000 "), Ok(Evaluation::Number(Number::Int(1000))));
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(render("1+2*3"), "7");
    assert_eq!(render("(1+2)*3"), "9");
    assert_eq!(render("10-4-3"), "3");
    assert_eq!(render("2**3**2"), "512");
    assert_eq!(render("-2**2"), "-4");
    assert_eq!(render("(-2)**2"), "4");
    assert_eq!(render("2**-1"), "0.5");
    assert_eq!(render("--3"), "3");
}

#[test]
fn test_floor_semantics_for_modulo_and_floor_division() {
    assert_eq!(render("-7//2"), "-4");
    assert_eq!(render("-7%2"), "1");
    assert_eq!(render("7%-2"), "-1");
    assert_eq!(render("10 // -3"), "-4");
    assert_eq!(render("7.5 // 2"), "3.0");
    assert_eq!(render("-7.5 % 2"), "0.5");
}

#[test]
fn test_mixed_expressions() {
    assert_eq!(render("17 % 5 * 2 - 3 // 2"), "3");
    assert_eq!(render("-17 % 5"), "3");
    assert_eq!(render("2 ** 2 ** 3"), "256");
    assert_eq!(render("-2 ** 2 + 10 // -3"), "-8");
    assert_eq!(render("2*3.0"), "6.0");
    assert_eq!(render("0.1+0.2"), "0.30000000000000004");
    assert_eq!(render("1e16*1"), "1e+16");
    assert_eq!(render("1/4.0"), "1 ÷ 4.0 = 0.0 remainder 1.0");
}

#[test]
fn test_division_by_zero_is_arithmetic_failure() {
    for input in ["5/0", "5%0", "5//0", "5//0.0", "1.5/0.0"] {
        let e = error_of(input);
        assert_eq!(e, ExpressionError::Arithmetic(ArithmeticError::DivisionByZero));
        assert!(e.is_arithmetic());
    }
    assert_eq!(render("5/0"), "Error: division by zero");
}

#[test]
fn test_arithmetic_failures() {
    assert_eq!(
        error_of("9223372036854775807 + 1"),
        ExpressionError::Arithmetic(ArithmeticError::Overflow)
    );
    assert_eq!(
        error_of("2**64"),
        ExpressionError::Arithmetic(ArithmeticError::Overflow)
    );
    assert_eq!(
        error_of("10.0**400"),
        ExpressionError::Arithmetic(ArithmeticError::Overflow)
    );
    assert_eq!(
        error_of("(-8)**0.5"),
        ExpressionError::Arithmetic(ArithmeticError::ComplexResult)
    );
    assert_eq!(
        error_of("0**-1"),
        ExpressionError::Arithmetic(ArithmeticError::ZeroToNegativePower)
    );
}

#[test]
fn test_minimum_integer_by_minus_one() {
    let min = "(-9223372036854775807 - 1)";
    assert_eq!(render(&format!("{} % -1", min)), "0");
    assert_eq!(
        error_of(&format!("{} // -1", min)),
        ExpressionError::Arithmetic(ArithmeticError::Overflow)
    );
    assert_eq!(
        error_of(&format!("{} / -1", min)),
        ExpressionError::Arithmetic(ArithmeticError::Overflow)
    );
}

#[test]
fn test_division_report_is_not_an_operand() {
    assert_eq!(error_of("(7/2)+1"), ExpressionError::NonNumericOperand);
    assert_eq!(error_of("-(7/2)"), ExpressionError::NonNumericOperand);
    assert_eq!(error_of("8/4/2"), ExpressionError::NonNumericOperand);
}

#[test]
fn test_rejects_disallowed_operators() {
    for input in ["1 & 2", "1 | 2", "1 ^ 2", "1 << 2", "8 >> 1", "2 @ 3", "(1 & 2)"] {
        assert!(
            matches!(error_of(input), ExpressionError::UnsupportedOperator { .. }),
            "'{}' should be rejected as an operator",
            input
        );
    }
    assert_eq!(render("1 & 2"), "Error: Operator not allowed");
}

#[test]
fn test_rejects_non_numeric_literals() {
    for input in ["\"a\"+1", "'a'", "True+1", "None", "3j", "1 + 2J"] {
        assert!(
            matches!(error_of(input), ExpressionError::UnsupportedLiteral { .. }),
            "'{}' should be rejected as a literal",
            input
        );
    }
    assert_eq!(render("\"a\"+1"), "Error: Only numbers are allowed");
}

#[test]
fn test_rejects_unsupported_constructs() {
    let inputs = [
        "x+1", "len(1)", "1==1", "1 < 2", "[1]", "{1: 2}", "+5", "~5", "1 and 2", "not 1",
        "a.b", "(1,2)", "()", "1(2)", "(1).real", "1 if 2 else 3",
    ];
    for input in inputs {
        assert!(
            matches!(error_of(input), ExpressionError::UnsupportedConstruct { .. }),
            "'{}' should be rejected as a construct",
            input
        );
    }
    assert_eq!(render("len(1)"), "Error: Expression not allowed");
}

#[test]
fn test_rejects_malformed_input() {
    assert_eq!(error_of(""), ExpressionError::InvalidSyntax { column: 1 });
    assert_eq!(error_of("2+"), ExpressionError::InvalidSyntax { column: 3 });
    assert_eq!(error_of("(1"), ExpressionError::InvalidSyntax { column: 3 });
    assert_eq!(error_of("1 2"), ExpressionError::InvalidSyntax { column: 3 });
    assert_eq!(error_of("1 = 1"), ExpressionError::InvalidSyntax { column: 3 });
    assert_eq!(error_of("*3"), ExpressionError::InvalidSyntax { column: 1 });
}

#[test]
fn test_nesting_limit() {
    let deep_parens = format!(
        "{}1{}",
        "(".repeat(MAX_NESTING_DEPTH + 1),
        ")".repeat(MAX_NESTING_DEPTH + 1)
    );
    let negations = format!("{}1", "-".repeat(MAX_NESTING_DEPTH + 1));
    let exponents = format!("{}1", "1**".repeat(MAX_NESTING_DEPTH + 1));

    for input in [deep_parens, negations, exponents] {
        assert_eq!(
            error_of(&input),
            ExpressionError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        );
    }

    let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(render(&shallow), "1");
}

#[test]
fn test_flat_chains_are_not_nesting() {
    let chain = format!("{}1", "1+".repeat(MAX_NESTING_DEPTH + 1));
    assert_eq!(render(&chain), (MAX_NESTING_DEPTH + 2).to_string());

    let longest = format!("{}1", "1+".repeat(MAX_TREE_DEPTH - 1));
    assert_eq!(render(&longest), MAX_TREE_DEPTH.to_string());

    let too_long = format!("{}1", "1*".repeat(MAX_TREE_DEPTH));
    assert_eq!(
        error_of(&too_long),
        ExpressionError::ExpressionTooLong {
            limit: MAX_TREE_DEPTH
        }
    );
    assert!(!error_of(&too_long).to_string().contains("nested"));
}

#[test]
fn test_parse_builds_closed_tree() {
    let result = parse("-3 + 4 * 2");
    assert!(result.is_ok());
    if let Ok(expr) = result {
        let expected = Expression::binary(
            BinaryOperator::Add,
            Expression::negate(Expression::Number(Number::Int(3))),
            Expression::binary(
                BinaryOperator::Multiply,
                Expression::Number(Number::Int(4)),
                Expression::Number(Number::Int(2)),
            ),
        );
        assert_eq!(expr, expected);
    }
}

#[test]
fn test_display_round_trips_through_parser() {
    let source = "-(1 + 2) * 3 ** -1 // 4";
    let result = parse(source);
    assert!(result.is_ok());
    if let Ok(expr) = result {
        let shown = expr.to_string();
        assert_eq!(shown, source);
        assert_eq!(parse(&shown), Ok(expr));
    }

    let result = parse("(2 ** 3) ** 2 - (4 - 1)");
    assert!(result.is_ok());
    if let Ok(expr) = result {
        assert_eq!(expr.to_string(), "(2 ** 3) ** 2 - (4 - 1)");
    }
}

#[test]
fn test_number_display() {
    assert_eq!(Number::Int(-12).to_string(), "-12");
    assert_eq!(Number::Float(3.0).to_string(), "3.0");
    assert_eq!(Number::Float(-0.0).to_string(), "-0.0");
    assert_eq!(Number::Float(1.5).to_string(), "1.5");
    assert_eq!(Number::Float(0.0001).to_string(), "0.0001");
    assert_eq!(Number::Float(0.000015).to_string(), "1.5e-05");
    assert_eq!(Number::Float(2.5e20).to_string(), "2.5e+20");
    assert_eq!(Number::Float(f64::INFINITY).to_string(), "inf");
    assert_eq!(Number::Float(f64::NAN).to_string(), "nan");
}
