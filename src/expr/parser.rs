//! Normalization and parsing of expression text into an [`Expr`] tree.

use std::borrow::Cow;
use std::f64::consts::{E, PI};
use std::sync::LazyLock;

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use super::CompileError;
use super::ast::{BinaryOp, Expr, Function};

#[derive(Parser)]
#[grammar = "expr/grammar.pest"]
struct ExpressionParser;

static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left))
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos))
        .op(Op::infix(Rule::pow, Assoc::Right))
});

/// Rewrite calculator glyphs into the ASCII grammar.
///
/// A run of superscript digits becomes one power (`x²` → `x^2`,
/// `x¹⁰` → `x^10`); `×`, `÷`, `−` and `π` map to `*`, `/`, `-` and `pi`.
pub(crate) fn normalize(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 4);
    let mut in_superscript = false;
    for ch in text.chars() {
        if let Some(digit) = superscript_digit(ch) {
            if !in_superscript {
                out.push('^');
                in_superscript = true;
            }
            out.push(digit);
            continue;
        }
        in_superscript = false;
        match ch {
            '×' | '·' => out.push('*'),
            '÷' => out.push('/'),
            '−' => out.push('-'),
            'π' => out.push_str("pi"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

fn superscript_digit(ch: char) -> Option<char> {
    let digit = match ch {
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        _ => return None,
    };
    Some(digit)
}

/// Deepest parenthesis nesting accepted.
pub(crate) const MAX_NESTING: usize = 64;

/// Most operators accepted in one expression.
pub(crate) const MAX_OPERATORS: usize = 256;

/// Parse normalized expression text.
pub(crate) fn parse(text: &str) -> Result<Expr, CompileError> {
    if text.trim().is_empty() {
        return Err(CompileError::Empty);
    }
    check_size(text)?;
    let mut pairs = ExpressionParser::parse(Rule::expression, text).map_err(syntax_error)?;
    let expr = pairs
        .next()
        .and_then(|expression| expression.into_inner().next())
        .ok_or(CompileError::Empty)?;
    build_expr(expr.into_inner())
}

// Parsing, tree building and evaluation all recurse per nesting level and
// per chained operator, so both are bounded before pest runs.
fn check_size(text: &str) -> Result<(), CompileError> {
    let mut depth = 0_usize;
    let mut operators = 0_usize;
    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(CompileError::TooDeep { limit: MAX_NESTING });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            '+' | '-' | '*' | '/' | '^' => {
                operators += 1;
                if operators > MAX_OPERATORS {
                    return Err(CompileError::TooComplex {
                        limit: MAX_OPERATORS,
                    });
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn syntax_error(err: pest::error::Error<Rule>) -> CompileError {
    let position = match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    CompileError::Syntax {
        position,
        message: err.variant.message().into_owned(),
    }
}

fn build_expr(pairs: Pairs<'_, Rule>) -> Result<Expr, CompileError> {
    PRATT
        .map_primary(build_primary)
        .map_prefix(|op, rhs| {
            let rhs = rhs?;
            Ok(match op.as_rule() {
                Rule::neg => Expr::Neg(Box::new(rhs)),
                _ => rhs,
            })
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::sub => BinaryOp::Sub,
                Rule::mul => BinaryOp::Mul,
                Rule::div => BinaryOp::Div,
                _ => BinaryOp::Pow,
            };
            Ok(Expr::Binary {
                op,
                lhs: Box::new(lhs?),
                rhs: Box::new(rhs?),
            })
        })
        .parse(pairs)
}

fn build_primary(pair: Pair<'_, Rule>) -> Result<Expr, CompileError> {
    match pair.as_rule() {
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map(Expr::Number)
            .map_err(|_| CompileError::Syntax {
                position: pair.as_span().start(),
                message: format!("invalid number `{}`", pair.as_str()),
            }),
        Rule::ident => match pair.as_str() {
            "x" => Ok(Expr::Var),
            "pi" => Ok(Expr::Number(PI)),
            "e" => Ok(Expr::Number(E)),
            name => Err(CompileError::UnknownIdentifier(name.to_string())),
        },
        Rule::call => {
            let mut inner = pair.into_inner();
            let (Some(name), Some(arg)) = (inner.next(), inner.next()) else {
                return Err(CompileError::Empty);
            };
            let function = Function::from_name(name.as_str())
                .ok_or_else(|| CompileError::UnknownFunction(name.as_str().to_string()))?;
            Ok(Expr::Call {
                function,
                arg: Box::new(build_expr(arg.into_inner())?),
            })
        }
        Rule::expr => build_expr(pair.into_inner()),
        rule => Err(CompileError::Syntax {
            position: pair.as_span().start(),
            message: format!("unexpected {rule:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> Box<Expr> {
        Box::new(Expr::Number(value))
    }

    #[test]
    fn normalizes_superscripts_and_keypad_glyphs() {
        assert_eq!(normalize("x²"), "x^2");
        assert_eq!(normalize("x³+x¹⁰"), "x^3+x^10");
        assert_eq!(normalize("2×x÷3"), "2*x/3");
        assert_eq!(normalize("sin(π·x)"), "sin(pi*x)");
        assert!(matches!(normalize("x^2"), Cow::Borrowed(_)));
    }

    #[test]
    fn power_binds_tighter_than_negation() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Neg(Box::new(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(Expr::Var),
                rhs: num(2.0),
            }))
        );
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Pow,
                lhs: num(2.0),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::Pow,
                    lhs: num(3.0),
                    rhs: num(2.0),
                }),
            }
        );
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(parse("x**2").unwrap(), parse("x^2").unwrap());
    }

    #[test]
    fn parses_literals() {
        assert_eq!(parse(".5").unwrap(), Expr::Number(0.5));
        assert_eq!(parse("2.5e-3").unwrap(), Expr::Number(0.0025));
        assert_eq!(parse("12.").unwrap(), Expr::Number(12.0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse("   "), Err(CompileError::Empty));
        assert!(matches!(parse("(x+1"), Err(CompileError::Syntax { .. })));
        assert!(matches!(parse("x+1)"), Err(CompileError::Syntax { .. })));
        assert!(matches!(parse("x+"), Err(CompileError::Syntax { .. })));
        assert!(matches!(parse("x; 1"), Err(CompileError::Syntax { .. })));
        assert!(matches!(parse("2x"), Err(CompileError::Syntax { .. })));
    }

    #[test]
    fn bounds_nesting_depth() {
        let nested = |depth: usize| format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse(&nested(MAX_NESTING)).is_ok());
        assert_eq!(
            parse(&nested(1000)),
            Err(CompileError::TooDeep { limit: MAX_NESTING })
        );
        assert_eq!(
            parse(&format!("sin{}", nested(MAX_NESTING))),
            Err(CompileError::TooDeep { limit: MAX_NESTING })
        );
    }

    #[test]
    fn bounds_operator_chains() {
        assert!(parse(&vec!["x"; MAX_OPERATORS + 1].join("^")).is_ok());
        assert_eq!(
            parse(&vec!["x"; MAX_OPERATORS + 2].join("^")),
            Err(CompileError::TooComplex {
                limit: MAX_OPERATORS
            })
        );
        assert_eq!(
            parse(&format!("{}x", "-".repeat(10_000))),
            Err(CompileError::TooComplex {
                limit: MAX_OPERATORS
            })
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            parse("y + 1"),
            Err(CompileError::UnknownIdentifier("y".to_string()))
        );
        assert_eq!(
            parse("alert(x)"),
            Err(CompileError::UnknownFunction("alert".to_string()))
        );
    }
}
