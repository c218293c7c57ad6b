//! Expression compilation.
//!
//! User text is normalized, parsed with a fixed grammar (numbers, `x`, `pi`,
//! `e`, `+ - * / ^`, parentheses and a whitelist of unary functions) and
//! evaluated directly from the tree. Nothing is executed beyond that grammar.

mod ast;
mod parser;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ast::{BinaryOp, Expr, Function};

/// Unit used for trigonometric angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Angles in radians.
    #[default]
    Radian,
    /// Angles in degrees.
    Degree,
}

impl AngleMode {
    /// Map the UI's "degree mode" checkbox onto an angle mode.
    pub fn from_degree_flag(degree: bool) -> Self {
        if degree { Self::Degree } else { Self::Radian }
    }

    /// Check whether this is degree mode.
    pub fn is_degree(self) -> bool {
        self == Self::Degree
    }
}

/// Reasons an expression cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Nothing to compile.
    #[error("empty expression")]
    Empty,
    /// The text does not match the expression grammar.
    #[error("syntax error at offset {position}: {message}")]
    Syntax {
        /// Byte offset into the normalized text.
        position: usize,
        /// Parser diagnostic.
        message: String,
    },
    /// A bare name other than `x`, `pi` or `e`.
    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),
    /// A call to a function outside the whitelist.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    /// Parentheses nest deeper than the supported limit.
    #[error("expression nests deeper than {limit} levels")]
    TooDeep {
        /// Deepest nesting accepted.
        limit: usize,
    },
    /// More operators than the supported limit.
    #[error("expression has more than {limit} operators")]
    TooComplex {
        /// Most operators accepted.
        limit: usize,
    },
}

/// Result of evaluating a compiled function at one `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// A finite value.
    Valid(f64),
    /// NaN, an infinity, or a domain error; breaks the plotted path.
    Invalid,
}

impl Sample {
    fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Self::Valid(value)
        } else {
            Self::Invalid
        }
    }

    /// The value when valid.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid => None,
        }
    }
}

/// An expression bound to an angle mode, ready for sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    expr: Expr,
    mode: AngleMode,
}

impl CompiledFunction {
    /// Evaluate the function at `x`.
    pub fn evaluate(&self, x: f64) -> Sample {
        Sample::from_value(self.expr.eval(x, self.mode))
    }

    /// The parsed expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The angle mode the function was compiled for.
    pub fn angle_mode(&self) -> AngleMode {
        self.mode
    }
}

/// Compile user expression text for the given angle mode.
pub fn compile(text: &str, mode: AngleMode) -> Result<CompiledFunction, CompileError> {
    let normalized = parser::normalize(text);
    let expr = parser::parse(&normalized)?;
    Ok(CompiledFunction { expr, mode })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str, mode: AngleMode, x: f64) -> Sample {
        compile(text, mode).expect("expression compiles").evaluate(x)
    }

    #[test]
    fn square_at_three() {
        assert_eq!(eval("x^2", AngleMode::Radian, 3.0), Sample::Valid(9.0));
        assert_eq!(eval("x²", AngleMode::Radian, 3.0), Sample::Valid(9.0));
        assert_eq!(eval("x³", AngleMode::Radian, 2.0), Sample::Valid(8.0));
    }

    #[test]
    fn division_by_zero_is_invalid_sample() {
        assert_eq!(eval("1/x", AngleMode::Radian, 0.0), Sample::Invalid);
        assert_eq!(eval("sqrt(x)", AngleMode::Radian, -1.0), Sample::Invalid);
        assert_eq!(eval("log(x)", AngleMode::Radian, 0.0), Sample::Invalid);
    }

    #[test]
    fn precedence_matches_arithmetic() {
        assert_eq!(eval("1 + 2 * 3", AngleMode::Radian, 0.0), Sample::Valid(7.0));
        assert_eq!(eval("(1 + 2) * 3", AngleMode::Radian, 0.0), Sample::Valid(9.0));
        assert_eq!(eval("8 / 4 / 2", AngleMode::Radian, 0.0), Sample::Valid(1.0));
        assert_eq!(eval("-x^2", AngleMode::Radian, 3.0), Sample::Valid(-9.0));
        assert_eq!(eval("2^-1", AngleMode::Radian, 0.0), Sample::Valid(0.5));
    }

    #[test]
    fn degree_mode_converts_trig_arguments() {
        let value = eval("sin(x)", AngleMode::Degree, 180.0).value().unwrap();
        assert!(value.abs() < 1e-12);
        let value = eval("cos(x)", AngleMode::Degree, 60.0).value().unwrap();
        assert!((value - 0.5).abs() < 1e-12);
        let value = eval("asin(x)", AngleMode::Degree, 1.0).value().unwrap();
        assert!((value - 90.0).abs() < 1e-9);
    }

    #[test]
    fn degree_mode_leaves_other_terms_alone() {
        assert_eq!(eval("x^2", AngleMode::Degree, 180.0), Sample::Valid(32400.0));
    }

    #[test]
    fn radian_mode_uses_raw_input() {
        let value = eval("sin(x)", AngleMode::Radian, std::f64::consts::FRAC_PI_2)
            .value()
            .unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn whitelisted_functions_and_constants() {
        let value = eval("abs(x) + exp(0) + log10(100) + ln(e)", AngleMode::Radian, -2.0)
            .value()
            .unwrap();
        assert!((value - 6.0).abs() < 1e-12);
        let value = eval("cos(pi)", AngleMode::Radian, 0.0).value().unwrap();
        assert!((value + 1.0).abs() < 1e-12);
    }

    #[test]
    fn compile_errors_are_reported() {
        assert_eq!(compile("", AngleMode::Radian), Err(CompileError::Empty));
        assert!(matches!(
            compile("sin(x", AngleMode::Radian),
            Err(CompileError::Syntax { .. })
        ));
        assert_eq!(
            compile("foo(x)", AngleMode::Radian),
            Err(CompileError::UnknownFunction("foo".to_string()))
        );
    }

    #[test]
    fn angle_mode_from_flag() {
        assert_eq!(AngleMode::from_degree_flag(true), AngleMode::Degree);
        assert_eq!(AngleMode::from_degree_flag(false), AngleMode::Radian);
    }
}
