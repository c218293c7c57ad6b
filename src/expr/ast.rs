//! Expression tree and direct evaluation.

use std::f64::consts::PI;

use super::AngleMode;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation.
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }
}

/// Whitelisted unary math functions callable from expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Natural logarithm (`log` and `ln`).
    Ln,
    /// Base-10 logarithm.
    Log10,
    /// Exponential.
    Exp,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
}

impl Function {
    /// Resolve a function by its expression name.
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "log" | "ln" => Self::Ln,
            "log10" => Self::Log10,
            "exp" => Self::Exp,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(function)
    }

    /// Apply the function. Trigonometric arguments (and inverse results) are
    /// in degrees when `mode` is [`AngleMode::Degree`].
    pub fn apply(self, value: f64, mode: AngleMode) -> f64 {
        match self {
            Self::Sin => mode.to_radians(value).sin(),
            Self::Cos => mode.to_radians(value).cos(),
            Self::Tan => mode.to_radians(value).tan(),
            Self::Asin => mode.angle_from_radians(value.asin()),
            Self::Acos => mode.angle_from_radians(value.acos()),
            Self::Atan => mode.angle_from_radians(value.atan()),
            Self::Ln => value.ln(),
            Self::Log10 => value.log10(),
            Self::Exp => value.exp(),
            Self::Sqrt => value.sqrt(),
            Self::Abs => value.abs(),
        }
    }
}

/// Parsed expression over the single variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal or folded constant.
    Number(f64),
    /// The free variable `x`.
    Var,
    /// Unary negation.
    Neg(Box<Expr>),
    /// Binary arithmetic.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Call of a whitelisted function.
    Call {
        /// Function to apply.
        function: Function,
        /// Single argument.
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate at `x`. Domain errors surface as NaN or infinities.
    pub fn eval(&self, x: f64, mode: AngleMode) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x, mode),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(x, mode), rhs.eval(x, mode)),
            Self::Call { function, arg } => function.apply(arg.eval(x, mode), mode),
        }
    }
}

impl AngleMode {
    pub(crate) fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radian => value,
            Self::Degree => value * PI / 180.0,
        }
    }

    pub(crate) fn angle_from_radians(self, value: f64) -> f64 {
        match self {
            Self::Radian => value,
            Self::Degree => value * 180.0 / PI,
        }
    }
}
