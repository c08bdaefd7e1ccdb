//! A minimal evaluator for the untyped lambda calculus: named-variable
//! terms, capture-avoiding substitution, and applicative-order reduction
//! to beta-normal form.

pub mod eval;
pub mod term;

pub use eval::{ensure_fresh, normalize, normalize_within, rename, substitute, EvalError, Result};
pub use term::{Term, TermRef};
