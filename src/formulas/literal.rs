use std::cmp::Ordering;
use std::sync::Arc;

use crate::formulas::{EncodedFormula, FormulaFactory, FormulaType, Variable};

use super::formula_cache::formula_encoding::FormulaEncoding;

/// Specifies all types of literals.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum LitType {
    /// Positive literal
    Pos,
    /// Negative literal
    Neg,
}

/// Boolean literal.
///
/// Literals are besides the constants `True` and `False` and pseudo-boolean
/// constraints the atomic formulas.
///
/// A literal consists of a [`Variable`] and its phase (also sign or polarity in
/// the literature). There are multiple ways to create a new `Literal`:
/// - [`FormulaFactory::lit`] creates the explicit type, [`FormulaFactory::literal`]
///   creates it directly as [`EncodedFormula`].
/// - [`Literal::new`] creates a literal for an existing `Variable`.
/// - [`EncodedFormula::as_literal`] converts a literal formula.
///
/// Note that, the bool `phase` describes the value of the literal. So `true`
/// will yield a positive literal, and `false` a negated literal.
///
/// Literals are ordered by their variable first, and a positive literal comes
/// before the negative literal of the same variable.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Literal {
    /// Positive literal
    Pos(Variable),
    /// Negative literal
    Neg(Variable),
}

impl Literal {
    /// Creates a new literal of the given variable and phase.
    ///
    /// # Example
    ///
    /// Basic usage:
    /// ```
    /// # use logicng_compile::formulas::{FormulaFactory, Literal};
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.var("a");
    /// let lit = Literal::new(a, false);
    ///
    /// assert_eq!(lit, f.lit("a", false));
    /// ```
    pub const fn new(variable: Variable, phase: bool) -> Self {
        if phase { Self::Pos(variable) } else { Self::Neg(variable) }
    }

    /// Returns the variable of this literal.
    pub const fn variable(self) -> Variable {
        match self {
            Self::Pos(var) | Self::Neg(var) => var,
        }
    }

    /// Returns the phase of this literal.
    pub const fn phase(self) -> bool {
        matches!(self, Self::Pos(_))
    }

    /// Returns the literal with the same variable and the opposite phase.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Pos(var) => Self::Neg(var),
            Self::Neg(var) => Self::Pos(var),
        }
    }

    /// Returns the name of the variable of this literal.
    pub fn name(self, f: &FormulaFactory) -> Arc<str> {
        self.variable().name(f)
    }

    /// Returns a string representation of the literal, e.g. `a` or `~a`.
    pub fn to_string(self, f: &FormulaFactory) -> String {
        if self.phase() { self.name(f).to_string() } else { format!("~{}", self.name(f)) }
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variable().cmp(&other.variable()).then_with(|| other.phase().cmp(&self.phase()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Literal> for EncodedFormula {
    fn from(lit: Literal) -> Self {
        let ty = if lit.phase() { FormulaType::Lit(LitType::Pos) } else { FormulaType::Lit(LitType::Neg) };
        Self::from(FormulaEncoding::encode(lit.variable().index(), ty))
    }
}

impl From<Variable> for Literal {
    fn from(var: Variable) -> Self {
        Self::Pos(var)
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::{EncodedFormula, FormulaFactory, Literal};

    #[test]
    fn test_literal_properties() {
        let f = FormulaFactory::new();
        let a = f.var("a");
        let pos = Literal::new(a, true);
        let neg = Literal::new(a, false);
        assert_eq!(pos.variable(), a);
        assert_eq!(neg.variable(), a);
        assert!(pos.phase());
        assert!(!neg.phase());
        assert_eq!(pos.negate(), neg);
        assert_eq!(neg.negate(), pos);
        assert_eq!(pos.to_string(&f), "a");
        assert_eq!(neg.to_string(&f), "~a");
    }

    #[test]
    fn test_literal_as_formula() {
        let f = FormulaFactory::new();
        let neg = f.lit("a", false);
        let formula = EncodedFormula::from(neg);
        assert_eq!(formula, f.literal("a", false));
        assert_eq!(formula.as_literal(), Some(neg));
        assert_eq!(f.not(formula), f.variable("a"));
    }
}
