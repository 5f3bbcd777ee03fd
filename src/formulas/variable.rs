use std::sync::Arc;

use crate::formulas::{EncodedFormula, FormulaFactory, FormulaType, LitType, Literal};

use super::formula_cache::formula_encoding::FormulaEncoding;

/// Boolean variable.
///
/// A variable is interned by its name in the [`FormulaFactory`], so two
/// variables of the same factory are equal if and only if they have the same
/// name. The ordering of variables is the order in which they were first
/// created in the factory.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Variable {
    index: u64,
}

impl Variable {
    pub(crate) const fn from_index(index: u64) -> Self {
        Self { index }
    }

    pub(crate) const fn index(self) -> u64 {
        self.index
    }

    /// Returns the name of the variable.
    ///
    /// # Example
    ///
    /// Basic usage:
    /// ```
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let var = f.var("A");
    ///
    /// assert_eq!(&*var.name(&f), "A");
    /// ```
    pub fn name(self, f: &FormulaFactory) -> Arc<str> {
        f.var_name(self)
    }

    /// Returns `true` if this variable was introduced by a transformation, e.g.
    /// by the Tseitin transformation.
    pub fn is_auxiliary(self, f: &FormulaFactory) -> bool {
        f.is_auxiliary_variable(self)
    }

    /// Returns the positive literal of this variable.
    pub const fn pos_lit(self) -> Literal {
        Literal::Pos(self)
    }

    /// Returns the negative literal of this variable.
    pub const fn neg_lit(self) -> Literal {
        Literal::Neg(self)
    }

    /// Returns the literal of this variable with the given phase.
    pub const fn lit(self, phase: bool) -> Literal {
        Literal::new(self, phase)
    }
}

impl From<Variable> for EncodedFormula {
    fn from(var: Variable) -> Self {
        Self::from(FormulaEncoding::encode(var.index, FormulaType::Lit(LitType::Pos)))
    }
}

impl TryFrom<EncodedFormula> for Variable {
    type Error = String;

    fn try_from(formula: EncodedFormula) -> Result<Self, Self::Error> {
        match formula.formula_type() {
            FormulaType::Lit(LitType::Pos) => Ok(Self::from_index(formula.encoding.index())),
            ty => Err(format!("Cannot convert a formula of type {ty:?} into a variable")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::{EncodedFormula, FormulaFactory, Variable};

    #[test]
    fn test_variables_are_interned() {
        let f = FormulaFactory::new();
        let a = f.var("a");
        let b = f.var("b");
        assert_eq!(a, f.var("a"));
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(&*a.name(&f), "a");
        assert!(!a.is_auxiliary(&f));
    }

    #[test]
    fn test_conversion() {
        let f = FormulaFactory::new();
        let a = f.var("a");
        let formula = EncodedFormula::from(a);
        assert_eq!(Variable::try_from(formula), Ok(a));
        assert!(Variable::try_from(f.literal("a", false)).is_err());
        assert!(Variable::try_from(f.verum()).is_err());
    }
}
