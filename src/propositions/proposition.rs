use crate::formulas::{EncodedFormula, FormulaFactory};

/// A proposition is a formula with an additional textual description and a
/// user defined payload, called the _backpack_.
///
/// Propositions are immutable once built. They are the input of an
/// [`UnsatCore`](crate::explanations::UnsatCore), which reports the
/// propositions responsible for a conflict.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::propositions::Proposition;
/// let f = FormulaFactory::new();
/// let rule = Proposition::with_backpack(f.variable("a"), 42).with_description("rule 42");
///
/// assert_eq!(rule.description(), Some("rule 42"));
/// assert_eq!(*rule.backpack(), 42);
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Proposition<B = ()> {
    formula: EncodedFormula,
    description: Option<String>,
    backpack: B,
}

/// A proposition without a backpack.
pub type StandardProposition = Proposition<()>;

impl Proposition<()> {
    /// Constructs a new proposition for a formula.
    pub const fn new(formula: EncodedFormula) -> Self {
        Self { formula, description: None, backpack: () }
    }
}

impl<B> Proposition<B> {
    /// Constructs a new proposition for a formula with a backpack.
    pub const fn with_backpack(formula: EncodedFormula, backpack: B) -> Self {
        Self { formula, description: None, backpack }
    }

    /// Returns this proposition with the given description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub const fn formula(&self) -> EncodedFormula {
        self.formula
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub const fn backpack(&self) -> &B {
        &self.backpack
    }

    /// Returns a string representation with the formula and the description.
    pub fn to_string(&self, f: &FormulaFactory) -> String {
        match &self.description {
            Some(description) => format!("Proposition{{formula={}, description={description}}}", self.formula.to_string(f)),
            None => format!("Proposition{{formula={}}}", self.formula.to_string(f)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::FormulaFactory;

    use super::{Proposition, StandardProposition};

    #[test]
    fn test_construction() {
        let f = &FormulaFactory::new();
        let formula = f.or([f.variable("a"), f.variable("b")]);
        let standard: StandardProposition = Proposition::new(formula);
        assert_eq!(standard.formula(), formula);
        assert_eq!(standard.description(), None);
        assert_eq!(standard.to_string(f), "Proposition{formula=a | b}");

        let described = Proposition::with_backpack(formula, "payload").with_description("a or b");
        assert_eq!(described.description(), Some("a or b"));
        assert_eq!(*described.backpack(), "payload");
        assert_eq!(described.to_string(f), "Proposition{formula=a | b, description=a or b}");
    }

    #[test]
    fn test_equality() {
        let f = &FormulaFactory::new();
        let a = f.variable("a");
        assert_eq!(Proposition::new(a), Proposition::new(a));
        assert_ne!(Proposition::new(a), Proposition::new(a).with_description("a"));
        assert_ne!(Proposition::with_backpack(a, 1), Proposition::with_backpack(a, 2));
    }
}
