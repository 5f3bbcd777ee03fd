use itertools::Itertools;

use crate::datastructures::Assignment;
use crate::formulas::{FormulaFactory, Literal, Variable};

use super::assignment::names_to_variables;

/// A `Model` stores a set of positive and negative [`Variable`]s in vectors.
///
/// Models are what the model enumerations of the compiled representations
/// return. A `Model` is cheap to create, but it does not check for duplicates
/// and is unsuited for evaluating formulas. Convert it into an [`Assignment`]
/// for that.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::datastructures::{Model, Assignment};
/// let f = FormulaFactory::new();
///
/// let a = f.var("a");
/// let b = f.var("b");
/// let model = Model::new(vec![a], vec![b]);
/// let assignment = Assignment::from(&model);
///
/// assert!(assignment.contains_neg(b));
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    pos: Vec<Variable>,
    neg: Vec<Variable>,
}

impl Model {
    /// Creates a new model.
    pub fn new<P, N>(pos: P, neg: N) -> Self
    where
        P: Into<Vec<Variable>>,
        N: Into<Vec<Variable>>,
    {
        Self { pos: pos.into(), neg: neg.into() }
    }

    /// Creates a new model from a vector of literals.
    pub fn from_literals(literals: &[Literal]) -> Self {
        let (pos, neg): (Vec<Literal>, Vec<Literal>) = literals.iter().partition(|lit| lit.phase());
        Self { pos: pos.into_iter().map(Literal::variable).collect(), neg: neg.into_iter().map(Literal::variable).collect() }
    }

    /// Creates a new model from variable names.
    ///
    /// Returns an error if one of the names is not a variable of the given
    /// factory.
    pub fn from_names(pos: &[&str], neg: &[&str], f: &FormulaFactory) -> Result<Self, String> {
        Ok(Self { pos: names_to_variables(pos, f)?, neg: names_to_variables(neg, f)? })
    }

    /// Returns all positive variables of this model.
    pub fn pos(&self) -> &[Variable] {
        &self.pos
    }

    /// Returns all negative variables of this model.
    pub fn neg(&self) -> &[Variable] {
        &self.neg
    }

    /// Returns the number of variables in this model.
    pub fn len(&self) -> usize {
        self.pos.len() + self.neg.len()
    }

    /// Returns `true` if this model contains no variables.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the literals of this model, first all positive literals and
    /// then all negative literals.
    pub fn literals(&self) -> Vec<Literal> {
        self.pos.iter().map(|var| var.pos_lit()).chain(self.neg.iter().map(|var| var.neg_lit())).collect()
    }

    /// Returns `true` if both models assign the same values, independent of the
    /// order of the variables.
    pub fn compare(&self, other: &Self) -> bool {
        Assignment::from(self) == Assignment::from(other)
    }

    /// Creates a string representation of this model.
    ///
    /// ```
    /// # use logicng_compile::datastructures::Model;
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let model = Model::new(vec![f.var("a")], vec![f.var("b")]);
    ///
    /// assert_eq!(model.to_string(&f), "Model{pos=[a], neg=[b]}");
    /// ```
    pub fn to_string(&self, f: &FormulaFactory) -> String {
        format!("Model{{pos=[{}], neg=[{}]}}", self.pos.iter().map(|v| v.name(f)).join(", "), self.neg.iter().map(|v| v.name(f)).join(", "))
    }
}

impl From<&Model> for Assignment {
    fn from(model: &Model) -> Self {
        Self::from_variables(&model.pos, &model.neg)
    }
}

impl From<Model> for Assignment {
    fn from(model: Model) -> Self {
        Self::from(&model)
    }
}
