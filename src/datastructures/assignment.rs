use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::num::Wrapping;

use itertools::Itertools;

use crate::formulas::{EncodedFormula, FormulaFactory, Literal, Variable};

use super::model::Model;

/// An `Assignment` stores a set of positive and negative [`Variable`]s.
///
/// `Assignment` stores all variables in [`HashSet`]s, this allows for a fast
/// evaluation of formulas. The [`Model`] data-structure stores the same
/// information in vectors, which makes it cheaper to create but slower to use.
/// Both implement `From` for each other.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::datastructures::{Model, Assignment};
/// let f = FormulaFactory::new();
///
/// let a = f.var("a");
/// let b = f.var("b");
/// let assignment = Assignment::from_variables(&[a], &[b]);
/// let model = Model::from(&assignment);
///
/// assert_eq!(Assignment::from(model), assignment);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// Set of all positive variables of this assignment.
    pub pos: HashSet<Variable>,
    /// Set of all negative variables of this assignment.
    pub neg: HashSet<Variable>,
}

impl Assignment {
    /// Creates a new assignment.
    pub const fn new(pos: HashSet<Variable>, neg: HashSet<Variable>) -> Self {
        Self { pos, neg }
    }

    /// Creates a new assignment from slices.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use logicng_compile::datastructures::Assignment;
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.var("a");
    /// let b = f.var("b");
    ///
    /// let assignment = Assignment::from_variables(&[a], &[b]);
    /// assert_eq!(assignment.value_of(a), Some(true));
    /// assert_eq!(assignment.value_of(b), Some(false));
    /// ```
    pub fn from_variables(pos: &[Variable], neg: &[Variable]) -> Self {
        Self { pos: pos.iter().copied().collect(), neg: neg.iter().copied().collect() }
    }

    /// Converts a literal into an assignment.
    pub fn from_lit(lit: Literal) -> Self {
        Self::from_literals(&[lit])
    }

    /// Creates an assignment from a slice of literals.
    ///
    /// All positive literals are added to the positive variables, and all
    /// negative literals to the negative variables.
    pub fn from_literals(literals: &[Literal]) -> Self {
        let mut assignment = Self::default();
        for lit in literals {
            assignment.add_literal(*lit);
        }
        assignment
    }

    /// Creates an assignment from variable names.
    ///
    /// Returns an error if one of the names is not a variable of the given
    /// factory.
    pub fn from_names(pos: &[&str], neg: &[&str], f: &FormulaFactory) -> Result<Self, String> {
        Ok(Self { pos: names_to_variables(pos, f)?, neg: names_to_variables(neg, f)? })
    }

    /// Adds a literal to this assignment. Returns `false` if the literal was
    /// already contained.
    pub fn add_literal(&mut self, lit: Literal) -> bool {
        match lit {
            Literal::Pos(var) => self.pos.insert(var),
            Literal::Neg(var) => self.neg.insert(var),
        }
    }

    /// Returns all positive variables of this assignment.
    pub const fn pos(&self) -> &HashSet<Variable> {
        &self.pos
    }

    /// Returns all negative variables of this assignment.
    pub const fn neg(&self) -> &HashSet<Variable> {
        &self.neg
    }

    /// Returns the number of variables in this assignment.
    pub fn len(&self) -> usize {
        self.pos.len() + self.neg.len()
    }

    /// Returns `true` if this assignment assigns no variables.
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty() && self.neg.is_empty()
    }

    /// Returns `true` if the variable is positive in this assignment.
    pub fn contains_pos(&self, var: Variable) -> bool {
        self.pos.contains(&var)
    }

    /// Returns `true` if the variable is negative in this assignment.
    pub fn contains_neg(&self, var: Variable) -> bool {
        self.neg.contains(&var)
    }

    /// Returns `true` if the literal is contained in this assignment.
    pub fn contains(&self, lit: Literal) -> bool {
        match lit {
            Literal::Pos(var) => self.contains_pos(var),
            Literal::Neg(var) => self.contains_neg(var),
        }
    }

    /// Returns the value of a variable, or `None` if the variable is not
    /// assigned.
    pub fn value_of(&self, var: Variable) -> Option<bool> {
        if self.pos.contains(&var) {
            Some(true)
        } else if self.neg.contains(&var) {
            Some(false)
        } else {
            None
        }
    }

    /// Evaluates a literal. A variable which is not assigned is treated as
    /// `false`.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use logicng_compile::datastructures::Assignment;
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let assignment = Assignment::from_literals(&[f.lit("a", true), f.lit("b", false)]);
    ///
    /// assert!(assignment.evaluate_lit(f.lit("a", true)));
    /// assert!(!assignment.evaluate_lit(f.lit("b", true)));
    /// assert!(assignment.evaluate_lit(f.lit("c", false)));
    /// ```
    pub fn evaluate_lit(&self, lit: Literal) -> bool {
        let var = &lit.variable();
        if lit.phase() { self.pos.contains(var) } else { self.neg.contains(var) || !self.pos.contains(var) }
    }

    /// Restricts the given literal in this assignment.
    ///
    /// Returns a constant if the variable is assigned, or the literal itself
    /// otherwise.
    pub fn restrict_lit(&self, lit: Literal) -> EncodedFormula {
        self.value_of(lit.variable()).map_or_else(|| lit.into(), |value| EncodedFormula::constant(value == lit.phase()))
    }

    /// Creates the blocking clause for this assignment, i.e. the clause which
    /// is falsified exactly by this assignment. If `variables` are given, only
    /// these variables are considered.
    pub fn blocking_clause(&self, f: &FormulaFactory, variables: Option<&[Variable]>) -> EncodedFormula {
        let ops: Vec<EncodedFormula> = match variables {
            Some(variables) => variables.iter().filter_map(|v| self.value_of(*v).map(|value| EncodedFormula::from(v.lit(!value)))).collect(),
            None => self.literals().into_iter().map(|lit| EncodedFormula::from(lit.negate())).collect(),
        };
        f.or(ops)
    }

    /// Returns the literals of this assignment, sorted by variable.
    pub fn literals(&self) -> Vec<Literal> {
        self.pos.iter().map(|var| Literal::Pos(*var)).chain(self.neg.iter().map(|var| Literal::Neg(*var))).sorted().collect()
    }

    /// Creates a string representation of this assignment.
    ///
    /// ```
    /// # use logicng_compile::datastructures::Assignment;
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.var("a");
    /// let b = f.var("b");
    ///
    /// let assignment = Assignment::from_variables(&[a], &[b]);
    ///
    /// assert_eq!(assignment.to_string(&f), "Assignment{pos=[a], neg=[b]}");
    /// ```
    pub fn to_string(&self, f: &FormulaFactory) -> String {
        let pos = self.pos.iter().sorted().map(|v| v.name(f)).join(", ");
        let neg = self.neg.iter().sorted().map(|v| v.name(f)).join(", ");
        format!("Assignment{{pos=[{pos}], neg=[{neg}]}}")
    }
}

impl Hash for Assignment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.pos.iter().map(|&v| var_hash(v)).sum::<Wrapping<u64>>().0);
        state.write_u64(self.neg.iter().map(|&v| var_hash(v)).sum::<Wrapping<u64>>().0);
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.neg == other.neg
    }
}

impl Eq for Assignment {}

impl From<&Assignment> for Model {
    fn from(assignment: &Assignment) -> Self {
        Self::new(assignment.pos.iter().copied().sorted().collect::<Vec<_>>(), assignment.neg.iter().copied().sorted().collect::<Vec<_>>())
    }
}

impl From<Assignment> for Model {
    fn from(assignment: Assignment) -> Self {
        Self::from(&assignment)
    }
}

fn var_hash(var: Variable) -> Wrapping<u64> {
    let hasher = &mut DefaultHasher::new();
    var.hash(hasher);
    Wrapping(hasher.finish())
}

pub(super) fn names_to_variables<C: FromIterator<Variable>>(names: &[&str], f: &FormulaFactory) -> Result<C, String> {
    names
        .iter()
        .map(|name| f.lookup_var(name).ok_or_else(|| format!("Variable {name} is not known in the given FormulaFactory")))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::datastructures::Assignment;
    use crate::formulas::FormulaFactory;
    use crate::util::test_util::{lits_list, vars_list};

    #[test]
    fn test_constructors() {
        let f = &FormulaFactory::new();
        let pos = vars_list("a b c", f);
        let neg = vars_list("x y", f);
        let ass1 = Assignment::from_variables(&pos, &neg);
        let ass2 = Assignment::from_literals(&lits_list("a b c ~x ~y", f));
        let ass3 = Assignment::from_names(&["a", "b", "c"], &["x", "y"], f).unwrap();
        assert_eq!(ass1, ass2);
        assert_eq!(ass1, ass3);
        assert_eq!(ass1.len(), 5);
        assert!(Assignment::from_names(&["unknown"], &[], f).is_err());
    }

    #[test]
    fn test_is_empty() {
        let f = &FormulaFactory::new();
        assert!(Assignment::default().is_empty());
        assert!(!Assignment::from_lit(f.lit("a", false)).is_empty());
    }

    #[test]
    fn test_contains_and_value_of() {
        let f = &FormulaFactory::new();
        let ass = Assignment::from_literals(&lits_list("a ~b", f));
        assert!(ass.contains(f.lit("a", true)));
        assert!(!ass.contains(f.lit("a", false)));
        assert!(ass.contains(f.lit("b", false)));
        assert_eq!(ass.value_of(f.var("a")), Some(true));
        assert_eq!(ass.value_of(f.var("b")), Some(false));
        assert_eq!(ass.value_of(f.var("c")), None);
    }

    #[test]
    fn test_restrict_lit() {
        let f = &FormulaFactory::new();
        let ass = Assignment::from_literals(&lits_list("a ~b", f));
        assert_eq!(ass.restrict_lit(f.lit("a", true)), f.verum());
        assert_eq!(ass.restrict_lit(f.lit("a", false)), f.falsum());
        assert_eq!(ass.restrict_lit(f.lit("b", false)), f.verum());
        assert_eq!(ass.restrict_lit(f.lit("c", false)), f.literal("c", false));
    }

    #[test]
    fn test_blocking_clause() {
        let f = &FormulaFactory::new();
        let ass = Assignment::from_literals(&lits_list("a ~b c", f));
        assert_eq!(ass.blocking_clause(f, None), f.or([f.literal("a", false), f.variable("b"), f.literal("c", false)]));
        let restricted = ass.blocking_clause(f, Some(&vars_list("a b x", f)));
        assert_eq!(restricted, f.or([f.literal("a", false), f.variable("b")]));
    }

    #[test]
    fn test_literals_are_sorted() {
        let f = &FormulaFactory::new();
        let literals = lits_list("a ~b c ~d", f);
        let ass = Assignment::from_literals(&[literals[3], literals[1], literals[2], literals[0]]);
        assert_eq!(ass.literals(), literals);
    }
}
