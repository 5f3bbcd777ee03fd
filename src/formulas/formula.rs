use std::collections::BTreeSet;
use std::sync::Arc;

use crate::datastructures::Assignment;
use crate::formulas::{FormulaFactory, LitType, Literal, PbConstraint, Variable};
use crate::operations::{functions, predicates};

use super::formula_cache::formula_encoding::FormulaEncoding;

/// Specifies all types a [`EncodedFormula`] can have.
///
/// You can get the type of an `EncodedFormula` by calling [`EncodedFormula::formula_type()`].
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum FormulaType {
    /// Pseudo-boolean constraint
    Pbc,
    /// Equivalence
    Equiv,
    /// Implication
    Impl,
    /// Disjunction
    Or,
    /// Conjunction
    And,
    /// Negation
    Not,
    /// Literal and type of the literal
    Lit(LitType),
    /// Constant true
    True,
    /// Constant false
    False,
}

/// A unpacked representation of an [`EncodedFormula`]. Allows access to the
/// operands of the formula.
///
/// You can obtain a `Formula` from a `EncodedFormula` by calling [`EncodedFormula::unpack()`].
#[derive(Clone, Hash, Eq, PartialEq, Debug)]
pub enum Formula {
    /// Pseudo-boolean constraint
    Pbc(Arc<PbConstraint>),
    /// Operands of an equivalence
    Equiv((EncodedFormula, EncodedFormula)),
    /// Operands of an implication
    Impl((EncodedFormula, EncodedFormula)),
    /// Operands of a disjunction in canonical order
    Or(Arc<[EncodedFormula]>),
    /// Operands of a conjunction in canonical order
    And(Arc<[EncodedFormula]>),
    /// Operand of a negation
    Not(EncodedFormula),
    /// Literal
    Lit(Literal),
    /// Constant true
    True,
    /// Constant false
    False,
}

/// `EncodedFormula` represents a logical formula.
///
/// An `EncodedFormula` instance does not contain much information. It is
/// instead a handle into a [`FormulaFactory`] which stores the information
/// about that formula. This means that **an `EncodedFormula` is only useful in the
/// context of the `FormulaFactory` it was created in.** Use
/// [`FormulaFactory::import`] to move a formula into another factory.
///
/// Since an `EncodedFormula` is technically only a typed index, it also
/// implements the [`Copy`] trait. In a hash-consing factory, two handles are
/// equal if and only if the formulas are structurally equal.
#[derive(Eq, Hash, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct EncodedFormula {
    pub(crate) encoding: FormulaEncoding,
}

pub(crate) const LIT_PRECEDENCE: u8 = 7;

impl EncodedFormula {
    /// Creates a new constant `true` or `false` based on `value`.
    ///
    /// Note that, a constant is the only type of a formula, that does not need
    /// a [`FormulaFactory`].
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use logicng_compile::formulas::{EncodedFormula, FormulaType};
    /// let verum = EncodedFormula::constant(true);
    /// let falsum = EncodedFormula::constant(false);
    ///
    /// assert_eq!(verum.formula_type(), FormulaType::True);
    /// assert_eq!(falsum.formula_type(), FormulaType::False);
    /// ```
    pub const fn constant(value: bool) -> Self {
        let ty = if value { FormulaType::True } else { FormulaType::False };
        Self { encoding: FormulaEncoding::encode(0, ty) }
    }

    /// Returns the type of this formula.
    pub fn formula_type(self) -> FormulaType {
        self.encoding.formula_type()
    }

    /// Unpacks this formula, such that the operands and other data stored in
    /// the [`FormulaFactory`] can be accessed.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use logicng_compile::formulas::{FormulaFactory, Formula};
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.variable("a");
    /// let b = f.variable("b");
    /// let formula = f.and([a, b]);
    ///
    /// match formula.unpack(&f) {
    ///     Formula::And(ops) => assert_eq!(&*ops, &[a, b]),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn unpack(self, f: &FormulaFactory) -> Formula {
        f.unpack(self)
    }

    /// Returns `true` if both formulas have the same type.
    pub fn same_type(self, other: Self) -> bool {
        self.formula_type() == other.formula_type()
    }

    /// Returns `true` if this formula is the constant `false`.
    pub fn is_falsum(self) -> bool {
        self.formula_type() == FormulaType::False
    }

    /// Returns `true` if this formula is the constant `true`.
    pub fn is_verum(self) -> bool {
        self.formula_type() == FormulaType::True
    }

    /// Returns `true` if this formula is a constant.
    pub fn is_constant(self) -> bool {
        matches!(self.formula_type(), FormulaType::True | FormulaType::False)
    }

    /// Returns `true` if this formula is a positive literal.
    pub fn is_variable(self) -> bool {
        self.formula_type() == FormulaType::Lit(LitType::Pos)
    }

    /// Returns `true` if this formula is a negative literal.
    pub fn is_negative_literal(self) -> bool {
        self.formula_type() == FormulaType::Lit(LitType::Neg)
    }

    /// Returns `true` if this formula is a literal.
    pub fn is_literal(self) -> bool {
        matches!(self.formula_type(), FormulaType::Lit(_))
    }

    /// Returns `true` if this formula is a pseudo-boolean constraint.
    pub fn is_pbc(self) -> bool {
        self.formula_type() == FormulaType::Pbc
    }

    /// Returns `true` if this formula is a constant, a literal or a
    /// pseudo-boolean constraint.
    pub fn is_atomic(self) -> bool {
        self.is_constant() || self.is_literal() || self.is_pbc()
    }

    /// Returns `true` if this formula is a conjunction.
    pub fn is_and(self) -> bool {
        self.formula_type() == FormulaType::And
    }

    /// Returns `true` if this formula is a disjunction.
    pub fn is_or(self) -> bool {
        self.formula_type() == FormulaType::Or
    }

    /// Returns `true` if this formula is a conjunction or a disjunction.
    pub fn is_nary_operator(self) -> bool {
        self.is_and() || self.is_or()
    }

    /// Returns `true` if this formula is an implication.
    pub fn is_impl(self) -> bool {
        self.formula_type() == FormulaType::Impl
    }

    /// Returns `true` if this formula is an equivalence.
    pub fn is_equiv(self) -> bool {
        self.formula_type() == FormulaType::Equiv
    }

    /// Returns `true` if this formula is an implication or an equivalence.
    pub fn is_binary_operator(self) -> bool {
        self.is_impl() || self.is_equiv()
    }

    /// Returns `true` if this formula is a negation.
    pub fn is_not(self) -> bool {
        self.formula_type() == FormulaType::Not
    }

    /// Returns `true` if this formula is in negation normal form.
    pub fn is_nnf(self, f: &FormulaFactory) -> bool {
        predicates::is_nnf(self, f)
    }

    /// Returns `true` if this formula is in conjunctive normal form.
    pub fn is_cnf(self, f: &FormulaFactory) -> bool {
        predicates::is_cnf(self, f)
    }

    /// Returns `true` if this formula is in disjunctive normal form.
    pub fn is_dnf(self, f: &FormulaFactory) -> bool {
        predicates::is_dnf(self, f)
    }

    /// Returns the direct operands of this formula. Atomic formulas have no
    /// operands; the operands of a pseudo-boolean constraint are not formulas.
    pub fn operands(self, f: &FormulaFactory) -> Vec<Self> {
        match self.unpack(f) {
            Formula::And(ops) | Formula::Or(ops) => ops.to_vec(),
            Formula::Impl((left, right)) | Formula::Equiv((left, right)) => vec![left, right],
            Formula::Not(op) => vec![op],
            Formula::Lit(_) | Formula::True | Formula::False | Formula::Pbc(_) => vec![],
        }
    }

    /// Returns the number of direct operands of this formula.
    pub fn number_of_operands(self, f: &FormulaFactory) -> usize {
        self.operands(f).len()
    }

    /// Returns all variables occurring in this formula.
    pub fn variables(self, f: &FormulaFactory) -> Arc<BTreeSet<Variable>> {
        functions::variables(self, f)
    }

    /// Returns all literals occurring in this formula.
    pub fn literals(self, f: &FormulaFactory) -> Arc<BTreeSet<Literal>> {
        functions::literals(self, f)
    }

    /// Returns the number of atoms (constants, literals and pseudo-boolean
    /// constraints) of this formula, counting each occurrence.
    pub fn number_of_atoms(self, f: &FormulaFactory) -> u64 {
        functions::number_of_atoms(self, f)
    }

    /// Returns the number of nodes of this formula, counting each occurrence.
    pub fn number_of_nodes(self, f: &FormulaFactory) -> u64 {
        functions::number_of_nodes(self, f)
    }

    /// Returns `true` if the given variable occurs in this formula.
    pub fn contains_variable(self, variable: Variable, f: &FormulaFactory) -> bool {
        self.variables(f).contains(&variable)
    }

    /// Returns this formula as literal, if it is a literal.
    pub fn as_literal(self) -> Option<Literal> {
        let variable = Variable::from_index(self.encoding.index());
        match self.formula_type() {
            FormulaType::Lit(LitType::Pos) => Some(Literal::Pos(variable)),
            FormulaType::Lit(LitType::Neg) => Some(Literal::Neg(variable)),
            _ => None,
        }
    }

    /// Returns this formula as variable, if it is a positive literal.
    pub fn as_variable(self) -> Option<Variable> {
        Variable::try_from(self).ok()
    }

    /// Returns the pseudo-boolean constraint, if this formula is one.
    pub fn as_pbc(self, f: &FormulaFactory) -> Option<Arc<PbConstraint>> {
        match self.unpack(f) {
            Formula::Pbc(pbc) => Some(pbc),
            _ => None,
        }
    }

    /// Evaluates this formula under the given assignment. Variables which are
    /// not assigned are treated as `false`.
    pub fn evaluate(self, assignment: &Assignment, f: &FormulaFactory) -> bool {
        match self.unpack(f) {
            Formula::True => true,
            Formula::False => false,
            Formula::Lit(lit) => assignment.evaluate_lit(lit),
            Formula::Not(op) => !op.evaluate(assignment, f),
            Formula::And(ops) => ops.iter().all(|op| op.evaluate(assignment, f)),
            Formula::Or(ops) => ops.iter().any(|op| op.evaluate(assignment, f)),
            Formula::Impl((left, right)) => !left.evaluate(assignment, f) || right.evaluate(assignment, f),
            Formula::Equiv((left, right)) => left.evaluate(assignment, f) == right.evaluate(assignment, f),
            Formula::Pbc(pbc) => pbc.evaluate(assignment),
        }
    }

    /// Converts this formula into a string representation.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.variable("a");
    /// let b = f.variable("b");
    /// let c = f.literal("c", false);
    /// let formula = f.implication(f.or([a, b]), f.and([c, f.or([a, c])]));
    ///
    /// assert_eq!(formula.to_string(&f), "a | b => ~c & (a | ~c)");
    /// ```
    pub fn to_string(self, f: &FormulaFactory) -> String {
        match self.unpack(f) {
            Formula::True => "$true".to_string(),
            Formula::False => "$false".to_string(),
            Formula::Lit(lit) => lit.to_string(f),
            Formula::And(_) => self.nary_to_string(" & ", f),
            Formula::Or(_) => self.nary_to_string(" | ", f),
            Formula::Not(op) => format!("~({})", op.to_string(f)),
            Formula::Impl(_) => self.nary_to_string(" => ", f),
            Formula::Equiv(_) => self.nary_to_string(" <=> ", f),
            Formula::Pbc(pbc) => pbc.to_string(f),
        }
    }

    pub(crate) fn precedence(self) -> u8 {
        use FormulaType::{And, Equiv, False, Impl, Lit, Not, Or, Pbc, True};
        match self.formula_type() {
            Pbc => 0,
            Equiv => 2,
            Impl => 3,
            Or => 4,
            And => 5,
            Not => 6,
            Lit(_) => LIT_PRECEDENCE,
            True => 8,
            False => 9,
        }
    }

    fn nary_to_string(self, op_char: &str, f: &FormulaFactory) -> String {
        let mut result = String::new();
        for (i, op) in self.operands(f).iter().enumerate() {
            if i > 0 {
                result.push_str(op_char);
            }
            if self.precedence() >= op.precedence() {
                result.push_str(&format!("({})", op.to_string(f)));
            } else {
                result.push_str(&op.to_string(f));
            }
        }
        result
    }
}

impl From<FormulaEncoding> for EncodedFormula {
    fn from(encoding: FormulaEncoding) -> Self {
        Self { encoding }
    }
}
