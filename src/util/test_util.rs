#![allow(non_snake_case)]
#![allow(dead_code)]

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::datastructures::Assignment;
use crate::formulas::CType::{EQ, GE, GT, LE, LT};
use crate::formulas::{EncodedFormula, FormulaFactory, Literal, Variable};

pub fn vars(elements: &str, f: &FormulaFactory) -> BTreeSet<Variable> {
    elements.split(' ').map(|name| f.var(name)).collect()
}

pub fn vars_list(elements: &str, f: &FormulaFactory) -> Vec<Variable> {
    elements.split(' ').map(|name| f.var(name)).collect()
}

pub fn lits(elements: &str, f: &FormulaFactory) -> BTreeSet<Literal> {
    lits_list(elements, f).into_iter().collect()
}

pub fn lits_list(elements: &str, f: &FormulaFactory) -> Vec<Literal> {
    elements.split(' ').map(|name| name.strip_prefix('~').map_or_else(|| f.lit(name, true), |name| f.lit(name, false))).collect()
}

/// Enumerates all assignments over `variables`.
pub fn all_assignments(variables: &[Variable]) -> impl Iterator<Item = Assignment> + '_ {
    (0..variables.len()).map(|_| [true, false]).multi_cartesian_product().map(|values| {
        let mut assignment = Assignment::default();
        for (var, value) in variables.iter().zip(values) {
            assignment.add_literal(var.lit(value));
        }
        assignment
    })
}

/// Counts the models of `formula` over `variables` by evaluating every
/// assignment. `variables` must contain all variables of the formula.
pub fn brute_force_model_count(formula: EncodedFormula, variables: &[Variable], f: &FormulaFactory) -> u64 {
    if variables.is_empty() {
        return u64::from(formula.evaluate(&Assignment::default(), f));
    }
    all_assignments(variables).filter(|assignment| formula.evaluate(assignment, f)).count() as u64
}

/// Checks by evaluating every assignment over the variables of both formulas
/// whether the formulas are equivalent.
pub fn brute_force_equivalent(left: EncodedFormula, right: EncodedFormula, f: &FormulaFactory) -> bool {
    let variables: Vec<Variable> = left.variables(f).union(&right.variables(f)).copied().collect();
    if variables.is_empty() {
        let empty = Assignment::default();
        return left.evaluate(&empty, f) == right.evaluate(&empty, f);
    }
    all_assignments(&variables).all(|assignment| left.evaluate(&assignment, f) == right.evaluate(&assignment, f))
}

/// Checks whether `transformed` is satisfiable under exactly the assignments
/// which satisfy `original`, where `transformed` may contain additional
/// auxiliary variables.
pub fn brute_force_equisatisfiable_projection(original: EncodedFormula, transformed: EncodedFormula, f: &FormulaFactory) -> bool {
    let original_vars: Vec<Variable> = original.variables(f).iter().copied().collect();
    let extra_vars: Vec<Variable> = transformed.variables(f).iter().filter(|v| !original_vars.contains(v)).copied().collect();
    let check = |assignment: &Assignment| {
        let expected = original.evaluate(assignment, f);
        let actual = if extra_vars.is_empty() {
            transformed.evaluate(assignment, f)
        } else {
            all_assignments(&extra_vars).any(|extra| {
                let mut full = assignment.clone();
                extra.literals().into_iter().for_each(|lit| { full.add_literal(lit); });
                transformed.evaluate(&full, f)
            })
        };
        expected == actual
    };
    if original_vars.is_empty() { check(&Assignment::default()) } else { all_assignments(&original_vars).all(|a| check(&a)) }
}

#[allow(clippy::struct_field_names)]
pub struct F {
    pub(crate) f: FormulaFactory,
    pub(crate) g: FormulaFactory,

    // Constants
    pub(crate) TRUE: EncodedFormula,
    pub(crate) FALSE: EncodedFormula,

    // Literals
    pub(crate) A: EncodedFormula,
    pub(crate) B: EncodedFormula,
    pub(crate) C: EncodedFormula,
    pub(crate) D: EncodedFormula,
    pub(crate) X: EncodedFormula,
    pub(crate) Y: EncodedFormula,
    pub(crate) Z: EncodedFormula,
    pub(crate) NA: EncodedFormula,
    pub(crate) NB: EncodedFormula,
    pub(crate) NX: EncodedFormula,
    pub(crate) NY: EncodedFormula,

    // Disjunctions
    pub(crate) OR1: EncodedFormula,
    pub(crate) OR2: EncodedFormula,
    pub(crate) OR3: EncodedFormula,

    // Conjunctions
    pub(crate) AND1: EncodedFormula,
    pub(crate) AND2: EncodedFormula,
    pub(crate) AND3: EncodedFormula,

    // Negations
    pub(crate) NOT1: EncodedFormula,
    pub(crate) NOT2: EncodedFormula,

    // Implications
    pub(crate) IMP1: EncodedFormula,
    pub(crate) IMP2: EncodedFormula,
    pub(crate) IMP3: EncodedFormula,
    pub(crate) IMP4: EncodedFormula,

    // Equivalences
    pub(crate) EQ1: EncodedFormula,
    pub(crate) EQ2: EncodedFormula,
    pub(crate) EQ3: EncodedFormula,
    pub(crate) EQ4: EncodedFormula,

    // PBCs
    pub(crate) PBC1: EncodedFormula,
    pub(crate) PBC2: EncodedFormula,
    pub(crate) PBC3: EncodedFormula,
    pub(crate) PBC4: EncodedFormula,
    pub(crate) PBC5: EncodedFormula,
}

impl F {
    /// Creates the fixture in a caching factory `f`. `g` is a second,
    /// non-caching factory.
    pub(crate) fn new() -> Self {
        let f = FormulaFactory::new();
        let g = FormulaFactory::non_caching();
        let TRUE = f.verum();
        let FALSE = f.falsum();

        let A = f.variable("a");
        let B = f.variable("b");
        let C = f.variable("c");
        let D = f.variable("d");
        let X = f.variable("x");
        let Y = f.variable("y");
        let Z = f.variable("z");
        let NA = f.literal("a", false);
        let NB = f.literal("b", false);
        let NX = f.literal("x", false);
        let NY = f.literal("y", false);

        let OR1 = f.or([X, Y]);
        let OR2 = f.or([NX, NY]);
        let AND1 = f.and([A, B]);
        let AND2 = f.and([NA, NB]);

        let OR3 = f.or([AND1, AND2]);
        let AND3 = f.and([OR1, OR2]);

        let NOT1 = f.not(AND1);
        let NOT2 = f.not(OR1);

        let IMP1 = f.implication(A, B);
        let EQ1 = f.equivalence(A, B);
        let IMP2 = f.implication(NA, NB);
        let IMP3 = f.implication(AND1, OR1);

        let EQ5 = f.equivalence(NX, NY);
        let IMP4 = f.implication(EQ1, EQ5);

        let EQ2 = f.equivalence(NA, NB);
        let EQ3 = f.equivalence(AND1, OR1);
        let EQ4 = f.equivalence(IMP1, IMP2);

        let literals: Vec<Literal> = [A, B, C].iter().filter_map(|lit| lit.as_literal()).collect();
        let coefficients = vec![2_i64, -4, 3];
        let PBC1 = f.pbc(EQ, 2, literals.clone(), coefficients.clone());
        let PBC2 = f.pbc(GT, 2, literals.clone(), coefficients.clone());
        let PBC3 = f.pbc(GE, 2, literals.clone(), coefficients.clone());
        let PBC4 = f.pbc(LT, 2, literals.clone(), coefficients.clone());
        let PBC5 = f.pbc(LE, 2, literals, coefficients);
        Self {
            f,
            g,
            TRUE,
            FALSE,
            A,
            B,
            C,
            D,
            X,
            Y,
            Z,
            NA,
            NB,
            NX,
            NY,
            OR1,
            OR2,
            OR3,
            AND1,
            AND2,
            AND3,
            NOT1,
            NOT2,
            IMP1,
            IMP2,
            IMP3,
            IMP4,
            EQ1,
            EQ2,
            EQ3,
            EQ4,
            PBC1,
            PBC2,
            PBC3,
            PBC4,
            PBC5,
        }
    }
}
