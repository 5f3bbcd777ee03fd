use std::collections::HashMap;
use std::fmt::Display;

use crate::datastructures::Assignment;
use crate::formulas::{EncodedFormula, FormulaFactory, Literal};

/// Comparison types for pseudo-Boolean constraints.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum CType {
    /// equals
    EQ,
    /// greater than
    GT,
    /// greater equals
    GE,
    /// less than
    LT,
    /// less equals
    LE,
}

impl Display for CType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::EQ => "=",
            Self::GT => ">",
            Self::GE => ">=",
            Self::LT => "<",
            Self::LE => "<=",
        })
    }
}

/// A pseudo-boolean constraint `c_1 * l_1 + ... + c_n * l_n ~ k` over literals
/// `l_i`, integer coefficients `c_i`, a comparator `~` and a right-hand side
/// `k`.
///
/// `PbConstraint` has no public constructor. Use [`FormulaFactory::pbc`] to
/// create a constraint as formula, and [`EncodedFormula::as_pbc`] to access it.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct PbConstraint {
    /// literals on the left side of the pseudo-boolean constraint.
    pub literals: Box<[Literal]>,
    /// coefficients of the pseudo-boolean constraint.
    pub coefficients: Box<[i64]>,
    /// comparator of the pseudo-boolean constraint.
    pub comparator: CType,
    /// value on the right side of the pseudo-boolean constraint.
    pub rhs: i64,
}

impl PbConstraint {
    pub(crate) fn new(literals: Box<[Literal]>, coefficients: Box<[i64]>, comparator: CType, rhs: i64) -> Self {
        assert_eq!(
            literals.len(),
            coefficients.len(),
            "Cannot create a pseudo-boolean constraint with {} literals and {} coefficients",
            literals.len(),
            coefficients.len()
        );
        Self { literals, coefficients, comparator, rhs }
    }

    /// Evaluates this constraint based on `assignment`.
    ///
    /// Any literal not covered by `assignment` evaluates to `false` if it is
    /// positive, or to `true` if it is negative.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        let lhs: i64 = self
            .literals
            .iter()
            .zip(self.coefficients.iter())
            .filter(|(lit, _)| assignment.evaluate_lit(**lit))
            .map(|(_, coeff)| *coeff)
            .sum();
        evaluate_comparator(lhs, self.comparator, self.rhs)
    }

    /// Restricts this constraint with the given assignment.
    pub fn restrict(&self, assignment: &Assignment, f: &FormulaFactory) -> EncodedFormula {
        let mut fixed = 0;
        let mut literals = Vec::new();
        let mut coefficients = Vec::new();
        for (lit, coeff) in self.literals.iter().zip(self.coefficients.iter()) {
            match assignment.value_of(lit.variable()) {
                Some(value) => {
                    if value == lit.phase() {
                        fixed += coeff;
                    }
                }
                None => {
                    literals.push(*lit);
                    coefficients.push(*coeff);
                }
            }
        }
        f.pbc(self.comparator, self.rhs - fixed, literals, coefficients)
    }

    /// Returns the negation of this constraint.
    pub fn negate(&self, f: &FormulaFactory) -> EncodedFormula {
        let pbc = |comparator| f.pbc(comparator, self.rhs, self.literals.clone(), self.coefficients.clone());
        match self.comparator {
            CType::EQ => f.or([pbc(CType::LT), pbc(CType::GT)]),
            CType::GT => pbc(CType::LE),
            CType::GE => pbc(CType::LT),
            CType::LT => pbc(CType::GE),
            CType::LE => pbc(CType::GT),
        }
    }

    /// Expands this constraint into an equivalent formula without
    /// pseudo-boolean constraints and without auxiliary variables.
    ///
    /// The expansion branches on the literals in their order and shares all
    /// branches with the same partial sum, so its size is bounded by the
    /// number of literals times the number of distinct partial sums.
    pub fn expand(&self, f: &FormulaFactory) -> EncodedFormula {
        let n = self.literals.len();
        let mut min_rest = vec![0; n + 1];
        let mut max_rest = vec![0; n + 1];
        for i in (0..n).rev() {
            let coeff = self.coefficients[i];
            min_rest[i] = min_rest[i + 1] + coeff.min(0);
            max_rest[i] = max_rest[i + 1] + coeff.max(0);
        }
        let mut cache = HashMap::new();
        self.expand_rec(0, 0, &min_rest, &max_rest, &mut cache, f)
    }

    fn expand_rec(
        &self,
        index: usize,
        sum: i64,
        min_rest: &[i64],
        max_rest: &[i64],
        cache: &mut HashMap<(usize, i64), EncodedFormula>,
        f: &FormulaFactory,
    ) -> EncodedFormula {
        let low = sum + min_rest[index];
        let high = sum + max_rest[index];
        if let Some(value) = decided(low, high, self.comparator, self.rhs) {
            return f.constant(value);
        }
        if let Some(cached) = cache.get(&(index, sum)) {
            return *cached;
        }
        let lit = self.literals[index];
        let positive = self.expand_rec(index + 1, sum + self.coefficients[index], min_rest, max_rest, cache, f);
        let negative = self.expand_rec(index + 1, sum, min_rest, max_rest, cache, f);
        let result = if positive == negative {
            positive
        } else {
            f.or([f.and([EncodedFormula::from(lit), positive]), f.and([EncodedFormula::from(lit.negate()), negative])])
        };
        cache.insert((index, sum), result);
        result
    }

    /// Converts this constraint into a string representation, e.g.
    /// `2*a + ~b >= 2`.
    pub fn to_string(&self, f: &FormulaFactory) -> String {
        let lhs = self
            .literals
            .iter()
            .zip(self.coefficients.iter())
            .map(|(lit, coeff)| if *coeff == 1 { lit.to_string(f) } else { format!("{coeff}*{}", lit.to_string(f)) })
            .collect::<Vec<String>>()
            .join(" + ");
        format!("{lhs} {} {}", self.comparator, self.rhs)
    }
}

/// Returns the value of `lhs ~ rhs` for the comparator `~`.
pub const fn evaluate_comparator(lhs: i64, comparator: CType, rhs: i64) -> bool {
    match comparator {
        CType::EQ => lhs == rhs,
        CType::GT => lhs > rhs,
        CType::GE => lhs >= rhs,
        CType::LT => lhs < rhs,
        CType::LE => lhs <= rhs,
    }
}

/// If the comparison yields the same value for all left-hand sides in
/// `[low, high]`, this value is returned.
pub(crate) const fn decided(low: i64, high: i64, comparator: CType, rhs: i64) -> Option<bool> {
    match comparator {
        CType::EQ => {
            if rhs < low || rhs > high {
                Some(false)
            } else if low == high {
                Some(true)
            } else {
                None
            }
        }
        _ => {
            let low_value = evaluate_comparator(low, comparator, rhs);
            if low_value == evaluate_comparator(high, comparator, rhs) { Some(low_value) } else { None }
        }
    }
}
