use std::collections::BTreeSet;
use std::sync::Arc;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Literal, Variable};
use crate::util::exceptions::panic_unexpected_formula_type;

/// Assuming this formula is a clause or term, it returns all literals in
/// this formula.
///
/// # Panic
///
/// This function panics, if the passed formula is not a clause or a term, a
/// literal or a constant.
///
/// # Example
///
/// Basic usage:
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::literals_for_clause_or_term;
/// let f = FormulaFactory::new();
///
/// let a = f.lit("a", false);
/// let b = f.lit("b", true);
/// let c = f.lit("c", true);
///
/// assert_eq!(literals_for_clause_or_term(f.verum(), &f), vec![]);
/// assert_eq!(literals_for_clause_or_term(a.into(), &f), vec![a]);
/// assert_eq!(literals_for_clause_or_term(f.term(&[a, b, c]), &f), vec![a, b, c]);
/// assert_eq!(literals_for_clause_or_term(f.clause(&[c, a, b]), &f), vec![a, b, c]);
/// ```
pub fn literals_for_clause_or_term(formula: EncodedFormula, f: &FormulaFactory) -> Vec<Literal> {
    match formula.unpack(f) {
        Formula::Or(ops) | Formula::And(ops) => ops
            .iter()
            .map(|l| l.as_literal().unwrap_or_else(|| panic!("Expected {} to be a clause or a term", formula.to_string(f))))
            .collect(),
        Formula::Lit(l) => vec![l],
        Formula::True | Formula::False => vec![],
        _ => panic_unexpected_formula_type(formula, Some(f)),
    }
}

/// Returns a set with all variables in this formula.
///
/// # Example
///
/// Basic usage:
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::variables;
/// # use std::collections::BTreeSet;
/// let f = FormulaFactory::new();
///
/// let a = f.var("a");
/// let b = f.var("b");
/// let c = f.var("c");
/// let formula = f.and([f.implication(a.into(), b.into()), f.literal("c", false)]);
///
/// assert_eq!(variables(formula, &f).as_ref(), &BTreeSet::from([a, b, c]));
/// ```
pub fn variables(formula: EncodedFormula, f: &FormulaFactory) -> Arc<BTreeSet<Variable>> {
    f.caches.variables.get(formula).unwrap_or_else(|| {
        let mut result = BTreeSet::new();
        match formula.unpack(f) {
            Formula::True | Formula::False => (),
            Formula::Lit(lit) => {
                result.insert(lit.variable());
            }
            Formula::Pbc(pbc) => result.extend(pbc.literals.iter().map(|lit| lit.variable())),
            _ => {
                for op in formula.operands(f) {
                    result.extend(variables(op, f).iter());
                }
            }
        }
        let rc = Arc::new(result);
        if f.config.caches.variables {
            f.caches.variables.insert(formula, Arc::clone(&rc));
        }
        rc
    })
}

/// Returns the names of all variables in this formula.
pub fn variable_names(formula: EncodedFormula, f: &FormulaFactory) -> BTreeSet<Arc<str>> {
    variables(formula, f).iter().map(|var| var.name(f)).collect()
}

/// Returns a set with all literals in this formula.
///
/// # Example
///
/// Basic usage:
///
/// ```
/// # use logicng_compile::formulas::{EncodedFormula, FormulaFactory};
/// # use logicng_compile::operations::functions::literals;
/// # use std::collections::BTreeSet;
/// let f = FormulaFactory::new();
///
/// let a = f.lit("a", true);
/// let na = f.lit("a", false);
/// let c = f.lit("c", false);
/// let formula = f.and([f.or::<[EncodedFormula; 2], EncodedFormula>([a.into(), c.into()]), na.into()]);
///
/// assert_eq!(literals(formula, &f).as_ref(), &BTreeSet::from([a, na, c]));
/// ```
pub fn literals(formula: EncodedFormula, f: &FormulaFactory) -> Arc<BTreeSet<Literal>> {
    f.caches.literals.get(formula).unwrap_or_else(|| {
        let mut result = BTreeSet::new();
        match formula.unpack(f) {
            Formula::True | Formula::False => (),
            Formula::Lit(l) => {
                result.insert(l);
            }
            Formula::Pbc(pbc) => result.extend(pbc.literals.iter().copied()),
            _ => {
                for op in formula.operands(f) {
                    result.extend(literals(op, f).iter());
                }
            }
        }
        let rc = Arc::new(result);
        if f.config.caches.literals {
            f.caches.literals.insert(formula, Arc::clone(&rc));
        }
        rc
    })
}
