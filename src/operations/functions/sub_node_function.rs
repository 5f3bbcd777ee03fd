use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::formulas::{EncodedFormula, FormulaFactory};

/// A function that computes a vector of all sub-formulas of a given formula.
/// For example, applied on the formula `A & B | C` the sub-formulas are
///
/// - `A`
/// - `B`
/// - `A & B`
/// - `C`
/// - `A & B | C`
///
/// Each sub-formula is added exactly once to the vector. The order of the
/// sub-formulas in the result is bottom-up, i.e. a sub-formula only appears in
/// the result when all of its sub-formulas are already listed. The formula
/// itself is always the last element in the result.
///
/// # Example
///
/// Basic usage:
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::sub_nodes;
/// # let f = FormulaFactory::new();
/// let a = f.variable("a");
/// let nb = f.literal("b", false);
/// let formula = f.implication(f.and([a, nb]), f.or([a, f.variable("c")]));
///
/// let result = sub_nodes(formula, &f);
///
/// assert_eq!(result.len(), 6);
/// assert_eq!(result[0].to_string(&f), "a");
/// assert_eq!(result[1].to_string(&f), "~b");
/// assert_eq!(result[2].to_string(&f), "a & ~b");
/// assert_eq!(result[5], formula);
/// ```
pub fn sub_nodes(formula: EncodedFormula, f: &FormulaFactory) -> Arc<[EncodedFormula]> {
    let mut local_cache = HashMap::new();
    sub_nodes_cached(formula, f, &mut local_cache)
}

fn sub_nodes_cached(
    formula: EncodedFormula,
    f: &FormulaFactory,
    local_cache: &mut HashMap<EncodedFormula, Arc<[EncodedFormula]>>,
) -> Arc<[EncodedFormula]> {
    if let Some(v) = local_cache.get(&formula) {
        return Arc::clone(v);
    }
    if let Some(v) = f.caches.sub_nodes.get(formula) {
        return v;
    }

    let mut result = Vec::new();
    let mut result_set = HashSet::new();
    for op in formula.operands(f) {
        for &sub in &*sub_nodes_cached(op, f, local_cache) {
            if result_set.insert(sub) {
                result.push(sub);
            }
        }
    }
    result.push(formula);
    let rc: Arc<[_]> = Arc::from(result);
    if f.config.caches.sub_nodes {
        f.caches.sub_nodes.insert(formula, Arc::clone(&rc));
    } else {
        local_cache.insert(formula, Arc::clone(&rc));
    }
    rc
}

/// Returns the number of atomic formulas of this formula, counting each
/// occurrence. An atomic formula is a constant, a literal or a pseudo-boolean
/// constraint.
///
/// # Example
///
/// Basic usage:
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::number_of_atoms;
/// let f = FormulaFactory::new();
///
/// let a = f.variable("a");
/// let b = f.variable("b");
///
/// assert_eq!(number_of_atoms(f.verum(), &f), 1);
/// assert_eq!(number_of_atoms(f.implication(a, b), &f), 2);
/// assert_eq!(number_of_atoms(f.and([a, b, f.variable("c")]), &f), 3);
/// ```
pub fn number_of_atoms(formula: EncodedFormula, f: &FormulaFactory) -> u64 {
    if formula.is_atomic() {
        1
    } else if let Some(result) = f.caches.number_of_atoms.get(formula) {
        result
    } else {
        let result = formula.operands(f).iter().map(|op| number_of_atoms(*op, f)).sum();
        if f.config.caches.number_of_atoms {
            f.caches.number_of_atoms.insert(formula, result);
        }
        result
    }
}

/// Returns the number of distinct nodes of this formula as they exist in the
/// factory. So each atom is exactly one node, and shared sub-formulas are
/// only counted once.
pub fn number_of_internal_nodes(formula: EncodedFormula, f: &FormulaFactory) -> u64 {
    sub_nodes(formula, f).len() as u64
}

/// Returns the number of nodes of this formula, counting each occurrence.
///
/// Unlike [`number_of_internal_nodes`], this also counts the literals within
/// a pseudo-boolean constraint. For example, the constraint `a + b <= 1` is one
/// internal node, but `number_of_nodes` counts two additional nodes for `a` and
/// `b`.
pub fn number_of_nodes(formula: EncodedFormula, f: &FormulaFactory) -> u64 {
    1 + if formula.is_constant() || formula.is_literal() {
        0
    } else if let Some(result) = f.caches.number_of_nodes.get(formula) {
        result
    } else {
        let result = match formula.as_pbc(f) {
            Some(pbc) => pbc.literals.len() as u64,
            None => formula.operands(f).iter().map(|op| number_of_nodes(*op, f)).sum(),
        };
        if f.config.caches.number_of_nodes {
            f.caches.number_of_nodes.insert(formula, result);
        }
        result
    }
}
