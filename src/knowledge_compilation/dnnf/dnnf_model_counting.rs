use std::collections::{BTreeSet, HashMap};

use num_bigint::BigUint;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Variable};
use crate::util::exceptions::panic_unexpected_formula_type;

/// Counts the models of a deterministic DNNF over `original_variables`.
///
/// Conjunctions multiply the counts of their operands. Disjunctions add them,
/// after each operand is smoothed by the variables of the disjunction it
/// does not contain. Variables of the original formula which vanished during
/// the compilation double the count.
pub(super) fn count(original_variables: &BTreeSet<Variable>, dnnf: EncodedFormula, f: &FormulaFactory) -> BigUint {
    let simple = count_rec(dnnf, f, &mut HashMap::new());
    let dont_cares = original_variables.difference(&dnnf.variables(f)).count();
    simple << dont_cares
}

fn count_rec(dnnf: EncodedFormula, f: &FormulaFactory, cache: &mut HashMap<EncodedFormula, BigUint>) -> BigUint {
    if dnnf.is_falsum() {
        return BigUint::from(0_u8);
    }
    if dnnf.is_verum() || dnnf.is_literal() {
        return BigUint::from(1_u8);
    }
    if let Some(cached) = cache.get(&dnnf) {
        return cached.clone();
    }
    let result: BigUint = match dnnf.unpack(f) {
        Formula::And(ops) => ops.iter().map(|&op| count_rec(op, f, cache)).product(),
        Formula::Or(ops) => {
            let all_variables = dnnf.variables(f).len();
            ops.iter()
                .map(|&op| {
                    let missing = all_variables - op.variables(f).len();
                    count_rec(op, f, cache) << missing
                })
                .sum()
        }
        _ => panic_unexpected_formula_type(dnnf, Some(f)),
    };
    cache.insert(dnnf, result.clone());
    result
}
