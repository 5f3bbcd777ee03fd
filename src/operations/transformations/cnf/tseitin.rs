use std::collections::HashMap;

use log::trace;

use crate::formulas::{EncodedFormula, FormulaFactory, FormulaType, Literal};
use crate::operations::functions::sub_nodes;
use crate::operations::transformations::{factorization_cnf, nnf, restrict_lit};
use crate::util::exceptions::panic_unexpected_formula_type;

/// Auxiliary variables and defining clauses of already encoded sub-formulas.
///
/// A state can be shared between several transformations, then equal
/// sub-formulas reuse their auxiliary variable.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub(super) struct TseitinState {
    formula: HashMap<EncodedFormula, EncodedFormula>,
    variable: HashMap<EncodedFormula, Literal>,
}

/// Computes the _Tseitin_ transformation of `formula`. Formulas with less
/// than `boundary` atoms are factorized instead.
pub(super) fn tseitin_cnf_with_boundary(formula: EncodedFormula, f: &FormulaFactory, boundary: u64, state: &mut TseitinState) -> EncodedFormula {
    let nnf = nnf(formula, f);
    if nnf.is_cnf(f) {
        nnf
    } else if nnf.number_of_atoms(f) < boundary {
        factorization_cnf(nnf, f)
    } else {
        for &sub in &*sub_nodes(nnf, f) {
            encode(sub, f, state);
        }
        trace!("Tseitin encoding uses {} auxiliary variables", state.variable.values().filter(|lit| lit.variable().is_auxiliary(f)).count());
        restrict_lit(state.formula[&nnf], state.variable[&nnf], f)
    }
}

/// Encodes `formula`, all of its operands must already be encoded.
fn encode(formula: EncodedFormula, f: &FormulaFactory, state: &mut TseitinState) {
    if state.formula.contains_key(&formula) {
        return;
    }
    if let Some(lit) = formula.as_literal() {
        state.formula.insert(formula, formula);
        state.variable.insert(formula, lit);
        return;
    }
    match formula.formula_type() {
        FormulaType::And | FormulaType::Or => {
            let aux = f.new_cnf_variable().pos_lit();
            let operands = formula.operands(f);
            let is_and = formula.is_and();
            let mut clauses: Vec<EncodedFormula> = Vec::with_capacity(operands.len() + 1);
            let mut long_clause: Vec<EncodedFormula> = Vec::with_capacity(operands.len() + 1);
            long_clause.push(if is_and { aux.into() } else { aux.negate().into() });
            for op in &operands {
                if !op.is_literal() {
                    clauses.push(state.formula[op]);
                }
                let op_lit = state.variable[op];
                if is_and {
                    clauses.push(f.or([EncodedFormula::from(aux.negate()), op_lit.into()]));
                    long_clause.push(op_lit.negate().into());
                } else {
                    clauses.push(f.or([EncodedFormula::from(aux), op_lit.negate().into()]));
                    long_clause.push(op_lit.into());
                }
            }
            clauses.push(f.or(long_clause));
            state.variable.insert(formula, aux);
            state.formula.insert(formula, f.and(clauses));
        }
        _ => panic_unexpected_formula_type(formula, Some(f)),
    }
}

#[cfg(test)]
mod tests {
    use crate::formulas::FormulaFactory;
    use crate::util::formula_randomizer::{FormulaRandomizer, FormulaRandomizerConfig};
    use crate::util::test_util::brute_force_equisatisfiable_projection;

    use super::{TseitinState, tseitin_cnf_with_boundary};

    #[test]
    fn test_simple_encoding() {
        let f = &FormulaFactory::new();
        let (a, b, x, y) = (f.variable("a"), f.variable("b"), f.variable("x"), f.variable("y"));
        let formula = f.not(f.equivalence(f.or([a, b]), f.or([x, y])));
        let mut state = TseitinState::default();
        let tseitin = tseitin_cnf_with_boundary(formula, f, 0, &mut state);
        assert!(tseitin.is_cnf(f));
        assert!(tseitin.variables(f).iter().any(|var| var.is_auxiliary(f)));
        assert!(brute_force_equisatisfiable_projection(formula, tseitin, f));
    }

    #[test]
    fn test_boundary_and_cnf_input() {
        let f = &FormulaFactory::new();
        let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
        let cnf = f.and([f.or([a, b]), c]);
        assert_eq!(tseitin_cnf_with_boundary(cnf, f, 0, &mut TseitinState::default()), cnf);
        let small = f.or([a, f.and([b, c])]);
        assert_eq!(tseitin_cnf_with_boundary(small, f, 12, &mut TseitinState::default()), f.and([f.or([a, b]), f.or([a, c])]));
    }

    #[test]
    fn test_shared_state_reuses_variables() {
        let f = &FormulaFactory::new();
        let (a, b, c, d) = (f.variable("a"), f.variable("b"), f.variable("c"), f.variable("d"));
        let formula = f.or([f.and([a, b]), f.and([c, d])]);
        let mut state = TseitinState::default();
        let first = tseitin_cnf_with_boundary(formula, f, 0, &mut state);
        let second = tseitin_cnf_with_boundary(formula, f, 0, &mut state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_formulas() {
        let f = &FormulaFactory::new();
        let mut randomizer = FormulaRandomizer::new(FormulaRandomizerConfig::default_with_num_vars(5).seed(3).maximum_operands(3));
        for _ in 0..30 {
            let formula = randomizer.formula(f, 2);
            let tseitin = tseitin_cnf_with_boundary(formula, f, 0, &mut TseitinState::default());
            assert!(tseitin.is_cnf(f));
            assert!(brute_force_equisatisfiable_projection(formula, tseitin, f));
        }
    }
}
