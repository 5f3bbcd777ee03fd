use crate::formulas::{EncodedFormula, FormulaFactory, Literal};

use super::bdd_kernel::{BddKernel, BDD_FALSE, BDD_TRUE};

/// Computes a CNF/DNF from the given BDD.
///
/// For a CNF every path to the false terminal yields the clause which
/// excludes it, for a DNF every path to the true terminal yields a term.
pub fn normal_form(root: usize, cnf: bool, f: &FormulaFactory, kernel: &BddKernel) -> EncodedFormula {
    let paths = kernel.all_paths(root, if cnf { BDD_FALSE } else { BDD_TRUE });
    let mut terms = Vec::with_capacity(paths.len());
    for path in paths {
        let literals: Vec<Literal> = path
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| {
                let value = (*value)?;
                let var = kernel.get_variable_for_index(idx)?;
                Some(var.lit(value != cnf))
            })
            .collect();
        terms.push(if cnf { f.clause(&literals) } else { f.term(&literals) });
    }
    if cnf { f.and(&terms) } else { f.or(&terms) }
}
