use std::collections::HashMap;

use crate::formulas::{EncodedFormula, Formula, FormulaFactory, PbConstraint};

/// Constructs the _NNF_ of `formula`.
///
/// Negations are pushed down to the literals, implications and equivalences
/// are expanded, and pseudo-boolean constraints are replaced by their
/// expansion. The result only consists of constants, literals, conjunctions
/// and disjunctions.
///
/// [`FormulaFactory`] also provides this transformation as a method. So you
/// can also use `f.nnf(formula)` instead of `nnf(formula, f)`.
///
/// # Examples
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::transformations::nnf;
/// let f = FormulaFactory::new();
///
/// let formula = f.implication(f.variable("a"), f.variable("b"));
/// let nnf = nnf(formula, &f);
///
/// assert_eq!(nnf.to_string(&f), "~a | b");
/// ```
pub fn nnf(formula: EncodedFormula, f: &FormulaFactory) -> EncodedFormula {
    nnf_rec(formula, true, f, &mut HashMap::new())
}

fn nnf_rec(
    formula: EncodedFormula,
    polarity: bool,
    f: &FormulaFactory,
    local: &mut HashMap<(EncodedFormula, bool), EncodedFormula>,
) -> EncodedFormula {
    if polarity {
        if let Some(cached) = f.caches.nnf.get(formula) {
            return cached;
        }
    }
    if let Some(&cached) = local.get(&(formula, polarity)) {
        return cached;
    }

    let result = match formula.unpack(f) {
        Formula::True | Formula::False | Formula::Lit(_) => {
            if polarity {
                formula
            } else {
                f.not(formula)
            }
        }
        Formula::Not(op) => nnf_rec(op, !polarity, f, local),
        Formula::And(ops) | Formula::Or(ops) => {
            let new_ops: Vec<_> = ops.iter().map(|&op| nnf_rec(op, polarity, f, local)).collect();
            if formula.is_and() == polarity { f.and(new_ops) } else { f.or(new_ops) }
        }
        Formula::Impl((left, right)) => {
            if polarity {
                f.or([nnf_rec(left, false, f, local), nnf_rec(right, true, f, local)])
            } else {
                f.and([nnf_rec(left, true, f, local), nnf_rec(right, false, f, local)])
            }
        }
        Formula::Equiv((left, right)) => {
            let left_pos = nnf_rec(left, true, f, local);
            let left_neg = nnf_rec(left, false, f, local);
            let right_pos = nnf_rec(right, true, f, local);
            let right_neg = nnf_rec(right, false, f, local);
            if polarity {
                f.and([f.or([left_neg, right_pos]), f.or([left_pos, right_neg])])
            } else {
                f.and([f.or([left_neg, right_neg]), f.or([left_pos, right_pos])])
            }
        }
        Formula::Pbc(pbc) => {
            let expansion = expand_pbc(formula, &pbc, f);
            nnf_rec(expansion, polarity, f, local)
        }
    };

    if polarity && f.config.caches.nnf {
        f.caches.nnf.insert(formula, result);
        if f.config.caches.is_nnf {
            f.caches.is_nnf.insert(result, true);
        }
    }
    local.insert((formula, polarity), result);
    result
}

fn expand_pbc(formula: EncodedFormula, pbc: &PbConstraint, f: &FormulaFactory) -> EncodedFormula {
    if let Some(cached) = f.caches.pbc_expansion.get(formula) {
        return cached;
    }
    let expansion = pbc.expand(f);
    if f.config.caches.pbc_expansion {
        f.caches.pbc_expansion.insert(formula, expansion);
    }
    expansion
}
