use crate::formulas::{EncodedFormula, FormulaFactory, Variable};

use super::restrict_lit;

/// Eliminates the given variables from `formula` by existential
/// quantification.
///
/// Each variable `x` is eliminated by replacing the current formula `g` with
/// `g[x/true] | g[x/false]`, one variable after the other. The result is
/// equivalent to the projection of `formula` onto the remaining variables.
/// Every eliminated variable can double the size of the formula.
///
/// The result is not cached, since it depends on the set of variables.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::transformations::exists;
/// let f = FormulaFactory::new();
/// let (a, b, c) = (f.variable("a"), f.variable("b"), f.variable("c"));
/// let formula = f.and([f.or([a, b]), f.or([f.literal("a", false), c])]);
///
/// assert_eq!(exists(formula, &[f.var("a")], &f), f.or([b, c]));
/// ```
pub fn exists(formula: EncodedFormula, variables: &[Variable], f: &FormulaFactory) -> EncodedFormula {
    eliminate(formula, variables, f, true)
}

/// Eliminates the given variables from `formula` by universal quantification,
/// i.e. every variable `x` is eliminated by `g[x/true] & g[x/false]`.
pub fn forall(formula: EncodedFormula, variables: &[Variable], f: &FormulaFactory) -> EncodedFormula {
    eliminate(formula, variables, f, false)
}

fn eliminate(formula: EncodedFormula, variables: &[Variable], f: &FormulaFactory, existential: bool) -> EncodedFormula {
    variables.iter().fold(formula, |current, &var| {
        let positive = restrict_lit(current, var.pos_lit(), f);
        let negative = restrict_lit(current, var.neg_lit(), f);
        if existential { f.or([positive, negative]) } else { f.and([positive, negative]) }
    })
}
