use std::collections::HashMap;

use crate::datastructures::Assignment;
use crate::formulas::{EncodedFormula, Formula, FormulaFactory, Literal};

/// Restricts `formula` with the given assignment, i.e. replaces every assigned
/// variable by the constant of its value.
///
/// [`FormulaFactory`] also provides this transformation as a method. So you
/// can also use `f.restrict(formula, assignment)` instead of `restrict(formula,
/// assignment, f)`.
///
/// # Examples
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::datastructures::Assignment;
/// # use logicng_compile::operations::transformations::restrict;
/// let f = FormulaFactory::new();
///
/// let a = f.var("a");
/// let formula = f.and([f.variable("a"), f.variable("b")]);
///
/// let assignment1 = Assignment::from_variables(&[a], &[]);
/// let assignment2 = Assignment::from_variables(&[], &[a]);
///
/// assert_eq!(restrict(formula, &assignment1, &f).to_string(&f), "b");
/// assert_eq!(restrict(formula, &assignment2, &f).to_string(&f), "$false");
/// ```
pub fn restrict(formula: EncodedFormula, assignment: &Assignment, f: &FormulaFactory) -> EncodedFormula {
    if assignment.is_empty() {
        return formula;
    }
    restrict_rec(formula, assignment, f, &mut HashMap::new())
}

/// Restricts `formula` with a single literal, i.e. replaces the variable of
/// `lit` by `true` if the literal is positive and by `false` otherwise.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::transformations::restrict_lit;
/// let f = FormulaFactory::new();
///
/// let formula = f.or([f.and([f.variable("a"), f.variable("b")]), f.variable("c")]);
///
/// assert_eq!(restrict_lit(formula, f.lit("a", true), &f).to_string(&f), "b | c");
/// assert_eq!(restrict_lit(formula, f.lit("a", false), &f).to_string(&f), "c");
/// ```
pub fn restrict_lit(formula: EncodedFormula, lit: Literal, f: &FormulaFactory) -> EncodedFormula {
    restrict_rec(formula, &Assignment::from_lit(lit), f, &mut HashMap::new())
}

fn restrict_rec(
    formula: EncodedFormula,
    assignment: &Assignment,
    f: &FormulaFactory,
    memo: &mut HashMap<EncodedFormula, EncodedFormula>,
) -> EncodedFormula {
    if formula.is_constant() {
        return formula;
    }
    if let Some(&cached) = memo.get(&formula) {
        return cached;
    }
    let result = match formula.unpack(f) {
        Formula::True | Formula::False => formula,
        Formula::Lit(lit) => assignment.restrict_lit(lit),
        Formula::Not(op) => {
            let op = restrict_rec(op, assignment, f, memo);
            f.not(op)
        }
        Formula::And(ops) | Formula::Or(ops) => {
            let new_ops: Vec<_> = ops.iter().map(|&op| restrict_rec(op, assignment, f, memo)).collect();
            if formula.is_and() { f.and(new_ops) } else { f.or(new_ops) }
        }
        Formula::Impl((left, right)) => {
            let left = restrict_rec(left, assignment, f, memo);
            let right = restrict_rec(right, assignment, f, memo);
            f.implication(left, right)
        }
        Formula::Equiv((left, right)) => {
            let left = restrict_rec(left, assignment, f, memo);
            let right = restrict_rec(right, assignment, f, memo);
            f.equivalence(left, right)
        }
        Formula::Pbc(pbc) => pbc.restrict(assignment, f),
    };
    memo.insert(formula, result);
    result
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use crate::datastructures::Assignment;
    use crate::util::test_util::F;

    use super::{restrict, restrict_lit};

    #[test]
    fn test_restrict_compounds() {
        let F = F::new();
        let f = &F.f;
        let assignment = Assignment::from_variables(&[f.var("a")], &[f.var("x")]);
        assert_eq!(restrict(F.AND1, &assignment, f), F.B);
        assert_eq!(restrict(F.OR1, &assignment, f), F.Y);
        assert_eq!(restrict(F.IMP3, &assignment, f), f.implication(F.B, F.Y));
        assert_eq!(restrict(F.EQ1, &assignment, f), F.B);
        assert_eq!(restrict(F.NOT1, &assignment, f), F.NB);
        assert_eq!(restrict(F.AND2, &assignment, f), F.FALSE);
        assert_eq!(restrict(F.OR2, &assignment, f), F.TRUE);
        assert_eq!(restrict(F.EQ4, &Assignment::default(), f), F.EQ4);
    }

    #[test]
    fn test_restrict_lit_agrees_with_restrict() {
        let F = F::new();
        let f = &F.f;
        for formula in [F.AND3, F.OR3, F.IMP4, F.EQ3, F.NOT2, F.PBC2] {
            for lit in [f.lit("a", true), f.lit("a", false), f.lit("x", true), f.lit("y", false)] {
                assert_eq!(restrict_lit(formula, lit, f), restrict(formula, &Assignment::from_lit(lit), f));
            }
        }
    }
}
