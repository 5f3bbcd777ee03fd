use std::collections::HashMap;

use crate::formulas::{EncodedFormula, FormulaFactory};

/// Returns the depth of a formula's abstract syntax tree. Atoms (constants,
/// literals and pseudo-Boolean constraints) have depth zero, every operator
/// adds one level above its deepest operand.
///
/// The traversal uses an explicit stack, so arbitrarily nested formulas do
/// not overflow the call stack. Depths of all visited sub-formulas are stored
/// in the factory cache if
/// [`CacheConfig::formula_depth`](crate::formulas::CacheConfig::formula_depth)
/// is enabled.
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// # use logicng_compile::operations::functions::formula_depth;
/// let f = FormulaFactory::new();
/// let and = f.and([f.variable("a"), f.variable("b")]);
///
/// assert_eq!(formula_depth(f.variable("a"), &f), 0);
/// assert_eq!(formula_depth(and, &f), 1);
/// assert_eq!(formula_depth(f.or([and, f.variable("c")]), &f), 2);
/// ```
pub fn formula_depth(formula: EncodedFormula, f: &FormulaFactory) -> u64 {
    let mut depths: HashMap<EncodedFormula, u64> = HashMap::new();
    let mut stack = vec![(formula, false)];
    while let Some((current, expanded)) = stack.pop() {
        if depths.contains_key(&current) {
            continue;
        }
        if let Some(cached) = f.caches.formula_depth.get(current) {
            depths.insert(current, cached);
        } else if current.is_atomic() {
            depths.insert(current, 0);
        } else if expanded {
            let depth = 1 + current.operands(f).iter().map(|op| depths[op]).max().unwrap_or(0);
            if f.config.caches.formula_depth {
                f.caches.formula_depth.insert(current, depth);
            }
            depths.insert(current, depth);
        } else {
            stack.push((current, true));
            stack.extend(current.operands(f).into_iter().filter(|op| !depths.contains_key(op)).map(|op| (op, false)));
        }
    }
    depths[&formula]
}
