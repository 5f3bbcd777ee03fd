use std::collections::{HashMap, HashSet};

use num_bigint::BigUint;

use crate::formulas::{EncodedFormula, FormulaFactory, Literal, Variable};
use crate::handlers::{ComputationHandler, LngEvent, NopHandler};

use super::sdd_apply::{ApplyMemo, SddOperation};
use super::sdd_kernel::{SddKernel, SddNode};
use super::sdd_main::Sdd;
use super::vtree::VTreeIndex;

impl SddKernel {
    /// Restricts an SDD to the assignment of the given literal.
    pub fn condition(&mut self, sdd: Sdd, literal: Literal) -> Sdd {
        self.assert_valid(sdd);
        let handler = &mut NopHandler::new();
        self.condition_rec(sdd, literal, &mut HashMap::new(), &mut ApplyMemo::new(), handler).expect("Nop Handler never aborts.")
    }

    fn condition_rec(
        &mut self,
        sdd: Sdd,
        literal: Literal,
        memo: &mut HashMap<Sdd, Sdd>,
        apply_memo: &mut ApplyMemo,
        handler: &mut dyn ComputationHandler,
    ) -> Result<Sdd, LngEvent> {
        let Some(leaf) = self.variable_leaf(literal.variable()) else {
            return Ok(sdd);
        };
        match self.node(sdd).clone() {
            SddNode::False | SddNode::True => Ok(sdd),
            SddNode::Literal { literal: own, .. } => {
                Ok(if own.variable() == literal.variable() { Sdd::constant(own == literal) } else { sdd })
            }
            SddNode::Decision { vtree, elements } => {
                if !self.vtree.is_descendant(leaf, vtree) {
                    return Ok(sdd);
                }
                if let Some(&result) = memo.get(&sdd) {
                    return Ok(result);
                }
                let mut result = Sdd::constant(false);
                for &(prime, sub) in &*elements {
                    let prime = self.condition_rec(prime, literal, memo, apply_memo, handler)?;
                    let sub = self.condition_rec(sub, literal, memo, apply_memo, handler)?;
                    let element = self.apply_rec(SddOperation::Conjunction, prime, sub, apply_memo, handler)?;
                    result = self.apply_rec(SddOperation::Disjunction, result, element, apply_memo, handler)?;
                }
                memo.insert(sdd, result);
                Ok(result)
            }
        }
    }

    /// Eliminates a variable by existential quantification.
    pub fn exists(&mut self, sdd: Sdd, variable: Variable) -> Sdd {
        let positive = self.condition(sdd, variable.pos_lit());
        let negative = self.condition(sdd, variable.neg_lit());
        self.apply(SddOperation::Disjunction, positive, negative)
    }

    /// Counts the models of an SDD over all variables of the vtree.
    pub fn model_count(&self, sdd: Sdd) -> BigUint {
        self.assert_valid(sdd);
        self.count_under(sdd, self.vtree.root(), &mut HashMap::new())
    }

    /// Counts the models over the variables below `vtree`, which must be
    /// the vtree node of `sdd` or one of its ancestors.
    fn count_under(&self, sdd: Sdd, vtree: VTreeIndex, memo: &mut HashMap<Sdd, BigUint>) -> BigUint {
        if sdd.is_falsum() {
            return BigUint::from(0_u8);
        }
        let all = self.vtree.number_of_variables(vtree);
        if sdd.is_verum() {
            return BigUint::from(1_u8) << all;
        }
        let own = self.vtree_of(sdd);
        self.count_at(sdd, memo) << (all - self.vtree.number_of_variables(own))
    }

    fn count_at(&self, sdd: Sdd, memo: &mut HashMap<Sdd, BigUint>) -> BigUint {
        if let Some(count) = memo.get(&sdd) {
            return count.clone();
        }
        let count = match self.node(sdd) {
            SddNode::Decision { vtree, elements } => {
                let (left, right) = self.vtree.children(*vtree).unwrap_or_else(|| panic!("SDD decision at a vtree leaf"));
                elements.iter().map(|&(prime, sub)| self.count_under(prime, left, memo) * self.count_under(sub, right, memo)).sum()
            }
            _ => BigUint::from(1_u8),
        };
        memo.insert(sdd, count.clone());
        count
    }

    /// Returns a formula equivalent to the SDD: every decision node becomes a
    /// disjunction of conjunctions of its primes and subs.
    pub fn to_formula(&self, sdd: Sdd, f: &FormulaFactory) -> EncodedFormula {
        self.assert_valid(sdd);
        self.to_formula_rec(sdd, f, &mut HashMap::new())
    }

    fn to_formula_rec(&self, sdd: Sdd, f: &FormulaFactory, memo: &mut HashMap<Sdd, EncodedFormula>) -> EncodedFormula {
        if let Some(&formula) = memo.get(&sdd) {
            return formula;
        }
        let formula = match self.node(sdd) {
            SddNode::False => f.falsum(),
            SddNode::True => f.verum(),
            SddNode::Literal { literal, .. } => EncodedFormula::from(*literal),
            SddNode::Decision { elements, .. } => {
                let terms: Vec<EncodedFormula> =
                    elements.iter().map(|&(prime, sub)| f.and([self.to_formula_rec(prime, f, memo), self.to_formula_rec(sub, f, memo)])).collect();
                f.or(terms)
            }
        };
        memo.insert(sdd, formula);
        formula
    }

    /// Returns the size of an SDD, which is the sum of the number of elements
    /// of all reachable decision nodes.
    pub fn size(&self, sdd: Sdd) -> usize {
        self.assert_valid(sdd);
        let mut visited = HashSet::new();
        let mut stack = vec![sdd];
        let mut size = 0;
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let SddNode::Decision { elements, .. } = self.node(node) {
                size += elements.len();
                for &(prime, sub) in &**elements {
                    stack.push(prime);
                    stack.push(sub);
                }
            }
        }
        size
    }
}
