use std::collections::BTreeMap;

use bitvec::vec::BitVec;

use crate::formulas::{EncodedFormula, FormulaFactory, Literal, Variable};

/// Index of a variable in a [`DnnfPropagator`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DnnfVar(pub usize);

/// Literal of a [`DnnfPropagator`]: `2 * var` for the positive and
/// `2 * var + 1` for the negative literal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DnnfLit(pub usize);

impl DnnfLit {
    pub const fn new(var: DnnfVar, phase: bool) -> Self {
        Self(2 * var.0 + if phase { 0 } else { 1 })
    }

    pub const fn var(self) -> DnnfVar {
        DnnfVar(self.0 >> 1)
    }

    pub const fn phase(self) -> bool {
        self.0 & 1 == 0
    }

    #[must_use]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ 1)
    }
}

/// Unit propagation over the clauses of a CNF with a trail of assigned
/// literals and decision levels.
///
/// Variables are indexed in the order of the [`Variable`]s of the CNF, so the
/// index of a variable is also its position in the factory.
pub struct DnnfPropagator {
    variables: Vec<Variable>,
    var_indices: BTreeMap<Variable, DnnfVar>,
    clauses: Vec<Vec<DnnfLit>>,
    occurrences: Vec<Vec<usize>>,
    assignment: Vec<Option<bool>>,
    trail: Vec<DnnfLit>,
    trail_lim: Vec<usize>,
    queue_head: usize,
    newly_implied_dirty: bool,
}

impl DnnfPropagator {
    /// Creates a propagator for the clauses of `cnf`.
    pub fn new(cnf: EncodedFormula, f: &FormulaFactory) -> Self {
        let variables: Vec<Variable> = cnf.variables(f).iter().copied().collect();
        let var_indices = variables.iter().enumerate().map(|(i, &var)| (var, DnnfVar(i))).collect();
        let mut propagator = Self {
            occurrences: vec![Vec::new(); 2 * variables.len()],
            assignment: vec![None; variables.len()],
            variables,
            var_indices,
            clauses: Vec::new(),
            trail: Vec::new(),
            trail_lim: Vec::new(),
            queue_head: 0,
            newly_implied_dirty: false,
        };
        let clauses = if cnf.is_and() { cnf.operands(f) } else { vec![cnf] };
        for clause in clauses {
            if !clause.is_verum() {
                let literals: Vec<DnnfLit> = clause.literals(f).iter().map(|&lit| propagator.lit(lit)).collect();
                propagator.add_clause(literals);
            }
        }
        propagator
    }

    fn add_clause(&mut self, clause: Vec<DnnfLit>) {
        let index = self.clauses.len();
        for lit in &clause {
            self.occurrences[lit.0].push(index);
        }
        self.clauses.push(clause);
    }

    /// Propagates the unit clauses on decision level zero. Returns `false` if
    /// the clauses are unsatisfiable by propagation.
    pub fn start(&mut self) -> bool {
        self.newly_implied_dirty = true;
        for index in 0..self.clauses.len() {
            match self.clauses[index].as_slice() {
                [] => return false,
                [unit] => {
                    let unit = *unit;
                    match self.value_of(unit) {
                        Some(false) => return false,
                        Some(true) => {}
                        None => self.enqueue(unit),
                    }
                }
                _ => {}
            }
        }
        self.propagate()
    }

    /// Opens a new decision level and assigns `var` to `phase`. Returns
    /// `false` if propagation ran into a conflict. The level must be closed
    /// by [`DnnfPropagator::undo_decide`] in both cases.
    pub fn decide(&mut self, var: DnnfVar, phase: bool) -> bool {
        self.newly_implied_dirty = true;
        self.trail_lim.push(self.trail.len());
        self.enqueue(DnnfLit::new(var, phase));
        self.propagate()
    }

    /// Removes all assignments of the current decision level.
    pub fn undo_decide(&mut self) {
        self.newly_implied_dirty = false;
        let limit = self.trail_lim.pop().unwrap_or(0);
        for lit in self.trail.drain(limit..) {
            self.assignment[lit.var().0] = None;
        }
        self.queue_head = self.trail.len();
    }

    fn enqueue(&mut self, lit: DnnfLit) {
        self.assignment[lit.var().0] = Some(lit.phase());
        self.trail.push(lit);
    }

    fn propagate(&mut self) -> bool {
        while self.queue_head < self.trail.len() {
            let falsified = self.trail[self.queue_head].negate();
            self.queue_head += 1;
            for i in 0..self.occurrences[falsified.0].len() {
                let clause = self.occurrences[falsified.0][i];
                let mut unassigned = None;
                let mut open = 0;
                let mut satisfied = false;
                for &lit in &self.clauses[clause] {
                    match self.value_of(lit) {
                        Some(true) => {
                            satisfied = true;
                            break;
                        }
                        None => {
                            open += 1;
                            unassigned = Some(lit);
                        }
                        Some(false) => {}
                    }
                }
                if satisfied || open > 1 {
                    continue;
                }
                match unassigned {
                    None => return false,
                    Some(unit) => self.enqueue(unit),
                }
            }
        }
        true
    }

    /// Returns the conjunction of all literals assigned on decision level zero.
    pub fn level_zero_literals(&self, f: &FormulaFactory) -> EncodedFormula {
        let limit = self.trail_lim.first().copied().unwrap_or(self.trail.len());
        f.and(self.trail[..limit].iter().map(|&lit| EncodedFormula::from(self.literal(lit))))
    }

    /// Returns the conjunction of all literals assigned on the current
    /// decision level whose variables are in `known_variables`. Literals are
    /// reported only once after each decision.
    pub fn newly_implied(&mut self, known_variables: &BitVec, f: &FormulaFactory) -> EncodedFormula {
        let mut implied = Vec::new();
        if self.newly_implied_dirty {
            if let Some(&limit) = self.trail_lim.last() {
                for &lit in self.trail[limit..].iter().rev() {
                    if known_variables.get(lit.var().0).is_some_and(|known| *known) {
                        implied.push(EncodedFormula::from(self.literal(lit)));
                    }
                }
            }
        }
        self.newly_implied_dirty = false;
        f.and(implied)
    }

    pub fn value_of(&self, lit: DnnfLit) -> Option<bool> {
        self.assignment[lit.var().0].map(|value| value == lit.phase())
    }

    pub fn number_of_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn clauses(&self) -> &[Vec<DnnfLit>] {
        &self.clauses
    }

    pub fn variable(&self, var: DnnfVar) -> Variable {
        self.variables[var.0]
    }

    pub fn literal(&self, lit: DnnfLit) -> Literal {
        self.variables[lit.var().0].lit(lit.phase())
    }

    pub fn lit(&self, literal: Literal) -> DnnfLit {
        DnnfLit::new(self.var_indices[&literal.variable()], literal.phase())
    }
}
