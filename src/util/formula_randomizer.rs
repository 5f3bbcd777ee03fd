use fastrand::Rng;

use crate::formulas::CType::{EQ, GE, GT, LE, LT};
use crate::formulas::{CType, EncodedFormula, FormulaFactory, Literal};

/// A configuration for randomizing formulas.
///
/// The following things can be configured:
/// - the seed, which makes the generated formulas reproducible
/// - the variables, which are all chosen with the same probability
/// - weights for the formula types, defining how often a formula type is
///   generated compared to the other types
/// - the maximum number of operands of conjunctions, disjunctions and
///   pseudo-boolean constraints.
///
/// The weights only apply to inner nodes of the generated formula, since the
/// leaves are always literals, constants or pseudo-boolean constraints.
#[derive(Clone, PartialEq, Debug)]
pub struct FormulaRandomizerConfig {
    pub(crate) seed: u64,
    pub(crate) variables: Vec<String>,
    pub(crate) weight_constant: f32,
    pub(crate) weight_positive_literal: f32,
    pub(crate) weight_negative_literal: f32,
    pub(crate) weight_or: f32,
    pub(crate) weight_and: f32,
    pub(crate) weight_not: f32,
    pub(crate) weight_impl: f32,
    pub(crate) weight_equiv: f32,
    pub(crate) weight_pbc: f32,
    pub(crate) maximum_operands: u32,
    pub(crate) maximum_coefficient_pbc: u32,
}

impl FormulaRandomizerConfig {
    /// Builds a configuration over the given variables with default weights.
    pub fn default_with_variables(variables: Vec<String>) -> Self {
        Self {
            seed: 42,
            variables,
            weight_constant: 0.1,
            weight_positive_literal: 1.0,
            weight_negative_literal: 1.0,
            weight_or: 30.0,
            weight_and: 30.0,
            weight_not: 1.0,
            weight_impl: 1.0,
            weight_equiv: 1.0,
            weight_pbc: 0.0,
            maximum_operands: 5,
            maximum_coefficient_pbc: 10,
        }
    }

    /// Builds a configuration with default weights and the `num_vars`
    /// variables `v0`, `v1`, ...
    ///
    /// ```
    /// # use logicng_compile::util::formula_randomizer::{FormulaRandomizer, FormulaRandomizerConfig};
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    /// let config = FormulaRandomizerConfig::default_with_num_vars(5).seed(7);
    /// let mut randomizer = FormulaRandomizer::new(config);
    ///
    /// let formula = randomizer.formula(&f, 3);
    /// assert!(formula.variables(&f).len() <= 5);
    /// ```
    pub fn default_with_num_vars(num_vars: usize) -> Self {
        let width = num_vars.saturating_sub(1).to_string().len();
        Self::default_with_variables((0..num_vars).map(|n| format!("v{n:0width$}")).collect())
    }

    /// Sets the seed of the random generator.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the relative weight of constants.
    #[must_use]
    pub const fn weight_constant(mut self, weight: f32) -> Self {
        self.weight_constant = weight;
        self
    }

    /// Sets the relative weight of negative literals.
    #[must_use]
    pub const fn weight_negative_literal(mut self, weight: f32) -> Self {
        self.weight_negative_literal = weight;
        self
    }

    /// Sets the relative weight of negations.
    #[must_use]
    pub const fn weight_not(mut self, weight: f32) -> Self {
        self.weight_not = weight;
        self
    }

    /// Sets the relative weight of implications.
    #[must_use]
    pub const fn weight_impl(mut self, weight: f32) -> Self {
        self.weight_impl = weight;
        self
    }

    /// Sets the relative weight of equivalences.
    #[must_use]
    pub const fn weight_equiv(mut self, weight: f32) -> Self {
        self.weight_equiv = weight;
        self
    }

    /// Sets the relative weight of pseudo-boolean constraints.
    #[must_use]
    pub const fn weight_pbc(mut self, weight: f32) -> Self {
        self.weight_pbc = weight;
        self
    }

    /// Sets the maximum number of operands of conjunctions, disjunctions and
    /// pseudo-boolean constraints. Must be at least 3.
    #[must_use]
    pub const fn maximum_operands(mut self, maximum: u32) -> Self {
        self.maximum_operands = maximum;
        self
    }

    fn probabilities(&self) -> Probabilities {
        let weights = [
            self.weight_constant,
            self.weight_positive_literal + self.weight_negative_literal,
            self.weight_pbc,
            self.weight_or,
            self.weight_and,
            self.weight_not,
            self.weight_impl,
            self.weight_equiv,
        ];
        let total: f32 = weights.iter().sum();
        let mut cumulative = [0.0; 8];
        let mut sum = 0.0;
        for (i, weight) in weights.iter().enumerate() {
            sum += weight / total;
            cumulative[i] = sum;
        }
        let phase = self.weight_positive_literal / (self.weight_positive_literal + self.weight_negative_literal);
        Probabilities { cumulative, phase }
    }
}

/// Cumulative probabilities in the order constant, literal, pbc, or, and,
/// not, implication, equivalence.
struct Probabilities {
    cumulative: [f32; 8],
    phase: f32,
}

/// A generator for random formulas, used for property tests of the
/// transformations and compilers.
pub struct FormulaRandomizer {
    config: FormulaRandomizerConfig,
    random: Rng,
    probabilities: Probabilities,
}

impl FormulaRandomizer {
    /// Builds a new `FormulaRandomizer` from a [`FormulaRandomizerConfig`].
    pub fn new(config: FormulaRandomizerConfig) -> Self {
        let probabilities = config.probabilities();
        Self { random: Rng::with_seed(config.seed), config, probabilities }
    }

    /// Returns a random constant.
    pub fn constant(&mut self, f: &FormulaFactory) -> EncodedFormula {
        f.constant(self.random.bool())
    }

    /// Returns a random variable.
    pub fn variable(&mut self, f: &FormulaFactory) -> EncodedFormula {
        let index = self.random.usize(0..self.config.variables.len());
        f.variable(&self.config.variables[index])
    }

    /// Returns a random literal.
    pub fn literal(&mut self, f: &FormulaFactory) -> EncodedFormula {
        let phase = self.random.f32() < self.probabilities.phase;
        let index = self.random.usize(0..self.config.variables.len());
        f.literal(&self.config.variables[index], phase)
    }

    /// Returns a random atom, i.e. a constant, a literal or a pseudo-boolean
    /// constraint.
    pub fn atom(&mut self, f: &FormulaFactory) -> EncodedFormula {
        let n = self.random.f32() * self.probabilities.cumulative[2];
        if n < self.probabilities.cumulative[0] {
            self.constant(f)
        } else if n < self.probabilities.cumulative[1] {
            self.literal(f)
        } else {
            self.pbc(f)
        }
    }

    /// Returns a random negation with the given maximal depth.
    pub fn not(&mut self, f: &FormulaFactory, max_depth: u32) -> EncodedFormula {
        if max_depth == 0 {
            return self.atom(f);
        }
        let inner = self.formula(f, max_depth - 1);
        f.not(inner)
    }

    /// Returns a random implication with the given maximal depth.
    pub fn implication(&mut self, f: &FormulaFactory, max_depth: u32) -> EncodedFormula {
        if max_depth == 0 {
            return self.atom(f);
        }
        let left = self.formula(f, max_depth - 1);
        let right = self.formula(f, max_depth - 1);
        f.implication(left, right)
    }

    /// Returns a random equivalence with the given maximal depth.
    pub fn equivalence(&mut self, f: &FormulaFactory, max_depth: u32) -> EncodedFormula {
        if max_depth == 0 {
            return self.atom(f);
        }
        let left = self.formula(f, max_depth - 1);
        let right = self.formula(f, max_depth - 1);
        f.equivalence(left, right)
    }

    /// Returns a random conjunction with the given maximal depth.
    pub fn and(&mut self, f: &FormulaFactory, max_depth: u32) -> EncodedFormula {
        if max_depth == 0 {
            return self.atom(f);
        }
        let operands = self.operands(f, max_depth - 1);
        f.and(operands)
    }

    /// Returns a random disjunction with the given maximal depth.
    pub fn or(&mut self, f: &FormulaFactory, max_depth: u32) -> EncodedFormula {
        if max_depth == 0 {
            return self.atom(f);
        }
        let operands = self.operands(f, max_depth - 1);
        f.or(operands)
    }

    fn operands(&mut self, f: &FormulaFactory, depth: u32) -> Vec<EncodedFormula> {
        let count = self.random.u32(2..self.config.maximum_operands);
        (0..count).map(|_| self.formula(f, depth)).collect()
    }

    /// Returns a random pseudo-boolean constraint which is not trivially
    /// true or false.
    pub fn pbc(&mut self, f: &FormulaFactory) -> EncodedFormula {
        loop {
            let count = self.random.usize(1..self.config.maximum_operands as usize);
            let mut literals: Vec<Literal> = Vec::with_capacity(count);
            let mut coefficients = Vec::with_capacity(count);
            let (mut min_sum, mut max_sum) = (0, 0);
            for _ in 0..count {
                literals.push(self.literal(f).as_literal().expect("literal generator returns literals"));
                let coefficient = self.random.i64(1..=i64::from(self.config.maximum_coefficient_pbc));
                if self.random.f32() < 0.2 {
                    min_sum -= coefficient;
                    coefficients.push(-coefficient);
                } else {
                    max_sum += coefficient;
                    coefficients.push(coefficient);
                }
            }
            let rhs = self.random.i64(min_sum..=max_sum);
            let pbc = f.pbc(self.comparator(), rhs, literals, coefficients);
            if !pbc.is_constant() {
                return pbc;
            }
        }
    }

    /// Returns a random formula with the given maximal depth.
    pub fn formula(&mut self, f: &FormulaFactory, max_depth: u32) -> EncodedFormula {
        if max_depth == 0 {
            return self.atom(f);
        }
        let n = self.random.f32();
        let p = &self.probabilities.cumulative;
        if n < p[0] {
            self.constant(f)
        } else if n < p[1] {
            self.literal(f)
        } else if n < p[2] {
            self.pbc(f)
        } else if n < p[3] {
            self.or(f, max_depth)
        } else if n < p[4] {
            self.and(f, max_depth)
        } else if n < p[5] {
            self.not(f, max_depth)
        } else if n < p[6] {
            self.implication(f, max_depth)
        } else {
            self.equivalence(f, max_depth)
        }
    }

    /// Returns `count` random formulas with the given maximal depth.
    pub fn constraint_set(&mut self, f: &FormulaFactory, count: usize, max_depth: u32) -> Vec<EncodedFormula> {
        (0..count).map(|_| self.formula(f, max_depth)).collect()
    }

    fn comparator(&mut self) -> CType {
        [LE, LT, GE, GT, EQ][self.random.usize(0..5)]
    }
}
