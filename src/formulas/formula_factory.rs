use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::datastructures::Assignment;
use crate::formulas::formula_cache::formula_encoding::FormulaEncoding;
use crate::formulas::formula_cache::formula_factory_caches::FormulaFactoryCaches;
use crate::formulas::formula_cache::node_table::NodeTable;
use crate::formulas::pbc::decided;
use crate::formulas::{
    CType, CacheEntry, EncodedFormula, Formula, FormulaFactoryConfig, FormulaType, LitType, Literal, PbConstraint, Variable,
};
use crate::operations::transformations::{CnfEncoder, nnf, restrict, restrict_lit};

/// Prefix of all auxiliary variables created by a [`FormulaFactory`].
pub const AUX_PREFIX: &str = "@RESERVED_";
const AUX_CNF: &str = "CNF_";

const HASH_TAG_NOT: u8 = 1;
const HASH_TAG_AND: u8 = 2;
const HASH_TAG_OR: u8 = 3;
const HASH_TAG_IMPL: u8 = 4;
const HASH_TAG_EQUIV: u8 = 5;
const HASH_TAG_PBC: u8 = 6;

type BinaryOperands = (EncodedFormula, EncodedFormula);

/// The formula factory is the central store for all formulas.
///
/// Every formula is created by a factory and consists of nodes owned by this
/// factory. An [`EncodedFormula`] is only a handle into the node tables, so a
/// formula can never be used with a different factory; use
/// [`FormulaFactory::import`] to rebuild it in another factory.
///
/// All constructors normalize their results: n-ary operators are flattened,
/// neutral elements are dropped, absorbing elements and complementary literals
/// short-circuit the operator, duplicates are removed and the operands are
/// sorted into a canonical order (constants, then literals ordered by name and
/// phase, then compound formulas ordered by a structural hash).
///
/// A factory operates in one of two modes, chosen with
/// [`FormulaFactoryConfig::hash_consing`]:
///
/// - **caching** (the default): every node is looked up in a uniqueness table
///   before it is created. So equal formulas are represented by the identical
///   [`EncodedFormula`], no matter in which order they were constructed.
/// - **non-caching**: every construction creates a fresh node. Formulas have to
///   be compared with [`FormulaFactory::structurally_equal`].
///
/// # Example
///
/// ```
/// # use logicng_compile::formulas::FormulaFactory;
/// let f = FormulaFactory::new();
///
/// let a = f.variable("a");
/// let b = f.variable("b");
/// let c = f.variable("c");
///
/// assert_eq!(f.and([a, b]), f.and([b, a]));
/// assert_eq!(f.and([a, f.and([b, c])]), f.and([a, b, c]));
/// ```
pub struct FormulaFactory {
    pub(crate) config: FormulaFactoryConfig,
    pub(crate) caches: FormulaFactoryCaches,
    variables: NodeTable<Arc<str>>,
    nots: NodeTable<EncodedFormula>,
    ands: NodeTable<Arc<[EncodedFormula]>>,
    ors: NodeTable<Arc<[EncodedFormula]>>,
    impls: NodeTable<BinaryOperands>,
    equivs: NodeTable<BinaryOperands>,
    pbcs: NodeTable<Arc<PbConstraint>>,
    aux_counter: AtomicU64,
}

impl FormulaFactory {
    /// Creates a new hash-consing factory with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FormulaFactoryConfig::new())
    }

    /// Creates a new factory with the given configuration.
    pub fn with_config(config: FormulaFactoryConfig) -> Self {
        Self {
            config,
            caches: FormulaFactoryCaches::new(),
            variables: NodeTable::new(),
            nots: NodeTable::new(),
            ands: NodeTable::new(),
            ors: NodeTable::new(),
            impls: NodeTable::new(),
            equivs: NodeTable::new(),
            pbcs: NodeTable::new(),
            aux_counter: AtomicU64::new(0),
        }
    }

    /// Creates a new factory which creates a fresh node on every construction
    /// and does not cache any operation results.
    pub fn non_caching() -> Self {
        Self::with_config(FormulaFactoryConfig::non_caching())
    }

    /// Returns the configuration of this factory.
    pub const fn config(&self) -> &FormulaFactoryConfig {
        &self.config
    }

    /// Returns `true` if this factory hash-conses its nodes.
    pub const fn is_caching(&self) -> bool {
        self.config.hash_consing
    }

    /// Returns the number of values currently cached for the given entry.
    pub fn cache_size(&self, entry: CacheEntry) -> usize {
        self.caches.size(entry)
    }

    /// Returns the number of nodes stored in this factory, not counting
    /// variables.
    pub fn number_of_stored_nodes(&self) -> usize {
        self.nots.len() + self.ands.len() + self.ors.len() + self.impls.len() + self.equivs.len() + self.pbcs.len()
    }

    /// Returns the constant `true`.
    pub const fn verum(&self) -> EncodedFormula {
        EncodedFormula::constant(true)
    }

    /// Returns the constant `false`.
    pub const fn falsum(&self) -> EncodedFormula {
        EncodedFormula::constant(false)
    }

    /// Returns the constant with the given value.
    pub const fn constant(&self, value: bool) -> EncodedFormula {
        EncodedFormula::constant(value)
    }

    /// Returns the variable with the given name. Variables are interned by
    /// name in both modes of the factory.
    pub fn var(&self, name: &str) -> Variable {
        let name: Arc<str> = Arc::from(name);
        if let Some(index) = self.variables.lookup(&name) {
            return Variable::from_index(index);
        }
        let hash = hash_of(&*name);
        Variable::from_index(self.variables.intern(name, hash, true))
    }

    /// Returns the variable with the given name if it was already created in
    /// this factory.
    pub fn lookup_var(&self, name: &str) -> Option<Variable> {
        self.variables.lookup(&Arc::from(name)).map(Variable::from_index)
    }

    /// Returns the variables with the given names.
    pub fn vars<S: AsRef<str>>(&self, names: impl IntoIterator<Item = S>) -> Vec<Variable> {
        names.into_iter().map(|name| self.var(name.as_ref())).collect()
    }

    /// Returns the variable with the given name as formula.
    pub fn variable(&self, name: &str) -> EncodedFormula {
        self.var(name).into()
    }

    /// Returns the literal with the given name and phase.
    pub fn lit(&self, name: &str, phase: bool) -> Literal {
        Literal::new(self.var(name), phase)
    }

    /// Returns the literal with the given name and phase as formula.
    pub fn literal(&self, name: &str, phase: bool) -> EncodedFormula {
        self.lit(name, phase).into()
    }

    /// Creates a fresh auxiliary variable for CNF transformations.
    pub fn new_cnf_variable(&self) -> Variable {
        let counter = self.aux_counter.fetch_add(1, Ordering::Relaxed);
        self.var(&format!("{AUX_PREFIX}{AUX_CNF}{counter}"))
    }

    pub(crate) fn var_name(&self, var: Variable) -> Arc<str> {
        self.variables.content(var.index())
    }

    pub(crate) fn is_auxiliary_variable(&self, var: Variable) -> bool {
        self.var_name(var).starts_with(AUX_PREFIX)
    }

    /// Creates the negation of the given formula.
    ///
    /// Constants and literals are negated directly, a double negation is
    /// removed. All other formulas are wrapped in a negation node.
    pub fn not(&self, op: EncodedFormula) -> EncodedFormula {
        match op.formula_type() {
            FormulaType::True => self.falsum(),
            FormulaType::False => self.verum(),
            FormulaType::Lit(_) => op.as_literal().map_or(op, |lit| lit.negate().into()),
            FormulaType::Not => self.nots.content(op.encoding.index()),
            _ => {
                let hash = hash_of(&(HASH_TAG_NOT, self.content_hash(op)));
                let index = self.nots.intern(op, hash, self.is_caching());
                FormulaEncoding::encode(index, FormulaType::Not).into()
            }
        }
    }

    /// Creates a conjunction of the given operands.
    ///
    /// # Example
    ///
    /// ```
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.variable("a");
    /// let na = f.literal("a", false);
    /// let b = f.variable("b");
    ///
    /// assert_eq!(f.and([a, f.verum()]), a);
    /// assert_eq!(f.and([a, b, f.falsum()]), f.falsum());
    /// assert_eq!(f.and([a, b, na]), f.falsum());
    /// assert_eq!(f.and([a, b, a]).to_string(&f), "a & b");
    /// ```
    pub fn and<I, B>(&self, operands: I) -> EncodedFormula
    where
        I: IntoIterator<Item = B>,
        B: Borrow<EncodedFormula>,
    {
        self.nary(FormulaType::And, operands)
    }

    /// Creates a disjunction of the given operands.
    ///
    /// # Example
    ///
    /// ```
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f = FormulaFactory::new();
    ///
    /// let a = f.variable("a");
    /// let na = f.literal("a", false);
    /// let b = f.variable("b");
    ///
    /// assert_eq!(f.or([a, f.falsum()]), a);
    /// assert_eq!(f.or([a, b, f.verum()]), f.verum());
    /// assert_eq!(f.or([a, b, na]), f.verum());
    /// assert_eq!(f.or([b, a, b]).to_string(&f), "a | b");
    /// ```
    pub fn or<I, B>(&self, operands: I) -> EncodedFormula
    where
        I: IntoIterator<Item = B>,
        B: Borrow<EncodedFormula>,
    {
        self.nary(FormulaType::Or, operands)
    }

    /// Creates a clause (a disjunction of literals).
    pub fn clause(&self, literals: &[Literal]) -> EncodedFormula {
        self.or(literals.iter().map(|lit| EncodedFormula::from(*lit)))
    }

    /// Creates a term (a conjunction of literals).
    pub fn term(&self, literals: &[Literal]) -> EncodedFormula {
        self.and(literals.iter().map(|lit| EncodedFormula::from(*lit)))
    }

    /// Creates the implication `left => right`.
    pub fn implication(&self, left: EncodedFormula, right: EncodedFormula) -> EncodedFormula {
        if left.is_falsum() || right.is_verum() {
            return self.verum();
        }
        if left.is_verum() {
            return right;
        }
        if right.is_falsum() {
            return self.not(left);
        }
        if self.same_formula(left, right) {
            return self.verum();
        }
        let hash = hash_of(&(HASH_TAG_IMPL, self.content_hash(left), self.content_hash(right)));
        let index = self.impls.intern((left, right), hash, self.is_caching());
        FormulaEncoding::encode(index, FormulaType::Impl).into()
    }

    /// Creates the equivalence `left <=> right`. The operands are sorted into
    /// canonical order, so `a <=> b` and `b <=> a` are the same formula.
    pub fn equivalence(&self, left: EncodedFormula, right: EncodedFormula) -> EncodedFormula {
        if left.is_verum() {
            return right;
        }
        if right.is_verum() {
            return left;
        }
        if left.is_falsum() {
            return self.not(right);
        }
        if right.is_falsum() {
            return self.not(left);
        }
        if self.same_formula(left, right) {
            return self.verum();
        }
        if self.is_negation_of(left, right) {
            return self.falsum();
        }
        let (first, second) = if self.canonical_key(left) <= self.canonical_key(right) { (left, right) } else { (right, left) };
        let hash = hash_of(&(HASH_TAG_EQUIV, self.content_hash(first), self.content_hash(second)));
        let index = self.equivs.intern((first, second), hash, self.is_caching());
        FormulaEncoding::encode(index, FormulaType::Equiv).into()
    }

    /// Creates a pseudo-boolean constraint `sum(coefficients[i] * literals[i])
    /// comparator rhs`.
    ///
    /// If the constraint has the same value for all assignments of its
    /// literals, the respective constant is returned.
    ///
    /// # Panics
    ///
    /// Panics if the number of literals and coefficients differ.
    pub fn pbc<L, C>(&self, comparator: CType, rhs: i64, literals: L, coefficients: C) -> EncodedFormula
    where
        L: Into<Box<[Literal]>>,
        C: Into<Box<[i64]>>,
    {
        let constraint = PbConstraint::new(literals.into(), coefficients.into(), comparator, rhs);
        let min: i64 = constraint.coefficients.iter().map(|c| (*c).min(0)).sum();
        let max: i64 = constraint.coefficients.iter().map(|c| (*c).max(0)).sum();
        if let Some(value) = decided(min, max, comparator, rhs) {
            return self.constant(value);
        }
        let literal_hashes: Vec<u64> = constraint.literals.iter().map(|lit| self.content_hash((*lit).into())).collect();
        let hash = hash_of(&(HASH_TAG_PBC, literal_hashes, &constraint.coefficients, comparator, rhs));
        let index = self.pbcs.intern(Arc::new(constraint), hash, self.is_caching());
        FormulaEncoding::encode(index, FormulaType::Pbc).into()
    }

    /// Computes the negation normal form of the given formula.
    pub fn nnf(&self, formula: EncodedFormula) -> EncodedFormula {
        nnf(formula, self)
    }

    /// Computes a conjunctive normal form of the given formula with the
    /// algorithm configured in [`FormulaFactoryConfig::cnf_config`].
    pub fn cnf(&self, formula: EncodedFormula) -> EncodedFormula {
        CnfEncoder::new(self.config.cnf_config.clone()).transform(formula, self)
    }

    /// Restricts the given formula with the given assignment.
    pub fn restrict(&self, formula: EncodedFormula, assignment: &Assignment) -> EncodedFormula {
        restrict(formula, assignment, self)
    }

    /// Restricts the given formula with a single literal.
    pub fn restrict_lit(&self, formula: EncodedFormula, lit: Literal) -> EncodedFormula {
        restrict_lit(formula, lit, self)
    }

    /// Rebuilds a formula of another factory in this factory.
    ///
    /// Variables are identified by their names. The formula is reconstructed
    /// with the normalizing constructors of this factory, so in a caching
    /// factory the result is identical to the formula constructed directly in
    /// this factory.
    ///
    /// # Example
    ///
    /// ```
    /// # use logicng_compile::formulas::FormulaFactory;
    /// let f1 = FormulaFactory::new();
    /// let f2 = FormulaFactory::new();
    ///
    /// let formula1 = f1.or([f1.variable("a"), f1.literal("b", false)]);
    /// let formula2 = f2.or([f2.literal("b", false), f2.variable("a")]);
    ///
    /// assert_eq!(f2.import(formula1, &f1), formula2);
    /// ```
    pub fn import(&self, formula: EncodedFormula, other: &Self) -> EncodedFormula {
        let mut cache = HashMap::new();
        self.import_rec(formula, other, &mut cache)
    }

    fn import_rec(&self, formula: EncodedFormula, other: &Self, cache: &mut HashMap<EncodedFormula, EncodedFormula>) -> EncodedFormula {
        if let Some(imported) = cache.get(&formula) {
            return *imported;
        }
        let result = match other.unpack(formula) {
            Formula::True | Formula::False => formula,
            Formula::Lit(lit) => self.literal(&lit.name(other), lit.phase()),
            Formula::Not(op) => {
                let op = self.import_rec(op, other, cache);
                self.not(op)
            }
            Formula::And(ops) => {
                let ops: Vec<EncodedFormula> = ops.iter().map(|op| self.import_rec(*op, other, cache)).collect();
                self.and(ops)
            }
            Formula::Or(ops) => {
                let ops: Vec<EncodedFormula> = ops.iter().map(|op| self.import_rec(*op, other, cache)).collect();
                self.or(ops)
            }
            Formula::Impl((left, right)) => {
                let left = self.import_rec(left, other, cache);
                let right = self.import_rec(right, other, cache);
                self.implication(left, right)
            }
            Formula::Equiv((left, right)) => {
                let left = self.import_rec(left, other, cache);
                let right = self.import_rec(right, other, cache);
                self.equivalence(left, right)
            }
            Formula::Pbc(pbc) => {
                let literals: Vec<Literal> = pbc.literals.iter().map(|lit| self.lit(&lit.name(other), lit.phase())).collect();
                self.pbc(pbc.comparator, pbc.rhs, literals, pbc.coefficients.clone())
            }
        };
        cache.insert(formula, result);
        result
    }

    /// Checks whether two formulas of this factory are structurally equal.
    ///
    /// In a caching factory this is the same as comparing the handles. In a
    /// non-caching factory the formulas are compared recursively.
    pub fn structurally_equal(&self, left: EncodedFormula, right: EncodedFormula) -> bool {
        if left == right {
            return true;
        }
        if !left.same_type(right) || self.content_hash(left) != self.content_hash(right) {
            return false;
        }
        match (self.unpack(left), self.unpack(right)) {
            (Formula::Not(l), Formula::Not(r)) => self.structurally_equal(l, r),
            (Formula::Impl((l1, l2)), Formula::Impl((r1, r2))) | (Formula::Equiv((l1, l2)), Formula::Equiv((r1, r2))) => {
                self.structurally_equal(l1, r1) && self.structurally_equal(l2, r2)
            }
            (Formula::And(l_ops), Formula::And(r_ops)) | (Formula::Or(l_ops), Formula::Or(r_ops)) => {
                self.structurally_equal_operands(&l_ops, &r_ops)
            }
            (Formula::Pbc(l), Formula::Pbc(r)) => l == r,
            _ => false,
        }
    }

    fn structurally_equal_operands(&self, left: &[EncodedFormula], right: &[EncodedFormula]) -> bool {
        if left.len() != right.len() {
            return false;
        }
        if left.iter().zip(right.iter()).all(|(l, r)| self.structurally_equal(*l, *r)) {
            return true;
        }
        // operands with colliding hashes may be ordered differently
        let mut used = vec![false; right.len()];
        left.iter().all(|l| {
            let matching = (0..right.len()).find(|&i| !used[i] && self.structurally_equal(*l, right[i]));
            matching.is_some_and(|i| {
                used[i] = true;
                true
            })
        })
    }

    fn is_negation_of(&self, left: EncodedFormula, right: EncodedFormula) -> bool {
        match (left.as_literal(), right.as_literal()) {
            (Some(l), Some(r)) => l == r.negate(),
            _ => {
                (left.is_not() && self.same_formula(self.nots.content(left.encoding.index()), right))
                    || (right.is_not() && self.same_formula(self.nots.content(right.encoding.index()), left))
            }
        }
    }

    fn same_formula(&self, left: EncodedFormula, right: EncodedFormula) -> bool {
        if self.is_caching() { left == right } else { self.structurally_equal(left, right) }
    }

    /// Returns a hash of the structure of the formula, which only depends on
    /// the variable names and the operators. So it is equal for equal formulas
    /// of different factories or of a non-caching factory.
    pub fn content_hash(&self, formula: EncodedFormula) -> u64 {
        let index = formula.encoding.index();
        match formula.formula_type() {
            FormulaType::True => hash_of(&true),
            FormulaType::False => hash_of(&false),
            FormulaType::Lit(ty) => hash_of(&(self.variables.hash(index), ty == LitType::Pos)),
            FormulaType::Not => self.nots.hash(index),
            FormulaType::And => self.ands.hash(index),
            FormulaType::Or => self.ors.hash(index),
            FormulaType::Impl => self.impls.hash(index),
            FormulaType::Equiv => self.equivs.hash(index),
            FormulaType::Pbc => self.pbcs.hash(index),
        }
    }

    pub(crate) fn unpack(&self, formula: EncodedFormula) -> Formula {
        let index = formula.encoding.index();
        match formula.formula_type() {
            FormulaType::True => Formula::True,
            FormulaType::False => Formula::False,
            FormulaType::Lit(LitType::Pos) => Formula::Lit(Literal::Pos(Variable::from_index(index))),
            FormulaType::Lit(LitType::Neg) => Formula::Lit(Literal::Neg(Variable::from_index(index))),
            FormulaType::Not => Formula::Not(self.nots.content(index)),
            FormulaType::And => Formula::And(self.ands.content(index)),
            FormulaType::Or => Formula::Or(self.ors.content(index)),
            FormulaType::Impl => Formula::Impl(self.impls.content(index)),
            FormulaType::Equiv => Formula::Equiv(self.equivs.content(index)),
            FormulaType::Pbc => Formula::Pbc(self.pbcs.content(index)),
        }
    }

    fn nary<I, B>(&self, ty: FormulaType, operands: I) -> EncodedFormula
    where
        I: IntoIterator<Item = B>,
        B: Borrow<EncodedFormula>,
    {
        let is_and = ty == FormulaType::And;
        let neutral = self.constant(is_and);
        let absorbing = self.constant(!is_and);
        let mut flattened = Vec::new();
        for op in operands {
            let op = *op.borrow();
            if op == absorbing {
                return absorbing;
            }
            if op == neutral {
                continue;
            }
            if op.formula_type() == ty {
                flattened.extend(op.operands(self));
            } else {
                flattened.push(op);
            }
        }
        let mut literals = HashSet::new();
        for op in &flattened {
            if let Some(lit) = op.as_literal() {
                if literals.contains(&lit.negate()) {
                    return absorbing;
                }
                literals.insert(lit);
            }
        }
        let mut keyed: Vec<(CanonicalKey, EncodedFormula)> = flattened.into_iter().map(|op| (self.canonical_key(op), op)).collect();
        keyed.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        let mut ops: Vec<EncodedFormula> = Vec::with_capacity(keyed.len());
        for (i, (key, op)) in keyed.iter().enumerate() {
            let duplicate = if self.is_caching() {
                ops.last() == Some(op)
            } else {
                keyed[..i].iter().rev().take_while(|(k, _)| k.same_content(key)).any(|(_, other)| self.structurally_equal(*other, *op))
            };
            if !duplicate {
                ops.push(*op);
            }
        }
        match ops.len() {
            0 => neutral,
            1 => ops[0],
            _ => {
                let hashes: Vec<u64> = ops.iter().map(|op| self.content_hash(*op)).collect();
                let tag = if is_and { HASH_TAG_AND } else { HASH_TAG_OR };
                let hash = hash_of(&(tag, hashes));
                let ops: Arc<[EncodedFormula]> = Arc::from(ops);
                let table = if is_and { &self.ands } else { &self.ors };
                let index = table.intern(ops, hash, self.is_caching());
                FormulaEncoding::encode(index, ty).into()
            }
        }
    }

    fn canonical_key(&self, formula: EncodedFormula) -> CanonicalKey {
        match formula.formula_type() {
            FormulaType::True | FormulaType::False => CanonicalKey::Constant(formula.is_verum()),
            FormulaType::Lit(ty) => {
                CanonicalKey::Literal(self.variables.content(formula.encoding.index()), ty == LitType::Neg, formula.encoding)
            }
            _ => CanonicalKey::Compound(self.content_hash(formula), formula.encoding),
        }
    }
}

impl Default for FormulaFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort key of the canonical operand order: constants before literals before
/// compound formulas. Literals are ordered by name and phase, compound formulas
/// by their content hash and finally by their encoding.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum CanonicalKey {
    Constant(bool),
    Literal(Arc<str>, bool, FormulaEncoding),
    Compound(u64, FormulaEncoding),
}

impl CanonicalKey {
    fn same_content(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Constant(a), Self::Constant(b)) => a == b,
            (Self::Literal(n1, p1, _), Self::Literal(n2, p2, _)) => n1 == n2 && p1 == p2,
            (Self::Compound(h1, _), Self::Compound(h2, _)) => h1 == h2,
            _ => false,
        }
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
