#![allow(non_snake_case)]

use crate::formulas::{CType, EncodedFormula, FormulaFactory};
use crate::knowledge_compilation::bdd::bdd_kernel::BddKernel;
use crate::knowledge_compilation::bdd::bdd_main::Bdd;
use crate::util::test_util::lits_list;

pub struct B {
    pub(crate) F: FormulaFactory,
    pub(crate) K: BddKernel,
    pub(crate) TRUE: Bdd,
    pub(crate) FALSE: Bdd,
    pub(crate) VAR: Bdd,
    pub(crate) LIT: Bdd,
    pub(crate) IMPL: Bdd,
    pub(crate) EQUIV: Bdd,
    pub(crate) OR: Bdd,
    pub(crate) AND: Bdd,
    pub(crate) FORMULA: Bdd,
    pub(crate) PBC: Bdd,

    pub(crate) VAR_F: EncodedFormula,
    pub(crate) LIT_F: EncodedFormula,
    pub(crate) IMPL_F: EncodedFormula,
    pub(crate) EQUIV_F: EncodedFormula,
    pub(crate) OR_F: EncodedFormula,
    pub(crate) AND_F: EncodedFormula,
    pub(crate) FORMULA_F: EncodedFormula,
    pub(crate) PBC_F: EncodedFormula,
}

impl B {
    /// BDDs over the ordering `A < B < C`.
    pub(crate) fn new() -> Self {
        let f = FormulaFactory::new();
        let mut kernel = BddKernel::new_with_var_ordering(f.vars(["A", "B", "C"]));

        let a = f.variable("A");
        let na = f.literal("A", false);
        let b = f.variable("B");
        let nb = f.literal("B", false);
        let nc = f.literal("C", false);
        let var = a;
        let lit = na;
        let impli = f.implication(a, nb);
        let equiv = f.equivalence(a, nb);
        let or = f.or([a, b, nc]);
        let and = f.and([a, b, nc]);
        let formula = f.or([f.implication(a, nc), f.and([b, nc])]);
        let pbc = f.pbc(CType::EQ, 1, lits_list("A B C", &f), vec![1_i64, 1, 1]);

        let mut build = |formula| Bdd::from_formula(formula, &f, &mut kernel);
        let bdd_true = build(f.verum());
        let bdd_false = build(f.falsum());
        let bdd_var = build(var);
        let bdd_lit = build(lit);
        let bdd_impl = build(impli);
        let bdd_equiv = build(equiv);
        let bdd_or = build(or);
        let bdd_and = build(and);
        let bdd_formula = build(formula);
        let bdd_pbc = build(pbc);

        Self {
            F: f,
            K: kernel,
            TRUE: bdd_true,
            FALSE: bdd_false,
            VAR: bdd_var,
            LIT: bdd_lit,
            IMPL: bdd_impl,
            EQUIV: bdd_equiv,
            OR: bdd_or,
            AND: bdd_and,
            FORMULA: bdd_formula,
            PBC: bdd_pbc,

            VAR_F: var,
            LIT_F: lit,
            IMPL_F: impli,
            EQUIV_F: equiv,
            OR_F: or,
            AND_F: and,
            FORMULA_F: formula,
            PBC_F: pbc,
        }
    }

    pub(crate) fn all(&self) -> [(Bdd, EncodedFormula); 10] {
        [
            (self.TRUE, self.F.verum()),
            (self.FALSE, self.F.falsum()),
            (self.VAR, self.VAR_F),
            (self.LIT, self.LIT_F),
            (self.IMPL, self.IMPL_F),
            (self.EQUIV, self.EQUIV_F),
            (self.OR, self.OR_F),
            (self.AND, self.AND_F),
            (self.FORMULA, self.FORMULA_F),
            (self.PBC, self.PBC_F),
        ]
    }
}
