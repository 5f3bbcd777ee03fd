use crate::datastructures::Assignment;
use crate::formulas::CType;
use crate::util::test_util::{F, lits_list};

fn ass(ff: &F) -> Assignment {
    Assignment::from_variables(&[ff.f.var("a")], &[ff.f.var("b"), ff.f.var("x")])
}

#[test]
fn test_constant_restrict() {
    let ff = F::new();
    assert_eq!(ff.f.restrict(ff.TRUE, &ass(&ff)), ff.TRUE);
    assert_eq!(ff.f.restrict(ff.FALSE, &ass(&ff)), ff.FALSE);
}

#[test]
fn test_literal_restrict() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(f.restrict(ff.A, &ass(&ff)), ff.TRUE);
    assert_eq!(f.restrict(ff.NA, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.X, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.NX, &ass(&ff)), ff.TRUE);
    assert_eq!(f.restrict(ff.C, &ass(&ff)), ff.C);
    assert_eq!(f.restrict(ff.NY, &ass(&ff)), ff.NY);
}

#[test]
fn test_compound_restrict() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(f.restrict(ff.NOT1, &ass(&ff)), ff.TRUE);
    assert_eq!(f.restrict(ff.NOT2, &ass(&ff)), ff.NY);
    assert_eq!(f.restrict(ff.IMP1, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.IMP2, &ass(&ff)), ff.TRUE);
    assert_eq!(f.restrict(ff.IMP3, &ass(&ff)), ff.TRUE);
    assert_eq!(f.restrict(f.implication(ff.A, ff.C), &ass(&ff)), ff.C);
    assert_eq!(f.restrict(ff.EQ1, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.EQ3, &ass(&ff)), ff.NY);
    assert_eq!(f.restrict(ff.EQ4, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.OR1, &ass(&ff)), ff.Y);
    assert_eq!(f.restrict(ff.OR2, &ass(&ff)), ff.TRUE);
    assert_eq!(f.restrict(ff.OR3, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.AND1, &ass(&ff)), ff.FALSE);
    assert_eq!(f.restrict(ff.AND3, &ass(&ff)), ff.Y);
}

#[test]
fn test_pbc_restrict() {
    let ff = F::new();
    let f = &ff.f;
    let restricted = f.restrict(ff.PBC1, &ass(&ff));
    assert_eq!(restricted, f.pbc(CType::EQ, 0, lits_list("c", f), vec![3_i64]));
    assert_eq!(restricted.to_string(f), "3*c = 0");
    assert_eq!(f.restrict(ff.PBC2, &ass(&ff)), f.pbc(CType::GT, 0, lits_list("c", f), vec![3_i64]));
    let full = Assignment::from_variables(&[f.var("a"), f.var("c")], &[f.var("b")]);
    assert_eq!(f.restrict(ff.PBC1, &full), ff.FALSE);
    assert_eq!(f.restrict(ff.PBC3, &full), ff.TRUE);
}

#[test]
fn test_restrict_lit() {
    let ff = F::new();
    let f = &ff.f;
    let a = f.lit("a", true);
    assert_eq!(f.restrict_lit(ff.EQ1, a), ff.B);
    assert_eq!(f.restrict_lit(ff.EQ1, a.negate()), ff.NB);
    assert_eq!(f.restrict_lit(ff.OR3, a), ff.B);
    assert_eq!(f.restrict_lit(ff.IMP4, f.lit("x", false)), f.implication(ff.EQ1, ff.NY));
    assert_eq!(f.restrict_lit(ff.OR1, a), ff.OR1);
}
