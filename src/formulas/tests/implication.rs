use crate::formulas::Formula;
use crate::util::test_util::{F, lits, vars};

#[test]
fn test_type() {
    let ff = F::new();
    assert!(ff.IMP1.is_impl());
    assert!(ff.IMP1.is_binary_operator());
    assert!(!ff.IMP1.is_equiv());
    assert!(!ff.IMP1.is_nary_operator());
}

#[test]
fn test_creation() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(f.implication(ff.FALSE, ff.A), ff.TRUE);
    assert_eq!(f.implication(ff.A, ff.TRUE), ff.TRUE);
    assert_eq!(f.implication(ff.TRUE, ff.A), ff.A);
    assert_eq!(f.implication(ff.A, ff.FALSE), ff.NA);
    assert_eq!(f.implication(ff.AND1, ff.FALSE), ff.NOT1);
    assert_eq!(f.implication(ff.A, ff.A), ff.TRUE);
    assert_eq!(f.implication(ff.AND1, ff.AND1), ff.TRUE);
    assert_eq!(f.implication(ff.A, ff.B), ff.IMP1);
    assert_eq!(f.implication(ff.AND1, ff.OR1), ff.IMP3);
    assert_ne!(f.implication(ff.B, ff.A), ff.IMP1);
}

#[test]
fn test_operand_order_is_kept() {
    let ff = F::new();
    let f = &ff.f;
    match ff.IMP2.unpack(f) {
        Formula::Impl((left, right)) => {
            assert_eq!(left, ff.NA);
            assert_eq!(right, ff.NB);
        }
        _ => panic!("expected an implication"),
    }
    assert_eq!(ff.IMP4.operands(f), vec![ff.EQ1, f.equivalence(ff.NX, ff.NY)]);
}

#[test]
fn test_variables_and_literals() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(*ff.IMP1.variables(f), vars("a b", f));
    assert_eq!(*ff.IMP3.variables(f), vars("a b x y", f));
    assert_eq!(*ff.IMP2.literals(f), lits("~a ~b", f));
    assert_eq!(*ff.IMP4.literals(f), lits("a b ~x ~y", f));
}

#[test]
fn test_to_string() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(ff.IMP1.to_string(f), "a => b");
    assert_eq!(ff.IMP2.to_string(f), "~a => ~b");
    assert_eq!(ff.IMP3.to_string(f), "a & b => x | y");
    assert_eq!(ff.IMP4.to_string(f), "(a <=> b) => (~x <=> ~y)");
}

#[test]
fn test_counts() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(ff.IMP1.number_of_atoms(f), 2);
    assert_eq!(ff.IMP4.number_of_atoms(f), 4);
    assert_eq!(ff.IMP3.number_of_nodes(f), 7);
}

#[test]
fn test_non_caching() {
    let ff = F::new();
    let g = &ff.g;
    let a = g.variable("a");
    let and1 = g.and([a, g.variable("b")]);
    let and2 = g.and([g.variable("b"), a]);
    assert_eq!(g.implication(and1, and2), g.verum());
    let first = g.implication(a, and1);
    let second = g.implication(a, and2);
    assert_ne!(first, second);
    assert!(g.structurally_equal(first, second));
}
