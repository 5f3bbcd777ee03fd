use crate::formulas::{EncodedFormula, FormulaFactory};
use crate::util::test_util::{F, lits, vars};

#[test]
fn test_type() {
    let ff = F::new();
    assert!(ff.AND1.is_and());
    assert!(ff.AND1.is_nary_operator());
    assert!(!ff.AND1.is_or());
    assert!(!ff.AND1.is_constant());
    assert!(!ff.AND1.is_literal());
    assert!(!ff.AND1.is_not());
    assert!(!ff.AND1.is_binary_operator());
    assert!(!ff.AND1.is_atomic());
}

#[test]
fn test_creation() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(f.and([] as [EncodedFormula; 0]), ff.TRUE);
    assert_eq!(f.and([ff.TRUE]), ff.TRUE);
    assert_eq!(f.and([ff.FALSE]), ff.FALSE);
    assert_eq!(f.and([ff.TRUE, ff.FALSE]), ff.FALSE);
    assert_eq!(f.and([ff.NA]), ff.NA);
    assert_eq!(f.and([ff.A, ff.B, ff.A, ff.B, ff.A]), ff.AND1);
    assert_eq!(f.and([ff.B, ff.A]), ff.AND1);
    assert_eq!(f.and([ff.AND1, ff.A, f.and([ff.B, ff.A])]), ff.AND1);
    assert_eq!(f.and([ff.TRUE, ff.A, ff.B, ff.TRUE]), ff.AND1);
    assert_eq!(f.and([ff.NA, ff.NA, ff.TRUE]), ff.NA);
    assert_eq!(f.and([ff.A, ff.B, ff.NA]), ff.FALSE);
    assert_eq!(f.and([ff.OR1, ff.OR2]), ff.AND3);
    assert_eq!(f.and([ff.OR2, ff.OR1]), ff.AND3);
}

#[test]
fn test_flattening() {
    let ff = F::new();
    let f = &ff.f;
    let nested = f.and([ff.A, f.and([ff.B, f.and([ff.C, ff.D])])]);
    let flat = f.and([ff.D, ff.C, ff.B, ff.A]);
    assert_eq!(nested, flat);
    assert_eq!(nested.number_of_operands(f), 4);
    assert_eq!(nested.to_string(f), "a & b & c & d");
}

#[test]
fn test_operands_sorted() {
    let ff = F::new();
    let f = &ff.f;
    let and = f.and([ff.OR1, ff.NB, ff.TRUE, ff.A, ff.X]);
    let ops = and.operands(f);
    assert_eq!(ops[..3], [ff.A, ff.NB, ff.X]);
    assert_eq!(ops[3], ff.OR1);
    assert_eq!(f.and([ff.B, ff.NA]).operands(f), vec![ff.NA, ff.B]);
    assert_eq!(f.and([ff.NX, ff.X, ff.Y]), ff.FALSE);
}

#[test]
fn test_variables_and_literals() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(*ff.AND1.variables(f), vars("a b", f));
    assert_eq!(*ff.AND3.variables(f), vars("x y", f));
    assert_eq!(*ff.AND2.literals(f), lits("~a ~b", f));
    assert_eq!(*ff.AND3.literals(f), lits("x y ~x ~y", f));
}

#[test]
fn test_to_string() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(ff.AND1.to_string(f), "a & b");
    assert_eq!(ff.AND2.to_string(f), "~a & ~b");
    assert_eq!(f.and([ff.A, ff.B, ff.X, ff.NY]).to_string(f), "a & b & x & ~y");
    assert_eq!(f.and([ff.A, ff.OR1]).to_string(f), "a & (x | y)");
    assert_eq!(f.and([ff.NA, ff.IMP1]).to_string(f), "~a & (a => b)");
}

#[test]
fn test_number_of_atoms_and_nodes() {
    let ff = F::new();
    let f = &ff.f;
    assert_eq!(ff.AND1.number_of_atoms(f), 2);
    assert_eq!(ff.AND3.number_of_atoms(f), 4);
    assert_eq!(ff.AND1.number_of_nodes(f), 3);
    assert_eq!(ff.AND3.number_of_nodes(f), 7);
}

#[test]
fn test_non_caching_creation() {
    let ff = F::new();
    let g = &ff.g;
    let first = g.and([g.variable("a"), g.variable("b")]);
    let second = g.and([g.variable("b"), g.variable("a")]);
    assert_ne!(first, second);
    assert!(g.structurally_equal(first, second));
    assert_eq!(g.and([first, g.variable("a")]).number_of_operands(g), 2);
    assert_eq!(g.and([g.variable("a"), g.literal("a", false)]), g.falsum());
}

#[test]
fn test_duplicate_compounds_in_non_caching_mode() {
    let g = FormulaFactory::non_caching();
    let x = g.variable("x");
    let y = g.variable("y");
    let or1 = g.or([x, y]);
    let or2 = g.or([y, x]);
    let and = g.and([or1, or2, x]);
    assert_eq!(and.number_of_operands(&g), 2);
}
