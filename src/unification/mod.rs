//! Most general unifier (MGU) computation


use crate::fol::{Literal, Substitution, Term, Variable};
use thiserror::Error;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Reasons two terms fail to unify
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationError {
    /// The variable occurs inside the term it would be bound to
    #[error("occurs check: {variable} occurs in {term}")]
    OccursCheck { variable: Variable, term: Term },
    /// Two distinct constants or function symbols, or a constant against a
    /// function term
    #[error("symbol clash: {left} vs {right}")]
    SymbolClash { left: String, right: String },
    /// Same symbol or predicate at different argument counts
    #[error("arity mismatch: {left} vs {right}")]
    ArityMismatch { left: usize, right: usize },
}

/// Unify two terms, returning a most general unifier if one exists
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    let mut subst = Substitution::new();
    unify_with(term1, term2, &mut subst)?;
    Ok(subst)
}

/// Unify two term lists of equal length, left to right
pub fn unify_term_lists(terms1: &[Term], terms2: &[Term]) -> UnificationResult {
    if terms1.len() != terms2.len() {
        return Err(UnificationError::ArityMismatch {
            left: terms1.len(),
            right: terms2.len(),
        });
    }
    let mut subst = Substitution::new();
    for (t1, t2) in terms1.iter().zip(terms2.iter()) {
        unify_with(t1, t2, &mut subst)?;
    }
    Ok(subst)
}

/// Unify the atoms of two literals. Predicate names and arities must match;
/// polarity is the caller's concern (resolution wants it opposite, factoring
/// equal).
pub fn unify_literals(lit1: &Literal, lit2: &Literal) -> UnificationResult {
    if lit1.atom.predicate != lit2.atom.predicate {
        return Err(UnificationError::SymbolClash {
            left: lit1.atom.predicate.name.clone(),
            right: lit2.atom.predicate.name.clone(),
        });
    }
    unify_term_lists(&lit1.atom.args, &lit2.atom.args)
}

/// Unify two terms under an existing substitution, extending it in place
fn unify_with(
    term1: &Term,
    term2: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let t1 = term1.apply_substitution(subst);
    let t2 = term2.apply_substitution(subst);

    match (&t1, &t2) {
        // Already equal under the substitution
        _ if t1 == t2 => Ok(()),

        (Term::Variable(v), t) | (t, Term::Variable(v)) => {
            if t.contains_variable(v) {
                Err(UnificationError::OccursCheck {
                    variable: v.clone(),
                    term: t.clone(),
                })
            } else {
                subst.bind(v.clone(), t.clone());
                Ok(())
            }
        }

        (Term::Constant(c1), Term::Constant(c2)) => Err(UnificationError::SymbolClash {
            left: c1.name.clone(),
            right: c2.name.clone(),
        }),

        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.name != f2.name {
                return Err(UnificationError::SymbolClash {
                    left: f1.name.clone(),
                    right: f2.name.clone(),
                });
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch {
                    left: args1.len(),
                    right: args2.len(),
                });
            }
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                unify_with(arg1, arg2, subst)?;
            }
            Ok(())
        }

        (Term::Function(f, _), Term::Constant(c)) | (Term::Constant(c), Term::Function(f, _)) => {
            Err(UnificationError::SymbolClash {
                left: f.name.clone(),
                right: c.name.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::Atom;

    #[test]
    fn test_unify_variable_with_constant() {
        let x = Term::var("x");
        let a = Term::constant("A");

        let subst = unify(&x, &a).unwrap();
        assert_eq!(subst.get(&Variable::new("x")), Some(&a));
    }

    #[test]
    fn test_unify_two_variables() {
        let subst = unify(&Term::var("x"), &Term::var("y")).unwrap();
        assert_eq!(subst.len(), 1);
    }

    #[test]
    fn test_unify_function_arguments() {
        // f(x, B) with f(A, y)
        let t1 = Term::function("f", vec![Term::var("x"), Term::constant("B")]);
        let t2 = Term::function("f", vec![Term::constant("A"), Term::var("y")]);

        let subst = unify(&t1, &t2).unwrap();
        assert_eq!(t1.apply_substitution(&subst), t2.apply_substitution(&subst));
        assert_eq!(subst.get(&Variable::new("x")), Some(&Term::constant("A")));
        assert_eq!(subst.get(&Variable::new("y")), Some(&Term::constant("B")));
    }

    #[test]
    fn test_chained_variables() {
        // f(x, x) with f(y, A) forces y -> A through x
        let t1 = Term::function("f", vec![Term::var("x"), Term::var("x")]);
        let t2 = Term::function("f", vec![Term::var("y"), Term::constant("A")]);

        let subst = unify(&t1, &t2).unwrap();
        assert_eq!(t1.apply_substitution(&subst), t2.apply_substitution(&subst));
        assert_eq!(
            Term::var("y").apply_substitution(&subst),
            Term::constant("A")
        );
    }

    #[test]
    fn test_occurs_check() {
        let x = Term::var("x");
        let fx = Term::function("f", vec![Term::var("x")]);
        assert!(matches!(
            unify(&x, &fx),
            Err(UnificationError::OccursCheck { .. })
        ));
    }

    #[test]
    fn test_occurs_check_nested() {
        let x = Term::var("x");
        let t = Term::function("f", vec![Term::function("g", vec![Term::var("x")])]);
        assert!(matches!(
            unify(&x, &t),
            Err(UnificationError::OccursCheck { .. })
        ));
    }

    #[test]
    fn test_constant_clash() {
        assert!(matches!(
            unify(&Term::constant("A"), &Term::constant("B")),
            Err(UnificationError::SymbolClash { .. })
        ));
    }

    #[test]
    fn test_function_clash() {
        let t1 = Term::function("f", vec![Term::var("x")]);
        let t2 = Term::function("g", vec![Term::var("x")]);
        assert!(matches!(
            unify(&t1, &t2),
            Err(UnificationError::SymbolClash { .. })
        ));
    }

    #[test]
    fn test_literal_unification() {
        let lit1 = Literal::positive(Atom::new("P", vec![Term::var("x")]));
        let lit2 = Literal::negative(Atom::new("P", vec![Term::constant("A")]));

        // Polarity is ignored here; only the atoms matter
        let subst = unify_literals(&lit1, &lit2).unwrap();
        assert_eq!(
            lit1.atom.apply_substitution(&subst),
            lit2.atom.apply_substitution(&subst)
        );
    }

    #[test]
    fn test_literal_predicate_mismatch() {
        let lit1 = Literal::positive(Atom::new("P", vec![Term::var("x")]));
        let lit2 = Literal::positive(Atom::new("Q", vec![Term::var("x")]));
        assert!(unify_literals(&lit1, &lit2).is_err());
    }

    #[test]
    fn test_arity_mismatch() {
        let err = unify_term_lists(&[Term::var("x")], &[]).unwrap_err();
        assert_eq!(err, UnificationError::ArityMismatch { left: 1, right: 0 });
    }

    #[test]
    fn test_mgu_is_most_general() {
        // Unifying P(x) with P(y) must keep one side a variable, not pick a
        // constant
        let subst = unify(&Term::var("x"), &Term::var("y")).unwrap();
        let mapped = Term::var("x").apply_substitution(&subst);
        assert!(matches!(mapped, Term::Variable(_)));
    }
}
