//! Clause subsumption
//!
//! Clause `D` subsumes clause `E` when some substitution τ maps the literals
//! of `D` injectively onto literals of `E` (so `Dτ ⊆ E` as multisets). A
//! subsumed clause is redundant: anything derivable from it is derivable
//! from the subsumer.

use crate::fol::{Clause, Literal, Term, Variable};
use std::collections::HashMap;

/// Check whether `subsumer` subsumes `subsumee`.
pub fn subsumes(subsumer: &Clause, subsumee: &Clause) -> bool {
    if subsumer.literals.len() > subsumee.literals.len() {
        return false;
    }
    let mut subst = MatchSubst::new();
    let mut used = vec![false; subsumee.literals.len()];
    find_mapping(subsumer, subsumee, 0, &mut subst, &mut used)
}

/// One-way matching substitution with a trail for backtracking. Only
/// variables of the subsumer are bound.
struct MatchSubst<'a> {
    bindings: HashMap<&'a Variable, &'a Term>,
    trail: Vec<&'a Variable>,
}

impl<'a> MatchSubst<'a> {
    fn new() -> Self {
        MatchSubst {
            bindings: HashMap::new(),
            trail: Vec::new(),
        }
    }

    fn bind(&mut self, var: &'a Variable, term: &'a Term) {
        self.bindings.insert(var, term);
        self.trail.push(var);
    }

    fn mark(&self) -> usize {
        self.trail.len()
    }

    fn backtrack(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let var = self.trail.pop().unwrap();
            self.bindings.remove(var);
        }
    }
}

/// Backtracking search for an injective literal mapping.
fn find_mapping<'a>(
    subsumer: &'a Clause,
    subsumee: &'a Clause,
    lit_idx: usize,
    subst: &mut MatchSubst<'a>,
    used: &mut [bool],
) -> bool {
    if lit_idx >= subsumer.literals.len() {
        return true;
    }

    let pattern = &subsumer.literals[lit_idx];

    for (i, candidate) in subsumee.literals.iter().enumerate() {
        if used[i] || candidate.polarity != pattern.polarity {
            continue;
        }

        let mark = subst.mark();
        if match_literals(pattern, candidate, subst) {
            used[i] = true;
            if find_mapping(subsumer, subsumee, lit_idx + 1, subst, used) {
                return true;
            }
            used[i] = false;
        }
        subst.backtrack(mark);
    }

    false
}

fn match_literals<'a>(
    pattern: &'a Literal,
    target: &'a Literal,
    subst: &mut MatchSubst<'a>,
) -> bool {
    if pattern.atom.predicate != target.atom.predicate
        || pattern.atom.args.len() != target.atom.args.len()
    {
        return false;
    }
    pattern
        .atom
        .args
        .iter()
        .zip(&target.atom.args)
        .all(|(p, t)| match_terms(p, t, subst))
}

/// Match `pattern` against `target`; only pattern variables may be bound.
fn match_terms<'a>(pattern: &'a Term, target: &'a Term, subst: &mut MatchSubst<'a>) -> bool {
    match pattern {
        Term::Variable(v) => {
            if let Some(&bound) = subst.bindings.get(v) {
                bound == target
            } else {
                subst.bind(v, target);
                true
            }
        }
        Term::Constant(c1) => matches!(target, Term::Constant(c2) if c1 == c2),
        Term::Function(f1, args1) => match target {
            Term::Function(f2, args2) => {
                f1 == f2
                    && args1.len() == args2.len()
                    && args1
                        .iter()
                        .zip(args2)
                        .all(|(p, t)| match_terms(p, t, subst))
            }
            _ => false,
        },
    }
}
