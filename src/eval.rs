use std::collections::HashSet;

use thiserror::Error;

use crate::term::Term;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Reduction did not finish within {0} beta steps")]
    ReductionLimitExceeded(usize),
}
pub type Result<T> = std::result::Result<T, EvalError>;

/// First name not in `used`: single letters `a`..`z` in order, then
/// counter-suffixed letters (`a1`..`z1`, `a2`, ...).
fn fresh_name(used: &HashSet<String>) -> String {
    (0usize..)
        .flat_map(|i| {
            ('a'..='z').map(move |c| {
                if i == 0 {
                    c.to_string()
                } else {
                    format!("{c}{i}")
                }
            })
        })
        .find(|name| !used.contains(name))
        .expect("the name supply is unbounded")
}

/// Renames every free occurrence of `old` in `term` to `new`, returning a
/// fresh term. Recursion stops at an abstraction that re-binds `old`: such
/// occurrences refer to a different variable.
pub fn rename(term: &Term, old: &str, new: &str) -> Term {
    match term {
        Term::Var(name) if name == old => Term::Var(new.to_string()),
        Term::Var(_) => term.clone(),
        Term::Abs(var, _) if var == old => term.clone(),
        Term::Abs(var, body) => Term::Abs(var.clone(), rename(body, old, new).into()),
        Term::Apply(func, arg) => {
            Term::Apply(rename(func, old, new).into(), rename(arg, old, new).into())
        }
    }
}

/// Returns a copy of `term` in which every binder name is distinct from
/// every other binder name and from everything initially in `used`. Free
/// variables are recorded into `used` but never renamed. The set
/// accumulates: a binder in the argument of an application is checked
/// against names already claimed on the function side.
pub fn ensure_fresh(term: &Term, used: &mut HashSet<String>) -> Term {
    match term {
        Term::Var(name) => {
            used.insert(name.clone());
            term.clone()
        }
        Term::Abs(var, body) => {
            let (var, body) = if used.contains(var) {
                let fresh = fresh_name(used);
                let body = rename(body, var, &fresh);
                (fresh, body)
            } else {
                (var.clone(), body.as_ref().clone())
            };
            used.insert(var.clone());
            Term::Abs(var, ensure_fresh(&body, used).into())
        }
        Term::Apply(func, arg) => {
            let func = ensure_fresh(func, used);
            let arg = ensure_fresh(arg, used);
            Term::Apply(func.into(), arg.into())
        }
    }
}

/// Core substitution `term[name := replacement]`. Capture-unsafe on its
/// own: it recurses into an abstraction even when the bound name shadows
/// `name`. Callers must run [`ensure_fresh`] first so that no binder in
/// `term` collides with `name` or with a free variable of `replacement`;
/// the beta step of [`normalize`] does this internally.
pub fn substitute(term: &Term, name: &str, replacement: &Term) -> Term {
    match term {
        Term::Var(var) if var == name => replacement.clone(),
        Term::Var(_) => term.clone(),
        Term::Abs(var, body) => Term::Abs(var.clone(), substitute(body, name, replacement).into()),
        Term::Apply(func, arg) => Term::Apply(
            substitute(func, name, replacement).into(),
            substitute(arg, name, replacement).into(),
        ),
    }
}

struct Fuel {
    remaining: Option<usize>,
    budget: usize,
}

impl Fuel {
    fn unlimited() -> Self {
        Self {
            remaining: None,
            budget: 0,
        }
    }

    fn limited(budget: usize) -> Self {
        Self {
            remaining: Some(budget),
            budget,
        }
    }

    fn spend(&mut self) -> Result<()> {
        match &mut self.remaining {
            Some(0) => Err(EvalError::ReductionLimitExceeded(self.budget)),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

fn normalize_rec(term: &Term, fuel: &mut Fuel) -> Result<Term> {
    match term {
        Term::Var(_) => Ok(term.clone()),
        Term::Abs(var, body) => Ok(Term::Abs(var.clone(), normalize_rec(body, fuel)?.into())),
        Term::Apply(func, arg) => {
            let func = normalize_rec(func, fuel)?;
            let arg = normalize_rec(arg, fuel)?;
            if let Term::Abs(_, _) = func {
                // Seed the used set with every name occurring in the
                // argument, then freshen the function against it: no binder
                // left in `func` can capture a free variable of `arg`, and
                // no binder shadows another, so the naive substitution
                // below is sound.
                let mut used = HashSet::new();
                let arg = ensure_fresh(&arg, &mut used);
                match ensure_fresh(&func, &mut used) {
                    Term::Abs(var, body) => {
                        fuel.spend()?;
                        normalize_rec(&substitute(&body, &var, &arg), fuel)
                    }
                    _ => unreachable!("ensure_fresh preserves the term shape"),
                }
            } else {
                Ok(Term::Apply(func.into(), arg.into()))
            }
        }
    }
}

/// Reduces `term` to beta-normal form under an applicative-order strategy:
/// an application's function and argument are both fully normalized before
/// the beta step. May diverge, even on terms whose normal form is reachable
/// under normal order (an unused argument is still evaluated); use
/// [`normalize_within`] for bounded behavior.
pub fn normalize(term: &Term) -> Term {
    match normalize_rec(term, &mut Fuel::unlimited()) {
        Ok(term) => term,
        Err(EvalError::ReductionLimitExceeded(_)) => {
            unreachable!("no step budget was set")
        }
    }
}

/// Like [`normalize`], but performs at most `budget` beta steps and fails
/// with [`EvalError::ReductionLimitExceeded`] once they are used up.
pub fn normalize_within(term: &Term, budget: usize) -> Result<Term> {
    normalize_rec(term, &mut Fuel::limited(budget))
}
