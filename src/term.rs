use std::rc::Rc;

pub type TermRef = Rc<Term>;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Term {
    /// `x`
    Var(String),
    /// `(λx.body)`
    Abs(String, TermRef),
    /// `(func arg)`
    Apply(TermRef, TermRef),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn abs(var: impl Into<String>, body: Term) -> Self {
        Term::Abs(var.into(), body.into())
    }

    pub fn apply(func: Term, arg: Term) -> Self {
        Term::Apply(func.into(), arg.into())
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name) => f.write_str(name),
            Term::Abs(var, body) => f.write_fmt(format_args!("(λ{var}.{body})")),
            Term::Apply(func, arg) => f.write_fmt(format_args!("({func} {arg})")),
        }
    }
}
