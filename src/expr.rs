// src/expr.rs
//
// AST restreint de l'évaluateur.
//
// Trois variantes, pas une de plus : littéral, opposé, opération binaire.
// Aucune variante identifiant/appel/attribut n'existe — la garantie de
// sécurité est structurelle : cet arbre ne PEUT PAS représenter une
// résolution de nom ni une invocation, quel que soit le texte d'entrée.
//
// L'évaluation est itérative (marques Entrer/Sortir sur pile explicite) :
// une entrée adversairement profonde ne fait pas déborder la pile d'appels.

use crate::erreurs::ErreurEval;
use crate::nombre::Nombre;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBin {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(Nombre),
    Neg(Box<Expr>),
    Bin(OpBin, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue l'arbre en une valeur (post-ordre itératif).
    pub fn evalue(&self) -> Result<Nombre, ErreurEval> {
        use Expr::*;

        enum Marque<'a> {
            Entrer(&'a Expr),
            Sortir(&'a Expr),
        }

        let mut pile: Vec<Marque<'_>> = Vec::with_capacity(64);
        let mut res: Vec<Nombre> = Vec::with_capacity(64);

        pile.push(Marque::Entrer(self));

        while let Some(m) = pile.pop() {
            match m {
                Marque::Entrer(e) => {
                    pile.push(Marque::Sortir(e));
                    match e {
                        Bin(_, a, b) => {
                            pile.push(Marque::Entrer(b.as_ref()));
                            pile.push(Marque::Entrer(a.as_ref()));
                        }
                        Neg(x) => pile.push(Marque::Entrer(x.as_ref())),
                        Num(_) => {}
                    }
                }

                Marque::Sortir(e) => match e {
                    Num(n) => res.push(n.clone()),

                    Neg(_) => {
                        let x = depile(&mut res)?;
                        res.push(x.oppose());
                    }

                    Bin(op, _, _) => {
                        let b = depile(&mut res)?;
                        let a = depile(&mut res)?;
                        res.push(applique(*op, &a, &b)?);
                    }
                },
            }
        }

        match res.pop() {
            Some(v) if res.is_empty() => Ok(v),
            _ => Err(ErreurEval::NonSupporte("pile d'évaluation incohérente".into())),
        }
    }
}

fn depile(res: &mut Vec<Nombre>) -> Result<Nombre, ErreurEval> {
    res.pop()
        .ok_or_else(|| ErreurEval::NonSupporte("pile d'évaluation vide".into()))
}

fn applique(op: OpBin, a: &Nombre, b: &Nombre) -> Result<Nombre, ErreurEval> {
    match op {
        OpBin::Add => a.ajoute(b),
        OpBin::Sub => a.soustrait(b),
        OpBin::Mul => a.multiplie(b),
        OpBin::Div => a.divise(b),
        OpBin::Rem => a.reste(b),
        OpBin::Pow => a.puissance(b),
    }
}
