// src/rpn.rs
//
// Shunting-yard -> RPN -> AST
//
// Grammaire couverte (précédence croissante) :
//   + -  <  * / %  <  ** (associatif à droite)  <  moins unaire
//
// Le moins unaire lie plus fort que `**` : -2**2 se lit (-2)**2.
//
// Règles :
// - Ident(_) : rejeté immédiatement (erreur de syntaxe avec position).
//   Aucune production de la grammaire n'accepte un identifiant — c'est la
//   propriété de sécurité, le flux ne peut atteindre ni nom ni appel.
// - Moins unaire : un `-` qui arrive quand on n'attend PAS une valeur est
//   requalifié en `MoinsUnaire`.
// - Échec rapide : opérande ou opérateur à une position où la grammaire ne
//   l'attend pas -> erreur de syntaxe immédiate, jamais de résultat partiel.

use crate::erreurs::ErreurEval;
use crate::expr::{Expr, OpBin};
use crate::jetons::{Jeton, Sorte};
use crate::nombre::Nombre;

fn precedence(s: &Sorte) -> i32 {
    match s {
        Sorte::Plus | Sorte::Minus => 1,
        Sorte::Star | Sorte::Slash | Sorte::Percent => 2,
        Sorte::Pow => 3,
        Sorte::MoinsUnaire => 4,
        _ => 0,
    }
}

fn is_right_associative(s: &Sorte) -> bool {
    matches!(s, Sorte::Pow | Sorte::MoinsUnaire)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Num(2), Pow, Num(3), Pow, Num(2)]
///   rpn:    [Num(2), Num(3), Num(2), Pow, Pow]    (droite-associatif)
pub fn to_rpn(jetons: &[Jeton]) -> Result<Vec<Jeton>, ErreurEval> {
    let mut out: Vec<Jeton> = Vec::new();
    let mut ops: Vec<Jeton> = Vec::new();

    // « valeur » = un atome ou une expression fermée.
    // Sert à requalifier le moins unaire et à échouer tôt.
    let mut prev_was_value = false;

    for jeton in jetons.iter().cloned() {
        match &jeton.sorte {
            Sorte::Num(_) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe(jeton.pos, "opérande inattendu"));
                }
                out.push(jeton);
                prev_was_value = true;
            }

            Sorte::Ident(nom) => {
                return Err(ErreurEval::syntaxe(
                    jeton.pos,
                    format!("identificateur inattendu: '{nom}'"),
                ));
            }

            Sorte::LPar => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe(
                        jeton.pos,
                        "parenthèse ouvrante inattendue",
                    ));
                }
                ops.push(jeton);
            }

            Sorte::RPar => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe(
                        jeton.pos,
                        "parenthèse fermante inattendue",
                    ));
                }
                loop {
                    match ops.pop() {
                        Some(top) if matches!(top.sorte, Sorte::LPar) => break,
                        Some(top) => out.push(top),
                        None => {
                            return Err(ErreurEval::syntaxe(
                                jeton.pos,
                                "parenthèse fermante sans ouvrante",
                            ));
                        }
                    }
                }
                prev_was_value = true;
            }

            Sorte::Minus if !prev_was_value => {
                // moins unaire : précédence maximale, rien à dépiler
                ops.push(Jeton {
                    sorte: Sorte::MoinsUnaire,
                    pos: jeton.pos,
                });
            }

            Sorte::Plus | Sorte::Minus | Sorte::Star | Sorte::Slash | Sorte::Percent
            | Sorte::Pow => {
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe(jeton.pos, "opérateur inattendu"));
                }

                while let Some(top) = ops.last() {
                    if matches!(top.sorte, Sorte::LPar) {
                        break;
                    }

                    let p_top = precedence(&top.sorte);
                    let p_jeton = precedence(&jeton.sorte);

                    let doit_pop = if is_right_associative(&jeton.sorte) {
                        p_top > p_jeton
                    } else {
                        p_top >= p_jeton
                    };

                    if doit_pop {
                        out.push(ops.pop().expect("ops non vide"));
                    } else {
                        break;
                    }
                }

                ops.push(jeton);
                prev_was_value = false;
            }

            // jamais tokenisé ; défense en profondeur
            Sorte::MoinsUnaire => {
                return Err(ErreurEval::NonSupporte(
                    "moins unaire dans le flux de jetons".into(),
                ));
            }
        }
    }

    if !prev_was_value {
        let pos = jetons.last().map(|j| j.pos).unwrap_or(0);
        return Err(ErreurEval::syntaxe(pos, "expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op.sorte, Sorte::LPar) {
            return Err(ErreurEval::syntaxe(op.pos, "parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN.
pub fn from_rpn(rpn: &[Jeton]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for jeton in rpn.iter().cloned() {
        match jeton.sorte {
            Sorte::Num(r) => st.push(Expr::Num(Nombre::Exact(r))),

            Sorte::Plus | Sorte::Minus | Sorte::Star | Sorte::Slash | Sorte::Percent
            | Sorte::Pow => {
                let b = depile(&mut st, jeton.pos)?;
                let a = depile(&mut st, jeton.pos)?;

                let op = match jeton.sorte {
                    Sorte::Plus => OpBin::Add,
                    Sorte::Minus => OpBin::Sub,
                    Sorte::Star => OpBin::Mul,
                    Sorte::Slash => OpBin::Div,
                    Sorte::Percent => OpBin::Rem,
                    Sorte::Pow => OpBin::Pow,
                    _ => return Err(ErreurEval::NonSupporte("opérateur hors liste".into())),
                };

                st.push(Expr::Bin(op, Box::new(a), Box::new(b)));
            }

            Sorte::MoinsUnaire => {
                let x = depile(&mut st, jeton.pos)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            // to_rpn les rejette déjà ; défense en profondeur
            Sorte::Ident(nom) => {
                return Err(ErreurEval::syntaxe(
                    jeton.pos,
                    format!("identificateur inattendu: '{nom}'"),
                ));
            }
            Sorte::LPar | Sorte::RPar => {
                return Err(ErreurEval::NonSupporte("parenthèse en RPN".into()));
            }
        }
    }

    match st.pop() {
        Some(e) if st.is_empty() => Ok(e),
        _ => Err(ErreurEval::NonSupporte("RPN incohérente".into())),
    }
}

fn depile(st: &mut Vec<Expr>, pos: usize) -> Result<Expr, ErreurEval> {
    st.pop()
        .ok_or_else(|| ErreurEval::syntaxe(pos, "expression invalide"))
}
