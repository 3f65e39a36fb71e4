//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> valeur (exacte, flottante en secours)
//!
//! L'évaluateur est une fonction totale : pour toute chaîne il rend soit une
//! valeur, soit UNE erreur structurée — jamais de panic, jamais de résultat
//! partiel, et jamais d'exécution de code quel que soit le contenu.
//!
//! La normalisation est volontairement hors du pipeline : `eval_expression`
//! accepte n'importe quelle chaîne arithmétique valide, et `eval_saisie`
//! compose normalisation + évaluation pour la saisie utilisateur brute.

use crate::canon::normalise;
use crate::erreurs::ErreurEval;
use crate::jetons::{format_jetons, tokenize};
use crate::nombre::Nombre;
use crate::rpn::{from_rpn, to_rpn};

/// Trace de la démarche (affichage/debug) : les étapes intermédiaires en
/// texte, pour l'interface qui veut montrer « comment » on a calculé.
#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une chaîne arithmétique déjà explicite.
pub fn eval_expression(entree: &str) -> Result<Nombre, ErreurEval> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe(0, "entrée vide"));
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;
    expr.evalue()
}

/// Comme [`eval_expression`], avec la démarche (jetons, RPN) en plus.
pub fn eval_detaille(entree: &str) -> Result<(Nombre, Demarche), ErreurEval> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe(0, "entrée vide"));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_jetons(&jetons);

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_jetons(&rpn);

    // 3) AST + valeur
    let expr = from_rpn(&rpn)?;
    let valeur = expr.evalue()?;

    Ok((
        valeur,
        Demarche {
            jetons: jetons_txt,
            rpn: rpn_txt,
        },
    ))
}

/// Saisie utilisateur brute : normalisation puis évaluation.
pub fn eval_saisie(brut: &str) -> Result<Nombre, ErreurEval> {
    eval_expression(&normalise(brut))
}
