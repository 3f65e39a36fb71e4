//! Noyau de calculatrice : normalisation du texte mathématique + évaluation restreinte
//!
//! Deux pièces coopèrent :
//! - le **normaliseur** : rend explicites les multiplications implicites (`2x`,
//!   `(x+1)(x-1)`), les puissances (`^` → `**`) et l'application des fonctions
//!   connues sans parenthèses (`sin x` → `sin(x)`) ;
//! - l'**évaluateur restreint** : évalue une chaîne arithmétique via une
//!   grammaire qui ne peut produire ni appel ni résolution de nom — la
//!   sécurité est structurelle, pas une liste noire.
//!
//! Organisation interne :
//! - caracteres.rs : classification des caractères (feuille, sans état)
//! - fonctions.rs  : table immuable des fonctions connues
//! - canon.rs      : normalisation (texte brut → texte canonique)
//! - jetons.rs     : tokenisation (jetons avec position)
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST restreint + évaluation itérative
//! - nombre.rs     : valeur numérique (rationnel exact, flottant en secours)
//! - lecture.rs    : lecture décimale tronquée d'un résultat
//! - erreurs.rs    : erreurs structurées (valeurs, jamais de panic)
//!
//! Tout est pur, synchrone et réentrant : le seul état partagé est la table
//! des fonctions, construite une fois puis en lecture seule.

pub mod canon;
pub mod caracteres;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod jetons;
pub mod lecture;
pub mod nombre;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use canon::normalise;
pub use erreurs::ErreurEval;
pub use eval::{eval_detaille, eval_expression, eval_saisie, Demarche};
pub use lecture::lecture_decimale;
pub use nombre::Nombre;
