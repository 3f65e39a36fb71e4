// src/fonctions.rs
//
// Table des fonctions connues — constante de processus, immuable.
//
// Sert au normaliseur à trancher « lettre suivie de ( » :
//   sin(x)  -> application de fonction (on ne touche pas)
//   x(y+1)  -> multiplication implicite (on insère *)
// et à envelopper l'application sans parenthèses (`sin x` -> `sin(x)`).
//
// Le test d'appartenance est exact et sensible à la casse : on consulte la
// table sur des identifiants entiers déjà découpés, jamais par recherche de
// sous-chaîne dans le texte.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Les noms reconnus comme fonctions mathématiques.
static NOMS_FONCTIONS: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "asinh", "acosh",
    "atanh", "log", "ln", "exp", "sqrt", "abs", "ceil", "floor", "sec", "csc", "cot",
];

static TABLE: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn table() -> &'static HashSet<&'static str> {
    TABLE.get_or_init(|| NOMS_FONCTIONS.iter().copied().collect())
}

/// Appartenance exacte (sensible à la casse, pas de préfixe/suffixe).
pub fn est_fonction_connue(nom: &str) -> bool {
    table().contains(nom)
}

/// Les noms de la table, dans l'ordre de déclaration (pour l'interface
/// externe et les tests de propriétés).
pub fn noms_fonctions() -> &'static [&'static str] {
    NOMS_FONCTIONS
}
