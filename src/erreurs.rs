// src/erreurs.rs
//
// Erreurs du noyau — des valeurs, jamais des exceptions qui traversent la
// frontière publique. L'interface (externe) choisit le message utilisateur
// et la politique d'affichage ; ici on classe, on ne récupère pas.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEval {
    /// Flux de jetons malformé : caractère invalide, parenthèse orpheline,
    /// opérateur isolé, entrée vide… `position` est l'indice (en caractères)
    /// du point fautif dans la chaîne évaluée.
    #[error("erreur de syntaxe (position {position}): {detail}")]
    Syntaxe { position: usize, detail: String },

    /// État de parse que la grammaire rend normalement inatteignable.
    /// Conservé par défense en profondeur.
    #[error("construction non supportée: {0}")]
    NonSupporte(String),

    /// Division ou reste par un opérande nul.
    #[error("division par zéro")]
    DivisionParZero,

    /// Résultat trop grand : flottant non fini, ou puissance exacte dont la
    /// taille estimée dépasse le garde-fou.
    #[error("dépassement de capacité")]
    Debordement,

    /// Opération réelle hors de son domaine (ex: base négative élevée à un
    /// exposant non entier).
    #[error("hors domaine réel: {0}")]
    Domaine(String),
}

impl ErreurEval {
    /// Raccourci pour les erreurs de syntaxe.
    pub fn syntaxe(position: usize, detail: impl Into<String>) -> Self {
        ErreurEval::Syntaxe {
            position,
            detail: detail.into(),
        }
    }
}
