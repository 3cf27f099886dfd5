// src/noyau/erreur.rs
//
// Erreurs d’évaluation. La normalisation et le formatage sont totaux :
// toute erreur vient d’ici.

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurEval {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("syntaxe: {0}")]
    Syntaxe(String),

    #[error("jeton inconnu: {0}")]
    JetonInconnu(String),

    #[error("dimensions incompatibles: {gauche} {op} {droite}")]
    DimensionsIncompatibles {
        gauche: String,
        op: char,
        droite: String,
    },

    #[error("exposant avec dimension: {0}")]
    ExposantDimensionne(String),

    #[error("exposant fractionnaire sur une grandeur avec dimension: {0}")]
    ExposantFractionnaire(String),

    #[error("{fonction}: argument avec dimension ({dimension})")]
    ArgumentDimensionne {
        fonction: &'static str,
        dimension: String,
    },

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    ResultatNonFini,
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }
}
