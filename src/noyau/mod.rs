//! Noyau SI : calcul avec unités
//!
//! Organisation interne :
//! - dimensions.rs : 7 dimensions de base + vecteur d’exposants
//! - unites.rs     : unités dérivées (N, J, Pa…) -> unités de base
//! - protege.rs    : séquences protégées (encode / decode)
//! - constantes.rs : constantes physiques (π, k_B, ε0, c, e)
//! - tables.rs     : tables partagées, construites une fois
//! - normalise.rs  : texte saisi -> texte canonique
//! - jetons.rs     : tokenisation + réécriture LaTeX
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST
//! - grandeur.rs   : valeur + dimensions, règles de propagation
//! - eval.rs       : pipeline complet
//! - format.rs     : affichage "= 1.2346\times 10^{3} …"

pub mod constantes;
pub mod dimensions;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod grandeur;
pub mod jetons;
pub mod normalise;
pub mod protege;
pub mod rpn;
pub mod tables;
pub mod unites;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::{calculer, Calcul, Demarche};
pub use tables::Tables;
