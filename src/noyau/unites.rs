// src/noyau/unites.rs
//
// Unités dérivées (système MKS) -> vecteur de dimensions de base.
// Table fermée : pas d’unités utilisateur, pas de préfixes (k, m, µ…).

use super::dimensions::{Dimension, VecteurDimension};

use Dimension::{Courant as A, Longueur as M, Masse as KG, Temps as S};

/// Définition brute : symbole + facteurs (dimension, exposant).
const DEFINITIONS: &[(&str, &[(Dimension, i32)])] = &[
    ("Hz", &[(S, -1)]),
    ("N", &[(KG, 1), (M, 1), (S, -2)]),
    ("Pa", &[(KG, 1), (M, -1), (S, -2)]),
    ("J", &[(KG, 1), (M, 2), (S, -2)]),
    ("W", &[(KG, 1), (M, 2), (S, -3)]),
    ("C", &[(S, 1), (A, 1)]),
    ("V", &[(KG, 1), (M, 2), (S, -3), (A, -1)]),
    ("F", &[(KG, -1), (M, -2), (S, 4), (A, 2)]),
    ("S", &[(KG, -1), (M, -2), (S, 3), (A, 2)]),
    ("Wb", &[(KG, 1), (M, 2), (S, -2), (A, -1)]),
    ("T", &[(KG, 1), (S, -2), (A, -1)]),
    ("H", &[(KG, 1), (M, 2), (S, -2), (A, -2)]),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniteDerivee {
    pub symbole: &'static str,
    pub vecteur: VecteurDimension,
}

impl UniteDerivee {
    /// Texte tel qu’écrit par l’utilisateur : \operatorname{N}
    pub fn motif(&self) -> String {
        operatorname(self.symbole)
    }

    /// Produit des facteurs de base, multiplication implicite :
    /// {{\operatorname{s}}^{-2}{\operatorname{m}}^{1}{\operatorname{kg}}^{1}}
    ///
    /// Le tout est regroupé pour qu’un exposant appliqué à l’unité (\operatorname{N}^{2})
    /// porte sur tous les facteurs. Vecteur vide => "" (facteur sans dimension).
    pub fn expansion(&self) -> String {
        if self.vecteur.est_sans_dimension() {
            return String::new();
        }
        let mut facteurs = String::new();
        for (d, n) in self.vecteur.iter() {
            facteurs.push_str(&format!("{{{}}}^{{{n}}}", operatorname(d.symbole())));
        }
        format!("{{{facteurs}}}")
    }
}

pub fn operatorname(nom: &str) -> String {
    format!("\\operatorname{{{nom}}}")
}

/// Construit la table des unités dérivées (une fois, au démarrage).
pub fn table_unites_derivees() -> Vec<UniteDerivee> {
    DEFINITIONS
        .iter()
        .map(|&(symbole, facteurs)| UniteDerivee {
            symbole,
            vecteur: VecteurDimension::depuis_paires(facteurs.iter().copied()),
        })
        .collect()
}
