// src/noyau/dimensions.rs
//
// Dimensions de base SI + vecteur d’exposants.
// - Dimension : ensemble fermé (7 axes), ordre fixe = ordre d’affichage
// - VecteurDimension : Dimension -> exposant entier, JAMAIS d’entrée à 0
//
// Ordre déterministe : BTreeMap sur Dimension (Ord dérivé de l’ordre des variantes).

use num_rational::Rational64;
use num_traits::{CheckedMul, ToPrimitive};

use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Temps,
    Longueur,
    Masse,
    Courant,
    Quantite,
    IntensiteLumineuse,
    Temperature,
}

impl Dimension {
    /// Les 7 dimensions, dans l’ordre canonique.
    pub const TOUTES: [Dimension; 7] = [
        Dimension::Temps,
        Dimension::Longueur,
        Dimension::Masse,
        Dimension::Courant,
        Dimension::Quantite,
        Dimension::IntensiteLumineuse,
        Dimension::Temperature,
    ];

    /// Symbole de l’unité de base (celui écrit dans \operatorname{...}).
    pub fn symbole(self) -> &'static str {
        match self {
            Dimension::Temps => "s",
            Dimension::Longueur => "m",
            Dimension::Masse => "kg",
            Dimension::Courant => "A",
            Dimension::Quantite => "mol",
            Dimension::IntensiteLumineuse => "cd",
            Dimension::Temperature => "K",
        }
    }

    pub fn depuis_symbole(s: &str) -> Option<Dimension> {
        Dimension::TOUTES.into_iter().find(|d| d.symbole() == s)
    }
}

/// Exposant par dimension de base.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VecteurDimension {
    exposants: BTreeMap<Dimension, i32>,
}

impl VecteurDimension {
    /// Grandeur sans dimension (vecteur vide).
    pub fn sans_dimension() -> Self {
        Self::default()
    }

    /// Une seule dimension à la puissance 1 (ex: le mètre).
    pub fn base(d: Dimension) -> Self {
        Self::depuis_paires([(d, 1)])
    }

    /// Construit depuis des paires; les exposants d’une même dimension s’additionnent,
    /// les zéros sont retirés.
    pub fn depuis_paires(paires: impl IntoIterator<Item = (Dimension, i32)>) -> Self {
        let mut v = Self::default();
        for (d, n) in paires {
            v.ajoute(d, n);
        }
        v
    }

    fn ajoute(&mut self, d: Dimension, n: i32) {
        let e = self.exposants.entry(d).or_insert(0);
        *e = e.saturating_add(n);
        if *e == 0 {
            self.exposants.remove(&d);
        }
    }

    #[cfg(test)]
    pub fn exposant(&self, d: Dimension) -> i32 {
        self.exposants.get(&d).copied().unwrap_or(0)
    }

    pub fn est_sans_dimension(&self) -> bool {
        self.exposants.is_empty()
    }

    /// Itère (dimension, exposant ≠ 0) dans l’ordre canonique.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, i32)> + '_ {
        self.exposants.iter().map(|(d, n)| (*d, *n))
    }

    /// Multiplication de grandeurs : somme des exposants.
    pub fn produit(&self, autre: &Self) -> Self {
        let mut v = self.clone();
        for (d, n) in autre.iter() {
            v.ajoute(d, n);
        }
        v
    }

    /// Division de grandeurs : différence des exposants.
    pub fn quotient(&self, autre: &Self) -> Self {
        let mut v = self.clone();
        for (d, n) in autre.iter() {
            v.ajoute(d, n.saturating_neg());
        }
        v
    }

    pub fn puissance_entiere(&self, n: i32) -> Self {
        Self::depuis_paires(self.iter().map(|(d, e)| (d, e.saturating_mul(n))))
    }

    /// Puissance rationnelle exacte (racines).
    /// None si un exposant résultant n’est pas entier (ex: √m) ou déborde.
    pub fn puissance_rationnelle(&self, r: Rational64) -> Option<Self> {
        let mut paires = Vec::new();
        for (d, e) in self.iter() {
            let p = Rational64::from_integer(i64::from(e)).checked_mul(&r)?;
            if !p.is_integer() {
                return None;
            }
            paires.push((d, p.to_integer().to_i32()?));
        }
        Some(Self::depuis_paires(paires))
    }
}

impl fmt::Display for VecteurDimension {
    /// Forme compacte (journaux / démarche) : "m s^-1", "1" si sans dimension.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_sans_dimension() {
            return write!(f, "1");
        }
        let mut premier = true;
        for (d, n) in self.iter() {
            if !premier {
                write!(f, " ")?;
            }
            premier = false;
            if n == 1 {
                write!(f, "{}", d.symbole())?;
            } else {
                write!(f, "{}^{}", d.symbole(), n)?;
            }
        }
        Ok(())
    }
}
