// src/noyau/grandeur.rs
//
// Grandeur = valeur f64 + vecteur de dimensions (unités de base seulement).
// Règles de propagation :
// - + / - : dimensions identiques exigées
// - * / / : exposants additionnés / soustraits
// - ^     : exposant sans dimension; base dimensionnée => exposant rationnel exact
//           donnant des exposants entiers

use num_rational::Rational64;
use num_traits::ToPrimitive;

use super::dimensions::{Dimension, VecteurDimension};
use super::erreur::ErreurEval;
use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub struct Grandeur {
    pub valeur: f64,
    pub dims: VecteurDimension,
}

impl Grandeur {
    pub fn nombre(valeur: f64) -> Self {
        Self {
            valeur,
            dims: VecteurDimension::sans_dimension(),
        }
    }

    /// Une unité de base seule : 1 m, 1 s, …
    pub fn unite(d: Dimension) -> Self {
        Self {
            valeur: 1.0,
            dims: VecteurDimension::base(d),
        }
    }

    pub fn oppose(self) -> Self {
        Self {
            valeur: -self.valeur,
            dims: self.dims,
        }
    }

    pub fn plus(self, autre: Self) -> Result<Self, ErreurEval> {
        self.verifie_memes_dims(&autre, '+')?;
        Ok(Self {
            valeur: self.valeur + autre.valeur,
            dims: self.dims,
        })
    }

    pub fn moins(self, autre: Self) -> Result<Self, ErreurEval> {
        self.verifie_memes_dims(&autre, '-')?;
        Ok(Self {
            valeur: self.valeur - autre.valeur,
            dims: self.dims,
        })
    }

    pub fn fois(self, autre: Self) -> Self {
        Self {
            valeur: self.valeur * autre.valeur,
            dims: self.dims.produit(&autre.dims),
        }
    }

    pub fn divise(self, autre: Self) -> Result<Self, ErreurEval> {
        if autre.valeur == 0.0 {
            return Err(ErreurEval::DivisionParZero);
        }
        Ok(Self {
            valeur: self.valeur / autre.valeur,
            dims: self.dims.quotient(&autre.dims),
        })
    }

    /// self ^ exposant. `exact` : valeur rationnelle de l’exposant quand elle est connue
    /// (relue dans l’AST), sinon on retombe sur un exposant entier.
    pub fn puissance(self, exposant: Self, exact: Option<Rational64>) -> Result<Self, ErreurEval> {
        if !exposant.dims.est_sans_dimension() {
            return Err(ErreurEval::ExposantDimensionne(exposant.dims.to_string()));
        }

        let valeur = match exact {
            // racine réelle : (-8)^(1/3) = -2, (-8)^(2/3) = 4
            Some(r) if self.valeur < 0.0 && !r.is_integer() && *r.denom() % 2 != 0 => {
                let v = self.valeur.abs().powf(exposant.valeur);
                if *r.numer() % 2 != 0 {
                    -v
                } else {
                    v
                }
            }
            _ => self.valeur.powf(exposant.valeur),
        };
        if self.dims.est_sans_dimension() {
            return Ok(Self::nombre(valeur));
        }

        let r = exact
            .or_else(|| entier(exposant.valeur).map(Rational64::from_integer))
            .ok_or_else(|| ErreurEval::ExposantFractionnaire(self.dims.to_string()))?;
        let dims = match r.is_integer().then(|| r.to_integer().to_i32()).flatten() {
            Some(n) => Some(self.dims.puissance_entiere(n)),
            None => self.dims.puissance_rationnelle(r),
        }
        .ok_or_else(|| ErreurEval::ExposantFractionnaire(self.dims.to_string()))?;

        Ok(Self { valeur, dims })
    }

    /// Application d’une fonction. sqrt divise les exposants par 2; les autres exigent
    /// un argument sans dimension.
    pub fn applique(self, f: Fonction) -> Result<Self, ErreurEval> {
        if f == Fonction::Racine {
            let dims = self
                .dims
                .puissance_rationnelle(Rational64::new(1, 2))
                .ok_or_else(|| ErreurEval::ExposantFractionnaire(self.dims.to_string()))?;
            return Ok(Self {
                valeur: self.valeur.sqrt(),
                dims,
            });
        }

        if !self.dims.est_sans_dimension() {
            return Err(ErreurEval::ArgumentDimensionne {
                fonction: f.nom(),
                dimension: self.dims.to_string(),
            });
        }

        let x = self.valeur;
        let v = match f {
            Fonction::Sin => x.sin(),
            Fonction::Cos => x.cos(),
            Fonction::Tan => x.tan(),
            Fonction::Log => x.log10(),
            Fonction::Ln => x.ln(),
            Fonction::Racine => x.sqrt(),
        };
        Ok(Self::nombre(v))
    }

    fn verifie_memes_dims(&self, autre: &Self, op: char) -> Result<(), ErreurEval> {
        if self.dims == autre.dims {
            return Ok(());
        }
        Err(ErreurEval::DimensionsIncompatibles {
            gauche: self.dims.to_string(),
            op,
            droite: autre.dims.to_string(),
        })
    }
}

fn entier(v: f64) -> Option<i64> {
    if v.fract() == 0.0 && v.abs() <= i32::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}
