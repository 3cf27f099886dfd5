// src/noyau/expr.rs
//
// AST numérique avec unités.
// - Nombre : littéral décimal
// - Unite  : unité de base (\operatorname{m}, …), valeur 1 avec dimension
// - Neg    : moins unaire (PAS de "0 - x" : casserait la vérification des dimensions)
// - Appel  : fonction sin, cos, tan, log (base 10), ln, sqrt
//
// Exposant exact : `rationnel_exact` relit un sous-arbre purement numérique
// (entiers, + - * /, moins unaire) en rationnel, pour les racines d’unités.

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

use std::fmt;

use super::dimensions::Dimension;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Racine,
}

impl Fonction {
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Ln,
        Fonction::Racine,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Racine => "sqrt",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Unite(Dimension),

    Neg(Box<Expr>),
    Appel(Fonction, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Puissance(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Valeur rationnelle exacte si l’arbre ne contient que des entiers et + - * /.
    /// None dès qu’un décimal, une unité, une fonction ou un débordement apparaît.
    pub fn rationnel_exact(&self) -> Option<Rational64> {
        use Expr::*;

        match self {
            Nombre(v) => {
                if v.fract() != 0.0 || v.abs() > i64::MAX as f64 {
                    return None;
                }
                Some(Rational64::from_integer(*v as i64))
            }
            Neg(x) => Rational64::zero().checked_sub(&x.rationnel_exact()?),
            Add(a, b) => a.rationnel_exact()?.checked_add(&b.rationnel_exact()?),
            Sub(a, b) => a.rationnel_exact()?.checked_sub(&b.rationnel_exact()?),
            Mul(a, b) => a.rationnel_exact()?.checked_mul(&b.rationnel_exact()?),
            Div(a, b) => {
                let d = b.rationnel_exact()?;
                if d.is_zero() {
                    return None;
                }
                a.rationnel_exact()?.checked_div(&d)
            }
            Unite(_) | Appel(_, _) | Puissance(_, _) => None,
        }
    }
}

impl fmt::Display for Expr {
    /// Forme parenthésée complète (démarche).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(v) => write!(f, "{v}"),
            Unite(d) => write!(f, "{}", d.symbole()),
            Neg(x) => write!(f, "-({x})"),
            Appel(func, x) => write!(f, "{}({x})", func.nom()),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Puissance(a, b) => write!(f, "({a})^({b})"),
        }
    }
}
