// src/noyau/format.rs
//
// Affichage d’une grandeur : "= " + notation scientifique + " " + unités (LaTeX).
// Total : une grandeur finie s’affiche toujours.

use std::cmp::Ordering;

use super::dimensions::{Dimension, VecteurDimension};
use super::grandeur::Grandeur;
use super::unites::operatorname;

/// Décimales du coefficient.
pub const DECIMALES: i32 = 4;

/* ------------------------ Notation scientifique ------------------------ */

/// v -> (coefficient, exposant) avec 1 <= |coefficient| < 10.
fn decompose(v: f64) -> (f64, i32) {
    let txt = format!("{v:e}");
    let (mantisse, exposant) = txt.split_once('e').unwrap_or((txt.as_str(), "0"));
    (mantisse.parse().unwrap_or(v), exposant.parse().unwrap_or(0))
}

/// Arrondi au pair (banquier) à DECIMALES décimales.
fn arrondi(c: f64) -> f64 {
    let echelle = 10f64.powi(DECIMALES);
    (c * echelle).round_ties_even() / echelle
}

/// 1234.5678 -> 1.2346\times 10^{3} ; 4 -> 4 ; 0 -> 0
pub fn notation_scientifique(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let (c, mut exp) = decompose(v);
    let mut c = arrondi(c);

    // 9.99996 -> 10.0000 : on renormalise
    if c.abs() >= 10.0 {
        c = arrondi(c / 10.0);
        exp += 1;
    }

    if exp == 0 {
        format!("{c}")
    } else {
        format!("{c}\\times 10^{{{exp}}}")
    }
}

/* ------------------------ Unités ------------------------ */

/// Un facteur (puissance > 0) : \operatorname{m} ou {\operatorname{m}}^{2}
fn facteur(d: Dimension, n: i32) -> String {
    if n == 1 {
        operatorname(d.symbole())
    } else {
        format!("{{{}}}^{{{n}}}", operatorname(d.symbole()))
    }
}

/// Numérateur (exposants > 0) / dénominateur (exposants < 0), ordre des dimensions.
pub fn groupe_unites(dims: &VecteurDimension) -> String {
    let mut num = String::new();
    let mut den = String::new();

    for (d, n) in dims.iter() {
        match n.cmp(&0) {
            Ordering::Greater => num.push_str(&facteur(d, n)),
            Ordering::Less => den.push_str(&facteur(d, -n)),
            Ordering::Equal => {}
        }
    }

    match (num.is_empty(), den.is_empty()) {
        (true, true) => String::new(),
        (false, true) => num,
        (true, false) => format!("\\frac{{1}}{{{den}}}"),
        (false, false) => format!("\\frac{{{num}}}{{{den}}}"),
    }
}

/// Texte final. L’espace séparateur est toujours présent : "= 4 ".
pub fn formater(g: &Grandeur) -> String {
    format!(
        "= {} {}",
        notation_scientifique(g.valeur),
        groupe_unites(&g.dims)
    )
}
