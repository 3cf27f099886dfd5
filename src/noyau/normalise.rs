// src/noyau/normalise.rs
//
// Normalisation du texte saisi (LaTeX) avant évaluation.
// Ordre fixe :
//   1) accolades d’exposants    x^12 -> x^{12}
//   2) retrait \left / \right   (taille des délimiteurs seulement)
//   3) protection               (encode)
//   4) constantes               nom -> {valeur}, un seul passage, non récursif
//   5) fin de protection        (decode)
//   6) unités dérivées          \operatorname{N} -> produit d’unités de base
//
// Total : aucune erreur possible ici, seulement du remplacement littéral.

use std::sync::OnceLock;

use regex::Regex;

use super::tables::Tables;

/// Délimiteurs purement typographiques.
const DELIMITEURS_TAILLE: [&str; 2] = ["\\left", "\\right"];

fn regex_exposant() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\^(\d+)").expect("motif exposant"))
}

/// Pipeline complet (étapes 1 à 6).
pub fn normaliser(latex: &str, tables: &Tables) -> String {
    let texte = accolades_exposants(latex);
    let texte = retire_delimiteurs_taille(&texte);
    let texte = tables.protege.encode(&texte);
    let texte = substitue_constantes(&texte, tables);
    let texte = tables.protege.decode(&texte);
    let texte = developpe_unites(&texte, tables);

    log::debug!("normalisation: {latex:?} -> {texte:?}");
    texte
}

/// Étape 1 : un exposant en chiffres nus devient un groupe explicite. Idempotent.
pub fn accolades_exposants(latex: &str) -> String {
    regex_exposant().replace_all(latex, "^{${1}}").into_owned()
}

/// Étape 2.
pub fn retire_delimiteurs_taille(latex: &str) -> String {
    let mut out = latex.to_string();
    for d in DELIMITEURS_TAILLE {
        out = out.replace(d, "");
    }
    out
}

/// Étape 4 : chaque constante, dans l’ordre de la table, une seule fois.
/// Le texte doit déjà être encodé (séquences protégées masquées).
pub fn substitue_constantes(encode: &str, tables: &Tables) -> String {
    let mut out = encode.to_string();
    for c in &tables.constantes {
        if out.contains(c.nom) {
            out = out.replace(c.nom, &format!("{{{}}}", c.expansion));
        }
    }
    out
}

/// Étape 6 : \operatorname{X} (X unité dérivée) -> facteurs de base.
pub fn developpe_unites(latex: &str, tables: &Tables) -> String {
    let mut out = latex.to_string();
    for u in &tables.unites {
        let motif = u.motif();
        if out.contains(&motif) {
            out = out.replace(&motif, &u.expansion());
        }
    }
    out
}
