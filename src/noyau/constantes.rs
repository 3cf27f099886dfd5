// src/noyau/constantes.rs
//
// Constantes physiques : nom (forme LaTeX) -> valeur avec unités.
// Les valeurs sont encodées (table de protection) UNE fois à la construction :
// aucune substitution ultérieure ne peut les corrompre.

use super::protege::TableProtegee;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constante {
    pub nom: &'static str,
    /// Valeur déjà encodée, prête à être insérée.
    pub expansion: String,
}

/// Valeurs humaines, dans l’ordre de substitution.
/// `\epsilon_0` passe avant `e` (sinon le `e` de epsilon serait remplacé).
fn definitions() -> Vec<(&'static str, String)> {
    vec![
        ("\\pi", format!("{}", std::f64::consts::PI)),
        (
            "k_B",
            "1.380649 \\cdot 10^{-23} \\operatorname{J} \\operatorname{K}^{-1}".to_string(),
        ),
        (
            "\\epsilon_0",
            "8.85418782 \\cdot 10^{-12} {\\operatorname{m}^{-3}} {\\operatorname{kg}^{-1}} \
             {\\operatorname{s}^{4}} {\\operatorname{A}^{2}}"
                .to_string(),
        ),
        ("c", "299792458 \\operatorname{m} \\operatorname{s}^{-1}".to_string()),
        ("e", format!("{}", std::f64::consts::E)),
    ]
}

/// Construit la table des constantes (une fois, au démarrage).
pub fn table_constantes(protege: &TableProtegee) -> Vec<Constante> {
    definitions()
        .into_iter()
        .map(|(nom, valeur)| Constante {
            nom,
            expansion: protege.encode(&valeur),
        })
        .collect()
}
