// src/noyau/protege.rs
//
// Table de protection : séquences de contrôle <-> marqueurs opaques.
//
// But : pendant la substitution des constantes (remplacement littéral), aucune
// séquence structurelle ne doit être touchée (ex: le `c` de \cdot ou de \operatorname{cd}).
//
// Invariants de construction (vérifiés par `nouvelle`) :
// - aucune séquence n’est sous-chaîne d’une autre séquence => ordre indifférent
// - les marqueurs utilisent des points de code privés (U+E000, U+E001),
//   inatteignables depuis la saisie normale

const OUVRANT: char = '\u{E000}';
const FERMANT: char = '\u{E001}';

#[derive(Clone, Debug)]
pub struct TableProtegee {
    paires: Vec<(String, String)>,
}

impl TableProtegee {
    /// Construit la table. Les doublons sont ignorés; une séquence contenue dans une
    /// autre est écartée (log) pour garder `encode` indépendant de l’ordre.
    pub fn nouvelle(sequences: impl IntoIterator<Item = String>) -> Self {
        let mut retenues: Vec<String> = Vec::new();
        for s in sequences {
            if s.is_empty() || retenues.contains(&s) {
                continue;
            }
            retenues.push(s);
        }

        let candidates = retenues.clone();
        retenues.retain(|s| {
            let chevauche = candidates.iter().any(|autre| autre != s && autre.contains(s.as_str()));
            if chevauche {
                log::warn!("séquence protégée ignorée (contenue dans une autre): {s}");
            }
            !chevauche
        });

        let paires = retenues
            .into_iter()
            .enumerate()
            .map(|(i, s)| (s, marqueur(i)))
            .collect();
        Self { paires }
    }

    /// Remplace chaque séquence protégée par son marqueur.
    pub fn encode(&self, texte: &str) -> String {
        let mut out = texte.to_string();
        for (sequence, marqueur) in &self.paires {
            if out.contains(sequence.as_str()) {
                out = out.replace(sequence.as_str(), marqueur);
            }
        }
        out
    }

    /// Inverse exact de `encode`.
    pub fn decode(&self, texte: &str) -> String {
        let mut out = texte.to_string();
        for (sequence, marqueur) in &self.paires {
            if out.contains(marqueur.as_str()) {
                out = out.replace(marqueur.as_str(), sequence);
            }
        }
        out
    }

    pub fn sequences(&self) -> impl Iterator<Item = &str> {
        self.paires.iter().map(|(s, _)| s.as_str())
    }

    #[cfg(test)]
    pub fn marqueurs(&self) -> impl Iterator<Item = &str> {
        self.paires.iter().map(|(_, m)| m.as_str())
    }
}

/// Marqueur n°i : U+E000, (i+1) tildes, U+E001. Injectif, aucun n’en contient un autre.
fn marqueur(i: usize) -> String {
    let mut m = String::with_capacity(i + 7);
    m.push(OUVRANT);
    m.push_str(&"~".repeat(i + 1));
    m.push(FERMANT);
    m
}
