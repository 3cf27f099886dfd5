//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, dernier résultat, erreur, démarche)
//! et appliquer les résultats du noyau dans le bon ordre.
//!
//! Contrats :
//! - Aucune évaluation ici : la vue calcule via le noyau et remet le résultat par `recevoir`.
//! - Chaque soumission reçoit une génération croissante ; seul le résultat de la
//!   DERNIÈRE génération est appliqué (les anciens sont jetés, jamais annulés).
//! - Sur erreur : le dernier résultat reste affiché, la vue montre un indicateur
//!   générique ; le message brut reste disponible pour la démarche.

use crate::noyau::{Calcul, Demarche, ErreurEval};

/// Indicateur générique affiché à la place du message brut.
pub const INDICATEUR_ERREUR: &str = "Erreur";

/// Numéro de soumission (monotone).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String,          // dernier résultat réussi ("= …")
    pub erreur: Option<ErreurEval>, // dernière erreur (message brut)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- ordre des résultats ---
    generation: Generation,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            affichage: String::new(),
            erreur: None,
            demarche: Demarche::default(),
            generation: Generation::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Soumission / réception ------------------------ */

    /// Enregistre une nouvelle soumission de l’entrée courante.
    pub fn soumettre(&mut self) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.generation
    }

    /// Applique un résultat s’il correspond à la dernière soumission.
    /// Retourne false si le résultat est périmé (ignoré).
    pub fn recevoir(&mut self, generation: Generation, calcul: Calcul) -> bool {
        if generation != self.generation {
            log::debug!(
                "résultat périmé ignoré ({generation:?}, courant {:?})",
                self.generation
            );
            return false;
        }

        self.demarche = calcul.demarche;
        match calcul.resultat {
            Ok(texte) => {
                self.affichage = texte;
                self.erreur = None;
            }
            // entrée vidée : rien à signaler, on garde l’affichage
            Err(ErreurEval::EntreeVide) => self.erreur = None,
            Err(e) => self.erreur = Some(e),
        }
        true
    }

    /// Indicateur à afficher (générique), None si pas d’erreur.
    pub fn indicateur(&self) -> Option<&'static str> {
        self.erreur.as_ref().map(|_| INDICATEUR_ERREUR)
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// C / Esc / Cmd+Backspace : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// Ajoute un motif en fin d’entrée (boutons d’unités, fonctions, constantes).
    pub fn inserer(&mut self, motif: &str) {
        self.entree.push_str(motif);
        self.focus_entree = true;
    }

    /// Backspace “intelligent” : retire d’un coup le dernier \operatorname{…},
    /// la dernière commande (\frac, \pi…) ou la dernière constante, sinon un caractère.
    pub fn backspace_entree(&mut self) {
        let t = self.entree.trim_end();
        let coupe = debut_motif_final(t)
            .or_else(|| t.char_indices().last().map(|(i, _)| i))
            .unwrap_or(0);
        self.entree.truncate(coupe);
        self.focus_entree = true;
    }
}

/// Début (octet) du motif atomique en fin de texte, s’il y en a un.
fn debut_motif_final(t: &str) -> Option<usize> {
    const OPERATORNAME: &str = "\\operatorname{";

    if t.ends_with('}') {
        let i = t.rfind(OPERATORNAME)?;
        let nom = &t[i + OPERATORNAME.len()..t.len() - 1];
        return nom.chars().all(|c| c.is_ascii_alphabetic()).then_some(i);
    }

    for nom in ["k_B", "\\epsilon_0"] {
        if t.ends_with(nom) {
            return Some(t.len() - nom.len());
        }
    }

    let i = t.rfind('\\')?;
    let mot = &t[i + 1..];
    (!mot.is_empty() && mot.chars().all(|c| c.is_ascii_alphabetic())).then_some(i)
}
