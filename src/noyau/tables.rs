// src/noyau/tables.rs
//
// Tables en lecture seule, construites une fois au démarrage :
// - protection (séquences structurelles + noms d’opérateurs)
// - constantes (valeurs pré-encodées)
// - unités dérivées
//
// Passées par référence au normaliseur; l’instance globale vit dans un OnceLock.

use std::sync::OnceLock;

use super::constantes::{table_constantes, Constante};
use super::dimensions::Dimension;
use super::expr::Fonction;
use super::protege::TableProtegee;
use super::unites::{operatorname, table_unites_derivees, UniteDerivee};

/// Séquences structurelles à protéger en plus des noms d’opérateurs.
const STRUCTURELLES: [&str; 5] = ["\\frac", "\\cdot", "\\times", "\\sqrt", "\\div"];

#[derive(Clone, Debug)]
pub struct Tables {
    pub protege: TableProtegee,
    pub constantes: Vec<Constante>,
    pub unites: Vec<UniteDerivee>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

impl Tables {
    /// Instance partagée du processus (immuable).
    pub fn globales() -> &'static Tables {
        TABLES.get_or_init(|| {
            let t = Tables::standard();
            log::debug!(
                "tables: {} séquences protégées, {} constantes, {} unités dérivées",
                t.protege.sequences().count(),
                t.constantes.len(),
                t.unites.len()
            );
            t
        })
    }

    /// Construit les tables livrées.
    pub fn standard() -> Tables {
        let unites = table_unites_derivees();

        let mut sequences: Vec<String> = STRUCTURELLES.iter().map(|s| s.to_string()).collect();
        // mots de contrôle des fonctions (\sin, \cos, …); \sqrt est déjà structurel
        sequences.extend(
            Fonction::TOUTES
                .iter()
                .filter(|f| **f != Fonction::Racine)
                .map(|f| format!("\\{}", f.nom())),
        );
        // groupes \operatorname{X} complets
        sequences.extend(noms_operateurs_de(&unites).iter().map(|n| operatorname(n)));

        let protege = TableProtegee::nouvelle(sequences);
        let constantes = table_constantes(&protege);

        Tables {
            protege,
            constantes,
            unites,
        }
    }

    /// Surface de configuration : noms traités comme mots atomiques par la saisie
    /// (unités de base, unités dérivées, fonctions).
    pub fn noms_operateurs(&self) -> Vec<&'static str> {
        noms_operateurs_de(&self.unites)
    }
}

fn noms_operateurs_de(unites: &[UniteDerivee]) -> Vec<&'static str> {
    let mut noms: Vec<&'static str> = Dimension::TOUTES.iter().map(|d| d.symbole()).collect();
    noms.extend(unites.iter().map(|u| u.symbole));
    noms.extend(Fonction::TOUTES.iter().map(|f| f.nom()));
    noms
}
