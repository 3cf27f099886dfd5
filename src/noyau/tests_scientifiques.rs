//! Tests scientifiques (campagne) : scénarios bout à bout + propriétés du noyau.
//!
//! But : vérifier le contrat complet saisie -> canonique -> grandeur -> texte,
//! sans faire chauffer la machine.
//! - budget temps global sur les tests de stress
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les constantes sont substituées en un seul passage, dans l’ordre de la table.
//! - Les unités dérivées sont développées en unités de base AVANT l’évaluation :
//!   l’évaluateur ne voit jamais \operatorname{N}.

use std::time::{Duration, Instant};

use super::dimensions::{Dimension, VecteurDimension};
use super::erreur::ErreurEval;
use super::eval::{calculer, evaluer};
use super::format::notation_scientifique;
use super::grandeur::Grandeur;
use super::normalise::{accolades_exposants, normaliser, substitue_constantes};
use super::tables::Tables;

fn tables() -> &'static Tables {
    Tables::globales()
}

fn calc_ok(entree: &str) -> String {
    calculer(entree, tables())
        .resultat
        .unwrap_or_else(|e| panic!("entree={entree:?} err={e}"))
}

fn grandeur_ok(entree: &str) -> Grandeur {
    let canonique = normaliser(entree, tables());
    evaluer(&canonique).unwrap_or_else(|e| panic!("entree={entree:?} canonique={canonique:?} err={e}"))
}

fn vecteur_de(symbole: &str) -> VecteurDimension {
    tables()
        .unites
        .iter()
        .find(|u| u.symbole == symbole)
        .map(|u| u.vecteur.clone())
        .unwrap_or_else(|| panic!("unité {symbole} absente"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios bout à bout ------------------------ */

#[test]
fn sci_scenario_deux_plus_deux() {
    assert_eq!(normaliser("2+2", tables()), "2+2");

    let g = grandeur_ok("2+2");
    assert_eq!(g.valeur, 4.0);
    assert!(g.dims.est_sans_dimension());

    assert_eq!(calc_ok("2+2"), "= 4 ");
}

#[test]
fn sci_scenario_vitesse_lumiere() {
    let g = grandeur_ok("c");
    assert_eq!(g.valeur, 299792458.0);
    assert_eq!(
        g.dims,
        VecteurDimension::depuis_paires([(Dimension::Longueur, 1), (Dimension::Temps, -1)])
    );

    assert_eq!(
        calc_ok("c"),
        "= 2.9979\\times 10^{8} \\frac{\\operatorname{m}}{\\operatorname{s}}"
    );
}

#[test]
fn sci_scenario_force_sur_surface() {
    // N / m² = Pa
    let g = grandeur_ok("\\frac{\\operatorname{N}}{\\operatorname{m}^2}");
    let aire = VecteurDimension::depuis_paires([(Dimension::Longueur, 2)]);
    assert_eq!(g.dims, vecteur_de("N").quotient(&aire));
    assert_eq!(g.dims, vecteur_de("Pa"));

    // N / Pa = m² : différence des deux développements
    let g = grandeur_ok("\\operatorname{N}/\\operatorname{Pa}");
    assert_eq!(g.dims, vecteur_de("N").quotient(&vecteur_de("Pa")));
    assert_eq!(g.dims, aire);
}

#[test]
fn sci_echec_longueur_plus_temps() {
    let r = calculer("3\\operatorname{m}+2\\operatorname{s}", tables()).resultat;
    assert!(
        matches!(r, Err(ErreurEval::DimensionsIncompatibles { op: '+', .. })),
        "{r:?}"
    );
}

/* ------------------------ Constantes ------------------------ */

#[test]
fn sci_constantes_valeurs() {
    assert_eq!(calc_ok("\\pi"), "= 3.1416 ");
    assert_eq!(calc_ok("e"), "= 2.7183 ");
    assert_eq!(calc_ok("2\\pi"), "= 6.2832 ");

    assert_eq!(
        calc_ok("k_B"),
        "= 1.3806\\times 10^{-23} \\frac{{\\operatorname{m}}^{2}\\operatorname{kg}}{{\\operatorname{s}}^{2}\\operatorname{K}}"
    );
    assert_eq!(
        calc_ok("\\epsilon_0"),
        "= 8.8542\\times 10^{-12} \\frac{{\\operatorname{s}}^{4}{\\operatorname{A}}^{2}}{{\\operatorname{m}}^{3}\\operatorname{kg}}"
    );
}

#[test]
fn sci_energie_cinetique() {
    // E = ½ m v² : 2 kg à 3 m/s -> 9 J
    let g = grandeur_ok("\\frac{1}{2}\\cdot 2\\operatorname{kg}\\cdot\\left(3\\frac{\\operatorname{m}}{\\operatorname{s}}\\right)^2");
    assert_eq!(g.valeur, 9.0);
    assert_eq!(g.dims, vecteur_de("J"));

    // et 9 J s’ajoute à 1 J
    let g = grandeur_ok("9\\operatorname{J}+1\\operatorname{J}");
    assert_eq!(g.valeur, 10.0);
}

#[test]
fn sci_unite_derivee_puissance() {
    // l’exposant porte sur tout le développement : N² = kg² m² s⁻⁴
    let g = grandeur_ok("\\operatorname{N}^2");
    assert_eq!(g.dims, vecteur_de("N").puissance_entiere(2));
}

#[test]
fn sci_racine_unites() {
    // sqrt(m²/s²) = m/s
    let g = grandeur_ok("\\sqrt{\\frac{16\\operatorname{m}^2}{\\operatorname{s}^2}}");
    assert_eq!(g.valeur, 4.0);
    assert_eq!(
        g.dims,
        VecteurDimension::depuis_paires([(Dimension::Longueur, 1), (Dimension::Temps, -1)])
    );
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_protection_aller_retour() {
    let protege = &tables().protege;
    let seqs: Vec<&str> = protege.sequences().collect();

    // textes faits uniquement de séquences protégées (+ séparateurs neutres)
    for (i, s) in seqs.iter().enumerate() {
        let voisin = seqs[(i * 7 + 3) % seqs.len()];
        let t = format!("{s} 1+{voisin}{s}");
        let enc = protege.encode(&t);
        assert!(!enc.contains('\\'), "t={t:?} enc={enc:?}");
        assert_eq!(protege.decode(&enc), t);
    }
}

#[test]
fn sci_accolades_idempotentes() {
    for s in [
        "x^12",
        "2^3+4^56",
        "\\operatorname{m}^2\\operatorname{s}^{-1}",
        "10^{-23}",
        "",
    ] {
        let une = accolades_exposants(s);
        assert_eq!(accolades_exposants(&une), une, "s={s:?}");
    }
}

#[test]
fn sci_constantes_ordre_indifferent() {
    // toutes les rotations de la table, sans le couple (e, \epsilon_0)
    let base = tables().clone();
    let mut sans_e = base.clone();
    sans_e.constantes.retain(|c| c.nom != "e");

    let texte = base
        .protege
        .encode("\\pi\\cdot c+k_B\\epsilon_0-\\frac{c}{\\pi}");
    let reference = substitue_constantes(&texte, &sans_e);

    for k in 1..sans_e.constantes.len() {
        let mut t = sans_e.clone();
        t.constantes.rotate_left(k);
        assert_eq!(substitue_constantes(&texte, &t), reference, "rotation {k}");
        t.constantes.reverse();
        assert_eq!(substitue_constantes(&texte, &t), reference, "rotation {k} inversée");
    }
}

#[test]
fn sci_developpement_conserve_dimension() {
    for u in &tables().unites {
        // développement seul
        let g = evaluer(&u.expansion())
            .unwrap_or_else(|e| panic!("{}: {e}", u.symbole));
        assert_eq!(g.dims, u.vecteur, "unité {}", u.symbole);
        assert_eq!(g.valeur, 1.0, "unité {}", u.symbole);

        // via la saisie complète
        let g = grandeur_ok(&u.motif());
        assert_eq!(g.dims, u.vecteur, "unité {}", u.symbole);
    }
}

#[test]
fn sci_notation_scientifique() {
    assert_eq!(notation_scientifique(1234.5678), "1.2346\\times 10^{3}");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_racine_carre() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // alterne \sqrt{…} et {…}^{2} : reste exact (4 m² -> 2 m -> 4 m² …)
    let mut entree = "4\\operatorname{m}^2".to_string();
    for k in 0..60 {
        entree = if k % 2 == 0 {
            format!("\\sqrt{{{entree}}}")
        } else {
            format!("{{{entree}}}^2")
        };
        budget(t0, max);
    }

    assert_eq!(calc_ok(&entree), "= 4 {\\operatorname{m}}^{2}");
    budget(t0, max);
}

#[test]
fn sci_stress_taille_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut entree = String::new();
    for k in 0..80 {
        if k > 0 {
            entree.push_str(" + ");
        }
        entree.push_str("\\frac{1}{2}\\operatorname{kg}");
        budget(t0, max);
    }

    // 80 × ½ kg = 40 kg
    assert_eq!(calc_ok(&entree), "= 4\\times 10^{1} \\operatorname{kg}");
}

#[test]
fn sci_stress_grand_nombre() {
    let grand = "9".repeat(100);
    let entree = format!("{grand}+1");
    assert_eq!(calc_ok(&entree), "= 1\\times 10^{100} ");
}
