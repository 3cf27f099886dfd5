//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur / longueur bornées
//! - budget temps global
//! - invariants clés :
//!     normaliser est total (jamais de panique),
//!     un succès commence toujours par "= ",
//!     même entrée => même sortie

use std::time::{Duration, Instant};

use super::dimensions::{Dimension, VecteurDimension};
use super::erreur::ErreurEval;
use super::eval::{calculer, evaluer};
use super::normalise::normaliser;
use super::tables::Tables;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

/// Morceaux de saisie, volontairement mélangés (y compris invalides).
const MORCEAUX: &[&str] = &[
    "1", "2.5", "0", ".5", "12", "+", "-", "\\cdot", "\\times", "/", "\\div", "^", "^12", "{", "}",
    "(", ")", "[", "]", "\\frac", "\\sqrt", "\\left(", "\\right)", "\\operatorname{m}",
    "\\operatorname{s}", "\\operatorname{kg}", "\\operatorname{N}", "\\operatorname{Hz}",
    "\\operatorname{cd}", "\\sin", "\\cos", "\\ln", "\\log", "c", "e", "\\pi", "k_B",
    "\\epsilon_0", "x", " ", "\\,", "\\", "#", "é", "\u{E000}",
];

fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    (0..longueur).map(|_| rng.choose(MORCEAUX)).collect()
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "\\pi".to_string(),
        1 => "e".to_string(),
        2 => "0".to_string(),
        _ => format!("{}", 1 + rng.pick(9)),
    }
}

/// Expressions bien formées et sans dimension.
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(8) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}\\cdot {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!(
            "\\frac{{{}}}{{{}}}",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        5 => format!("\\left({}\\right)^2", gen_expr(rng, depth - 1)),
        6 => format!("\\sqrt{{{}}}", gen_expr(rng, depth - 1)),
        _ => format!("\\cos\\left({}\\right)", gen_expr(rng, depth - 1)),
    }
}

fn is_erreur_attendue(e: &ErreurEval) -> bool {
    // domaine numérique volontairement limité : 1/0, racine de négatif, débordement
    matches!(e, ErreurEval::DivisionParZero | ErreurEval::ResultatNonFini)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let tables = Tables::globales();
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let longueur = 1 + rng.pick(24) as usize;
        let entree = gen_bruit(&mut rng, longueur);

        // normaliser est total
        let canonique = normaliser(&entree, tables);

        // le pipeline ne panique pas, et un succès est toujours du texte "= …"
        let calcul = calculer(&entree, tables);
        assert_eq!(calcul.demarche.canonique, canonique);
        if let Ok(texte) = &calcul.resultat {
            assert!(texte.starts_with("= "), "entree={entree:?} texte={texte:?}");
        }

        // déterminisme
        assert_eq!(calculer(&entree, tables), calcul, "entree={entree:?}");
    }
}

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let tables = Tables::globales();
    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let entree = gen_expr(&mut rng, 4);

        match calculer(&entree, tables).resultat {
            Ok(texte) => {
                assert!(texte.starts_with("= "), "entree={entree:?}");
                // sans dimension : rien après l’espace final
                assert!(texte.ends_with(' '), "entree={entree:?} texte={texte:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: entree={entree:?} err={e}"
                );
            }
        }
    }

    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
}

#[test]
fn fuzz_safe_produits_d_unites() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..200 {
        budget(t0, max);

        // produit aléatoire de puissances entières d’unités de base
        let mut texte = String::from("3");
        let mut attendu = VecteurDimension::sans_dimension();
        for _ in 0..(1 + rng.pick(5)) {
            let d = Dimension::TOUTES[rng.pick(7) as usize];
            let n = rng.pick(7) as i32 - 3;
            texte.push_str(&format!("{{\\operatorname{{{}}}}}^{{{n}}}", d.symbole()));
            attendu = attendu.produit(&VecteurDimension::depuis_paires([(d, n)]));
        }

        let g = evaluer(&texte).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        assert_eq!(g.valeur, 3.0, "texte={texte:?}");
        assert_eq!(g.dims, attendu, "texte={texte:?}");

        // puis la demi-puissance : exacte seulement si tous les exposants sont pairs
        let racine = evaluer(&format!("\\sqrt{{{texte}}}"));
        let pairs = attendu.iter().all(|(_, n)| n % 2 == 0);
        assert_eq!(racine.is_ok(), pairs, "texte={texte:?} racine={racine:?}");
    }
}
