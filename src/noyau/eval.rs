//! Noyau — évaluation (pipeline réel)
//!
//! saisie -> normaliser -> jetons -> réécriture -> produits implicites -> RPN -> Expr
//!        -> Grandeur -> formater
//!
//! `evaluer` part du texte canonique (déjà normalisé) ; `calculer` enchaîne les trois
//! étapes publiques et garde la démarche, même en cas d’erreur.

use super::erreur::ErreurEval;
use super::expr::Expr;
use super::format::formater;
use super::grandeur::Grandeur;
use super::jetons::{format_tokens, produits_implicites, reecrire, tokenize};
use super::normalise::normaliser;
use super::rpn::{from_rpn, to_rpn};
use super::tables::Tables;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub canonique: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Résultat d’un calcul complet : texte formaté (ou erreur) + démarche.
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub resultat: Result<String, ErreurEval>,
    pub demarche: Demarche,
}

/// API publique : normaliser -> evaluer -> formater.
pub fn calculer(entree: &str, tables: &Tables) -> Calcul {
    let canonique = normaliser(entree, tables);
    let mut demarche = Demarche::default();

    let resultat = evaluer_avec_demarche(&canonique, &mut demarche).map(|g| formater(&g));
    if let Err(e) = &resultat {
        log::debug!("calcul refusé: {entree:?}: {e}");
    }

    Calcul {
        resultat,
        demarche,
    }
}

/// Évalue un texte canonique en grandeur (sans démarche).
#[cfg(test)]
pub fn evaluer(canonique: &str) -> Result<Grandeur, ErreurEval> {
    let mut d = Demarche::default();
    evaluer_avec_demarche(canonique, &mut d)
}

/// Comme `evaluer`, en remplissant la démarche au fil des étapes
/// (une étape qui échoue laisse les suivantes vides).
pub fn evaluer_avec_demarche(canonique: &str, d: &mut Demarche) -> Result<Grandeur, ErreurEval> {
    d.canonique = canonique.to_string();

    let s = canonique.trim();
    if s.is_empty() {
        return Err(ErreurEval::EntreeVide);
    }

    // 1) Jetons (réécrits, produits implicites insérés)
    let jetons = produits_implicites(reecrire(&tokenize(s)?)?)?;
    d.jetons = format_tokens(&jetons);

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    d.rpn = format_tokens(&rpn);

    // 3) AST
    let expr = from_rpn(&rpn)?;
    d.arbre = expr.to_string();

    // 4) Grandeur
    evaluer_expr(&expr)
}

/// Évaluation récursive de l’AST. Chaque nœud doit rester fini :
/// un infini intermédiaire ne se fait pas absorber (1/10^400 n’est pas 0).
pub fn evaluer_expr(e: &Expr) -> Result<Grandeur, ErreurEval> {
    use Expr::*;

    let g = match e {
        Nombre(v) => Grandeur::nombre(*v),
        Unite(d) => Grandeur::unite(*d),

        Neg(x) => evaluer_expr(x)?.oppose(),
        Appel(f, x) => evaluer_expr(x)?.applique(*f)?,

        Add(a, b) => evaluer_expr(a)?.plus(evaluer_expr(b)?)?,
        Sub(a, b) => evaluer_expr(a)?.moins(evaluer_expr(b)?)?,
        Mul(a, b) => evaluer_expr(a)?.fois(evaluer_expr(b)?),
        Div(a, b) => evaluer_expr(a)?.divise(evaluer_expr(b)?)?,

        // exposant exact relu dans l’arbre : (m^2)^(1/2) reste exact
        Puissance(a, b) => evaluer_expr(a)?.puissance(evaluer_expr(b)?, b.rationnel_exact())?,
    };

    if !g.valeur.is_finite() {
        return Err(ErreurEval::ResultatNonFini);
    }
    Ok(g)
}
