// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Entrée : jetons réécrits (Num, Unite, Fonc, + - * / ^, parenthèses).
//
// Règles:
// - Précédences : + - (1) < * / (2) < moins unaire (3) < ^ (4, associatif à droite)
//     -2^2 = -(2^2),  2^-1 = 2^(-1),  -2*3 = (-2)*3
// - Moins unaire : jeton Neg dédié (pas de "0 - x" : 0 est sans dimension)
// - Plus unaire : ignoré
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::ErreurEval;
use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Dépile les opérateurs binaires qui doivent sortir avant `tok`.
/// S’arrête sur '(' et sur une fonction (elle reste collée à son argument).
fn depile_pour(tok: &Tok, ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar | Tok::Fonc(_)) {
            break;
        }

        let p_top = precedence(top);
        let p_tok = precedence(tok);

        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        if let Some(op) = ops.pop() {
            out.push(op);
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonc(Sin), LPar, Num(0), Slash, Num(2), RPar]
///   rpn:    [Num(0), Num(2), Slash, Fonc(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Unite(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonc(_) => {
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurEval::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Fonc(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // opérateur unaire : préfixe, rien à dépiler
                if tok == Tok::Minus {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                depile_pour(&tok, &mut ops, &mut out);
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Frac | Tok::Racine | Tok::LAcc | Tok::RAcc | Tok::LCro | Tok::RCro => {
                return Err(ErreurEval::syntaxe("jeton structurel non réécrit"));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let invalide = || ErreurEval::syntaxe("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),
            Tok::Unite(d) => st.push(Expr::Unite(d)),

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Fonc(f) => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe(format!("{} sans argument", f.nom())))?;
                st.push(Expr::Appel(f, Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Puissance(a, b),
                };
                st.push(e);
            }

            Tok::Frac
            | Tok::Racine
            | Tok::LPar
            | Tok::RPar
            | Tok::LAcc
            | Tok::RAcc
            | Tok::LCro
            | Tok::RCro => return Err(ErreurEval::syntaxe("parenthèse inattendue en RPN")),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(invalide()),
    }
}
