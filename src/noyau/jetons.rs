// src/noyau/jetons.rs
//
// Jetons du texte canonique (LaTeX normalisé) + deux passes avant le RPN :
// - reecrire            : \frac, \sqrt, groupes {…} / […] -> parenthèses ordinaires
// - produits_implicites : 2\operatorname{m} -> 2 * m
//
// Après ces deux passes il ne reste que : Num, Unite, Fonc, + - * / ^, ( ).

use super::dimensions::Dimension;
use super::erreur::ErreurEval;
use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Unite(Dimension),
    Fonc(Fonction),

    // structurels (disparaissent à la réécriture)
    Frac,
    Racine,

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Neg,   // moins unaire (posé par le RPN)

    LPar,
    RPar,
    LAcc,
    RAcc,
    LCro,
    RCro,
}

/// Tokenize le texte canonique.
/// Supporte:
/// - nombres décimaux (12, 3.5, .5)
/// - + - − * / ^, \cdot, \times, \div
/// - ( ) [ ] { }
/// - \frac, \sqrt (indice optionnel [n])
/// - \operatorname{u} : unité de base ou fonction
/// - \sin \cos \tan \log \ln
/// - espacements LaTeX (\ , \, \; \: \!) ignorés, \left / \right tolérés
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '{' => Some(Tok::LAcc),
            '}' => Some(Tok::RAcc),
            '[' => Some(Tok::LCro),
            ']' => Some(Tok::RCro),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit()
            || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let txt: String = chars[start..i].iter().collect();
            let v: f64 = txt
                .parse()
                .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // Séquence de contrôle
        if c == '\\' {
            i += 1;
            let Some(&suivant) = chars.get(i) else {
                return Err(ErreurEval::syntaxe("\\ en fin d’entrée"));
            };

            if !suivant.is_ascii_alphabetic() {
                // espacements : \ , \, \; \: \!
                if matches!(suivant, ' ' | ',' | ';' | ':' | '!') {
                    i += 1;
                    continue;
                }
                return Err(ErreurEval::JetonInconnu(format!("\\{suivant}")));
            }

            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();

            match mot.as_str() {
                "frac" => out.push(Tok::Frac),
                "sqrt" => out.push(Tok::Racine),
                "cdot" | "times" => out.push(Tok::Star),
                "div" => out.push(Tok::Slash),
                "left" | "right" => {}
                "operatorname" => {
                    let nom = lire_argument_nom(&chars, &mut i)?;
                    out.push(jeton_operateur(&nom)?);
                }
                _ => match Fonction::depuis_nom(&mot) {
                    Some(f) if f != Fonction::Racine => out.push(Tok::Fonc(f)),
                    _ => return Err(ErreurEval::JetonInconnu(format!("\\{mot}"))),
                },
            }
            continue;
        }

        // Lettres nues : pas de variables symboliques
        if c.is_alphabetic() {
            return Err(ErreurEval::JetonInconnu(c.to_string()));
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Lit `{nom}` après \operatorname (espaces tolérés avant l’accolade).
fn lire_argument_nom(chars: &[char], i: &mut usize) -> Result<String, ErreurEval> {
    while *i < chars.len() && chars[*i].is_whitespace() {
        *i += 1;
    }
    if chars.get(*i) != Some(&'{') {
        return Err(ErreurEval::syntaxe("\\operatorname sans argument"));
    }
    *i += 1;
    let start = *i;
    while *i < chars.len() && chars[*i] != '}' {
        *i += 1;
    }
    if *i >= chars.len() {
        return Err(ErreurEval::syntaxe("accolade non fermée après \\operatorname"));
    }
    let nom: String = chars[start..*i].iter().collect();
    *i += 1;
    Ok(nom.trim().to_string())
}

/// \operatorname{nom} : unité de base, sinon fonction, sinon inconnu.
fn jeton_operateur(nom: &str) -> Result<Tok, ErreurEval> {
    if let Some(d) = Dimension::depuis_symbole(nom) {
        return Ok(Tok::Unite(d));
    }
    if let Some(f) = Fonction::depuis_nom(nom) {
        return Ok(Tok::Fonc(f));
    }
    Err(ErreurEval::JetonInconnu(format!("\\operatorname{{{nom}}}")))
}

/* ------------------------ Réécriture structurelle ------------------------ */

/// \frac{a}{b}    -> ((a)/(b))
/// \sqrt{x}       -> sqrt(x)
/// \sqrt[n]{x}    -> ((x)^(1/(n)))
/// f x            -> f(x)   (fonction sans parenthèses : un seul élément)
/// {…} […] (…)    -> (…)
pub fn reecrire(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut i = 0;
    let mut out = Vec::with_capacity(tokens.len() + 8);
    suite(tokens, &mut i, None, &mut out)?;
    Ok(out)
}

fn fermant_de(ouvrant: &Tok) -> Tok {
    match ouvrant {
        Tok::LAcc => Tok::RAcc,
        Tok::LCro => Tok::RCro,
        _ => Tok::RPar,
    }
}

fn est_ouvrant(t: &Tok) -> bool {
    matches!(t, Tok::LPar | Tok::LAcc | Tok::LCro)
}

fn est_fermant(t: &Tok) -> bool {
    matches!(t, Tok::RPar | Tok::RAcc | Tok::RCro)
}

/// Lit des éléments jusqu’au fermant attendu (consommé), ou jusqu’à la fin si None.
fn suite(
    t: &[Tok],
    i: &mut usize,
    fermant: Option<&Tok>,
    out: &mut Vec<Tok>,
) -> Result<(), ErreurEval> {
    while *i < t.len() {
        let tok = &t[*i];
        if est_fermant(tok) {
            if Some(tok) == fermant {
                *i += 1;
                return Ok(());
            }
            return Err(ErreurEval::syntaxe(format!(
                "délimiteur fermant inattendu: {}",
                texte_jeton(tok)
            )));
        }
        element(t, i, out)?;
    }

    match fermant {
        None => Ok(()),
        Some(f) => Err(ErreurEval::syntaxe(format!(
            "délimiteur non fermé (attendu {})",
            texte_jeton(f)
        ))),
    }
}

/// Un élément à partir de t[*i] : groupe, construction, ou jeton simple.
fn element(t: &[Tok], i: &mut usize, out: &mut Vec<Tok>) -> Result<(), ErreurEval> {
    let tok = t[*i].clone();
    *i += 1;

    match tok {
        Tok::LPar | Tok::LAcc | Tok::LCro => {
            let f = fermant_de(&tok);
            out.push(Tok::LPar);
            suite(t, i, Some(&f), out)?;
            out.push(Tok::RPar);
        }

        Tok::Frac => {
            let num = argument(t, i)?;
            let den = argument(t, i)?;
            out.extend([Tok::LPar, Tok::LPar]);
            out.extend(num);
            out.extend([Tok::RPar, Tok::Slash, Tok::LPar]);
            out.extend(den);
            out.extend([Tok::RPar, Tok::RPar]);
        }

        Tok::Racine => {
            let indice = if t.get(*i) == Some(&Tok::LCro) {
                *i += 1;
                let mut n = Vec::new();
                suite(t, i, Some(&Tok::RCro), &mut n)?;
                if n.is_empty() {
                    return Err(ErreurEval::syntaxe("indice de racine vide"));
                }
                Some(n)
            } else {
                None
            };
            let arg = argument(t, i)?;

            match indice {
                None => {
                    out.extend([Tok::Fonc(Fonction::Racine), Tok::LPar]);
                    out.extend(arg);
                    out.push(Tok::RPar);
                }
                Some(n) => {
                    out.extend([Tok::LPar, Tok::LPar]);
                    out.extend(arg);
                    out.extend([Tok::RPar, Tok::Caret, Tok::LPar, Tok::Num(1.0), Tok::Slash]);
                    out.push(Tok::LPar);
                    out.extend(n);
                    out.extend([Tok::RPar, Tok::RPar, Tok::RPar]);
                }
            }
        }

        Tok::Fonc(f) => {
            let arg = argument(t, i)?;
            out.extend([Tok::Fonc(f), Tok::LPar]);
            out.extend(arg);
            out.push(Tok::RPar);
        }

        autre => out.push(autre),
    }

    Ok(())
}

/// Argument d’une construction : groupe délimité (contenu seul), ou un élément.
fn argument(t: &[Tok], i: &mut usize) -> Result<Vec<Tok>, ErreurEval> {
    let Some(tok) = t.get(*i) else {
        return Err(ErreurEval::syntaxe("argument manquant"));
    };

    let mut v = Vec::new();
    if est_ouvrant(tok) {
        let f = fermant_de(tok);
        *i += 1;
        suite(t, i, Some(&f), &mut v)?;
    } else if matches!(
        tok,
        Tok::Num(_) | Tok::Unite(_) | Tok::Frac | Tok::Racine | Tok::Fonc(_)
    ) {
        element(t, i, &mut v)?;
    } else {
        return Err(ErreurEval::syntaxe(format!(
            "argument manquant avant {}",
            texte_jeton(tok)
        )));
    }

    if v.is_empty() {
        return Err(ErreurEval::syntaxe("argument vide"));
    }
    Ok(v)
}

/* ------------------------ Multiplication implicite ------------------------ */

fn termine_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Unite(_) | Tok::RPar)
}

fn commence_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Unite(_) | Tok::Fonc(_) | Tok::LPar)
}

/// Insère `*` entre deux valeurs juxtaposées : 2 m, (a)(b), m sin(x).
/// Deux nombres collés (1.2.3, 12\,345, "2 3") sont une faute de saisie.
pub fn produits_implicites(tokens: Vec<Tok>) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for tok in tokens {
        if let (Some(Tok::Num(a)), Tok::Num(b)) = (out.last(), &tok) {
            return Err(ErreurEval::syntaxe(format!("nombres juxtaposés: {a} {b}")));
        }
        let insere = out.last().is_some_and(termine_valeur) && commence_valeur(&tok);
        if insere {
            out.push(Tok::Star);
        }
        out.push(tok);
    }
    Ok(out)
}

/* ------------------------ Affichage (démarche) ------------------------ */

fn texte_jeton(t: &Tok) -> String {
    match t {
        Tok::Num(v) => format!("{v}"),
        Tok::Unite(d) => d.symbole().to_string(),
        Tok::Fonc(f) => f.nom().to_string(),

        Tok::Frac => "\\frac".to_string(),
        Tok::Racine => "\\sqrt".to_string(),

        Tok::Plus => "+".to_string(),
        Tok::Minus => "-".to_string(),
        Tok::Star => "*".to_string(),
        Tok::Slash => "/".to_string(),
        Tok::Caret => "^".to_string(),
        Tok::Neg => "neg".to_string(),

        Tok::LPar => "(".to_string(),
        Tok::RPar => ")".to_string(),
        Tok::LAcc => "{".to_string(),
        Tok::RAcc => "}".to_string(),
        Tok::LCro => "[".to_string(),
        Tok::RCro => "]".to_string(),
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens.iter().map(texte_jeton).collect::<Vec<_>>().join(" ")
}
