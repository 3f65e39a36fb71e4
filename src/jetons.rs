// src/jetons.rs
//
// Tokenisation de l'évaluateur restreint.
//
// Chaque jeton garde la position (indice en caractères) de son premier
// caractère : les erreurs de syntaxe remontent l'indice fautif.
//
// NOTE: le tokeniseur accepte les identifiants (`Ident`) pour pouvoir les
// rejeter PROPREMENT au parse, avec position — la grammaire, elle, n'a
// aucune production pour eux. `MoinsUnaire` n'est jamais produit ici :
// c'est le shunting-yard qui requalifie un `-` sans valeur à sa gauche.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::caracteres::est_mot;
use crate::erreurs::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Sorte {
    Num(BigRational),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow, // **

    MoinsUnaire, // requalifié par le parse, jamais tokenisé

    LPar,
    RPar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub sorte: Sorte,
    pub pos: usize,
}

impl Jeton {
    fn new(sorte: Sorte, pos: usize) -> Self {
        Jeton { sorte, pos }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte :
/// - nombres : `12`, `3.14`, `5.`, `.5` (littéraux exacts, jamais de flottant)
/// - opérateurs + - * / % ** (et `-` unaire, requalifié plus tard)
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (tokenisés, rejetés au parse)
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurEval> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Jeton::new(Sorte::LPar, i));
                i += 1;
                continue;
            }
            ')' => {
                out.push(Jeton::new(Sorte::RPar, i));
                i += 1;
                continue;
            }
            '+' => {
                out.push(Jeton::new(Sorte::Plus, i));
                i += 1;
                continue;
            }
            '-' => {
                out.push(Jeton::new(Sorte::Minus, i));
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Jeton::new(Sorte::Pow, i));
                    i += 2;
                } else {
                    out.push(Jeton::new(Sorte::Star, i));
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Jeton::new(Sorte::Slash, i));
                i += 1;
                continue;
            }
            '%' => {
                out.push(Jeton::new(Sorte::Percent, i));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let debut = i;
            i += 1;
            while i < chars.len() && est_mot(chars[i]) {
                i += 1;
            }
            let mot: String = chars[debut..i].iter().collect();
            out.push(Jeton::new(Sorte::Ident(mot), debut));
            continue;
        }

        // Nombre : `12`, `3.14`, `5.`, `.5` — rationnel exact
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let mut frac = String::new();
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    frac.push(chars[i]);
                    i += 1;
                }
            }

            let entiere: String = chars[debut..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            let rat = rationnel_decimal(&entiere, &frac)
                .ok_or_else(|| ErreurEval::syntaxe(debut, "nombre invalide"))?;
            out.push(Jeton::new(Sorte::Num(rat), debut));
            continue;
        }

        return Err(ErreurEval::syntaxe(i, format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// `entiere.frac` -> rationnel exact (0.1 = 1/10, sans perte).
fn rationnel_decimal(entiere: &str, frac: &str) -> Option<BigRational> {
    let ent = if entiere.is_empty() {
        BigInt::zero()
    } else {
        BigInt::parse_bytes(entiere.as_bytes(), 10)?
    };

    if frac.is_empty() {
        return Some(BigRational::from_integer(ent));
    }

    let num_frac = BigInt::parse_bytes(frac.as_bytes(), 10)?;
    let echelle = BigInt::from(10).pow(frac.len() as u32);
    Some(BigRational::from_integer(ent) + BigRational::new(num_frac, echelle))
}

/// Format utilitaire (démarche / debug) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for j in jetons {
        let s = match &j.sorte {
            Sorte::Num(r) => format_rat(r),
            Sorte::Ident(nom) => nom.clone(),

            Sorte::Plus => "+".to_string(),
            Sorte::Minus => "-".to_string(),
            Sorte::Star => "*".to_string(),
            Sorte::Slash => "/".to_string(),
            Sorte::Percent => "%".to_string(),
            Sorte::Pow => "**".to_string(),
            Sorte::MoinsUnaire => "-u".to_string(),

            Sorte::LPar => "(".to_string(),
            Sorte::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
