// src/nombre.rs
//
// Valeur numérique de l'évaluateur.
//
// - `Exact` : rationnel en précision arbitraire. Les entiers restent des
//   entiers exacts, les littéraux décimaux sont exacts (0.1 = 1/10), et
//   + - * / % sur deux exacts restent exacts (5/2 vaut exactement 5/2).
// - `Flottant` : n'apparaît que par `**` à exposant non entier, puis
//   contamine les opérations suivantes.
//
// Toutes les opérations retournent Result : division/reste par zéro,
// dépassement (flottant non fini, puissance exacte démesurée) et sortie de
// domaine réel sont des valeurs d'erreur, jamais des panics.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt;

use crate::erreurs::ErreurEval;

/// Garde-fou des puissances exactes : taille estimée (en bits) du résultat.
const MAX_BITS_PUISSANCE: u64 = 1 << 20;

#[derive(Clone, Debug, PartialEq)]
pub enum Nombre {
    Exact(BigRational),
    Flottant(f64),
}

impl Nombre {
    pub fn entier(n: i64) -> Nombre {
        Nombre::Exact(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn est_entier(&self) -> bool {
        match self {
            Nombre::Exact(r) => r.denom().is_one(),
            Nombre::Flottant(f) => f.fract() == 0.0,
        }
    }

    /// Lecture approchée (exacte si possible, ±inf au-delà de f64).
    pub fn en_f64(&self) -> f64 {
        match self {
            Nombre::Exact(r) => r.to_f64().unwrap_or(f64::NAN),
            Nombre::Flottant(f) => *f,
        }
    }

    pub fn oppose(&self) -> Nombre {
        match self {
            Nombre::Exact(r) => Nombre::Exact(-r.clone()),
            Nombre::Flottant(f) => Nombre::Flottant(-f),
        }
    }

    pub fn ajoute(&self, autre: &Nombre) -> Result<Nombre, ErreurEval> {
        match (self, autre) {
            (Nombre::Exact(a), Nombre::Exact(b)) => Ok(Nombre::Exact(a + b)),
            _ => fini(self.en_f64() + autre.en_f64()),
        }
    }

    pub fn soustrait(&self, autre: &Nombre) -> Result<Nombre, ErreurEval> {
        match (self, autre) {
            (Nombre::Exact(a), Nombre::Exact(b)) => Ok(Nombre::Exact(a - b)),
            _ => fini(self.en_f64() - autre.en_f64()),
        }
    }

    pub fn multiplie(&self, autre: &Nombre) -> Result<Nombre, ErreurEval> {
        match (self, autre) {
            (Nombre::Exact(a), Nombre::Exact(b)) => Ok(Nombre::Exact(a * b)),
            _ => fini(self.en_f64() * autre.en_f64()),
        }
    }

    /// Division réelle (jamais euclidienne) : 5/2 = 5/2.
    pub fn divise(&self, autre: &Nombre) -> Result<Nombre, ErreurEval> {
        match (self, autre) {
            (Nombre::Exact(a), Nombre::Exact(b)) => {
                if b.is_zero() {
                    return Err(ErreurEval::DivisionParZero);
                }
                Ok(Nombre::Exact(a / b))
            }
            _ => {
                let d = autre.en_f64();
                if d == 0.0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                fini(self.en_f64() / d)
            }
        }
    }

    /// Reste à troncature (sémantique de `%` sur f64) : a - b·trunc(a/b).
    pub fn reste(&self, autre: &Nombre) -> Result<Nombre, ErreurEval> {
        match (self, autre) {
            (Nombre::Exact(a), Nombre::Exact(b)) => {
                if b.is_zero() {
                    return Err(ErreurEval::DivisionParZero);
                }
                let q = (a / b).trunc();
                Ok(Nombre::Exact(a - b * q))
            }
            _ => {
                let d = autre.en_f64();
                if d == 0.0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                fini(self.en_f64() % d)
            }
        }
    }

    pub fn puissance(&self, autre: &Nombre) -> Result<Nombre, ErreurEval> {
        // exposant entier exact -> puissance exacte
        if let (Nombre::Exact(base), Nombre::Exact(exp)) = (self, autre) {
            if exp.denom().is_one() {
                let e = exp.numer().to_i64().ok_or(ErreurEval::Debordement)?;
                return puissance_exacte(base, e);
            }
        }

        // chemin flottant (exposant non entier, ou opérande déjà flottant)
        let b = self.en_f64();
        let e = autre.en_f64();
        if b == 0.0 && e < 0.0 {
            return Err(ErreurEval::DivisionParZero);
        }
        if b < 0.0 && e.fract() != 0.0 {
            return Err(ErreurEval::Domaine(
                "base négative avec exposant non entier".into(),
            ));
        }
        fini(b.powf(e))
    }
}

/* ------------------------ puissance exacte ------------------------ */

fn puissance_exacte(base: &BigRational, exp: i64) -> Result<Nombre, ErreurEval> {
    if exp == 0 {
        return Ok(Nombre::Exact(BigRational::one()));
    }
    if base.is_zero() {
        if exp < 0 {
            return Err(ErreurEval::DivisionParZero);
        }
        return Ok(Nombre::Exact(BigRational::zero()));
    }

    // taille estimée du résultat : bits(base) × |exp|
    let bits = base.numer().bits().max(base.denom().bits());
    if bits.saturating_mul(exp.unsigned_abs()) > MAX_BITS_PUISSANCE {
        return Err(ErreurEval::Debordement);
    }

    Ok(Nombre::Exact(rational_pow_int(base.clone(), exp)))
}

/// Exponentiation binaire sur rationnel (exposant entier, négatif permis).
fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base.clone(), -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/* ------------------------ flottants finis ------------------------ */

/// Un flottant n'entre dans `Nombre` que fini : inf -> dépassement,
/// NaN -> hors domaine (défense en profondeur, les cas connus sont
/// détectés avant).
fn fini(x: f64) -> Result<Nombre, ErreurEval> {
    if x.is_finite() {
        Ok(Nombre::Flottant(x))
    } else if x.is_nan() {
        Err(ErreurEval::Domaine("résultat non défini".into()))
    } else {
        Err(ErreurEval::Debordement)
    }
}

/* ------------------------ affichage ------------------------ */

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Exact(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Nombre::Flottant(x) => write!(f, "{x}"),
        }
    }
}
