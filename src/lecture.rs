// src/lecture.rs
//
// Lecture décimale tronquée d'un résultat.
//
// L'interface externe décide QUAND afficher en décimal ; ici on fournit le
// texte : troncature (pas d'arrondi) à `digits` décimales, et les valeurs
// entières s'affichent sans partie fractionnaire (12, pas 12.000).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use crate::nombre::Nombre;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier « scalé » (×10^digits) en texte décimal tronqué.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier « scalé » = r·10^digits tronqué vers zéro.
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/// Texte décimal d'une valeur, tronqué à `digits` décimales.
/// Les valeurs entières rendent leur forme entière exacte.
pub fn lecture_decimale(n: &Nombre, digits: usize) -> String {
    match n {
        Nombre::Exact(r) => {
            if n.est_entier() {
                return r.numer().to_string();
            }
            scaled_to_decimal(rational_scaled(r, digits), digits)
        }
        Nombre::Flottant(f) => {
            if n.est_entier() {
                return format!("{f:.0}");
            }
            match BigRational::from_float(*f) {
                Some(r) => scaled_to_decimal(rational_scaled(&r, digits), digits),
                None => format!("{f}"),
            }
        }
    }
}
