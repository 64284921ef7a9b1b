// src/noyau/lecture.rs
//
// Lecture décimale d’un rationnel exact (tronquée, jamais arrondie).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Nombre max de chiffres après la virgule d’une lecture.
pub const DIGITS_MAX: usize = 10_000;

fn pow10(n: usize) -> BigInt {
    let n = u32::try_from(n.min(DIGITS_MAX)).unwrap_or(0);
    BigInt::from(10).pow(n)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let digits = digits.min(DIGITS_MAX);
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

/// r -> entier “scalé” = trunc(r * 10^digits)
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/// Lecture de r avec `digits` chiffres après la virgule (troncature vers zéro).
pub fn lecture_decimale(r: &BigRational, digits: usize) -> String {
    let digits = digits.min(DIGITS_MAX);
    scaled_to_decimal(rational_scaled(r, digits), digits)
}

/// Nombre de décimales si r a un développement décimal fini (dénominateur = 2^a·5^b).
fn decimales_finies(r: &BigRational) -> Option<usize> {
    let deux = BigInt::from(2);
    let cinq = BigInt::from(5);

    let mut d = r.denom().clone();
    let (mut a, mut b) = (0usize, 0usize);
    while (&d % &deux).is_zero() {
        d /= &deux;
        a += 1;
    }
    while (&d % &cinq).is_zero() {
        d /= &cinq;
        b += 1;
    }

    d.is_one().then_some(a.max(b))
}

/// Affichage exact : "12", "0.25", sinon fraction "1/3".
pub fn format_rat(r: &BigRational) -> String {
    if r.denom().is_one() {
        return format!("{}", r.numer());
    }
    match decimales_finies(r) {
        Some(digits) if digits <= DIGITS_MAX => lecture_decimale(r, digits),
        _ => format!("{}/{}", r.numer(), r.denom()),
    }
}
