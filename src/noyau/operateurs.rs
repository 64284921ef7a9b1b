//! Application d’un opérateur à deux valeurs.
//!
//! Un seul point d’entrée, `apply_operator`, pour tous les domaines :
//! - numérique : `f64` ou `BigRational` (opérateurs `+ - * / ^ %`)
//! - temporel  : `NaiveDateTime` / `DateTime<Tz>` (voir `temps.rs`)
//!
//! Les erreurs sortent telles quelles (`OperatorError`) : pas de normalisation ici,
//! c’est `compute` qui re-enveloppe.

use num_rational::BigRational;
use num_traits::{Num, One, Signed, ToPrimitive, Zero};
use tracing::debug;

use super::erreurs::OperatorError;
use super::jetons::Operateur;
use super::limites::Limites;

/// Valeur à laquelle on sait appliquer un opérateur donné par son symbole.
///
/// `Quantite` est le type du second argument : le même type pour les nombres,
/// une magnitude `f64` pour les dates.
pub trait Operande: Sized {
    type Quantite;

    fn appliquer(op: &str, valeur: Self, quantite: Self::Quantite) -> Result<Self, OperatorError>;
}

/// `apply_operator("+", 1.0, 2.0) == Ok(3.0)`
/// `apply_operator("d", date, 1.0)` : date + 1 jour
pub fn apply_operator<T: Operande>(
    op: &str,
    valeur: T,
    quantite: T::Quantite,
) -> Result<T, OperatorError> {
    T::appliquer(op, valeur, quantite)
}

/// Domaine numérique : les quatre opérations + reste viennent de `Num`,
/// seule la puissance dépend du type.
pub trait Nombre: Num + Clone {
    fn puissance(self, exposant: Self, limites: &Limites) -> Result<Self, OperatorError>;

    /// Taille de la représentation exacte (0 pour un type de taille fixe).
    fn taille_bits(&self) -> u64;
}

/// Garde-fou des opérations usuelles : opérandes cumulés sous 2 × `bits_exacts_max`.
/// Sans lui, une chaîne de produits de grandes puissances exactes gèle le calcul.
fn verifier_taille<N: Nombre>(
    op: Operateur,
    a: &N,
    b: &N,
    limites: &Limites,
) -> Result<(), OperatorError> {
    let bits = a.taille_bits().saturating_add(b.taille_bits());
    if bits > limites.bits_exacts_max.saturating_mul(2) {
        debug!(op = op.symbole(), bits, "opérandes exacts trop grands");
        return Err(OperatorError::NonFiniteResult);
    }
    Ok(())
}

/// Application typée (l’évaluateur passe par ici avec ses propres limites).
pub fn appliquer<N: Nombre>(
    op: Operateur,
    a: N,
    b: N,
    limites: &Limites,
) -> Result<N, OperatorError> {
    if op != Operateur::Caret {
        verifier_taille(op, &a, &b, limites)?;
    }

    match op {
        Operateur::Plus => Ok(a + b),
        Operateur::Minus => Ok(a - b),
        Operateur::Star => Ok(a * b),
        Operateur::Slash => {
            if b.is_zero() {
                return Err(OperatorError::DivisionByZero);
            }
            Ok(a / b)
        }
        Operateur::Percent => {
            if b.is_zero() {
                return Err(OperatorError::DivisionByZero);
            }
            Ok(a % b)
        }
        Operateur::Caret => a.puissance(b, limites),
    }
}

fn operateur_numerique(op: &str) -> Result<Operateur, OperatorError> {
    Operateur::from_symbole(op).ok_or_else(|| OperatorError::UnsupportedOperator(op.to_string()))
}

/* ------------------------ f64 ------------------------ */

impl Nombre for f64 {
    // IEEE : NaN / inf sont rendus tels quels
    fn puissance(self, exposant: Self, _limites: &Limites) -> Result<Self, OperatorError> {
        Ok(self.powf(exposant))
    }

    fn taille_bits(&self) -> u64 {
        0
    }
}

impl Operande for f64 {
    type Quantite = f64;

    fn appliquer(op: &str, a: f64, b: f64) -> Result<f64, OperatorError> {
        appliquer(operateur_numerique(op)?, a, b, &Limites::default())
    }
}

/* ------------------------ BigRational ------------------------ */

impl Nombre for BigRational {
    /// Exact si l’exposant est entier et que le résultat reste sous `bits_exacts_max`,
    /// sinon via `f64::powf` (résultat reconverti, doit rester fini).
    fn puissance(self, exposant: Self, limites: &Limites) -> Result<Self, OperatorError> {
        if exposant.is_integer() {
            if let Some(n) = exposant.to_integer().to_i64() {
                if self.is_zero() && n < 0 {
                    return Err(OperatorError::DivisionByZero);
                }
                let bits = self.numer().bits() + self.denom().bits();
                if bits.saturating_mul(n.unsigned_abs()) <= limites.bits_exacts_max {
                    return Ok(rational_pow_int(self, n));
                }
            }
        }

        if self.is_zero() && exposant.is_negative() {
            return Err(OperatorError::DivisionByZero);
        }

        let a = self.to_f64().ok_or(OperatorError::NonFiniteResult)?;
        let b = exposant.to_f64().ok_or(OperatorError::NonFiniteResult)?;
        BigRational::from_float(a.powf(b)).ok_or(OperatorError::NonFiniteResult)
    }

    fn taille_bits(&self) -> u64 {
        self.numer().bits() + self.denom().bits()
    }
}

impl Operande for BigRational {
    type Quantite = BigRational;

    fn appliquer(op: &str, a: Self, b: Self) -> Result<Self, OperatorError> {
        appliquer(operateur_numerique(op)?, a, b, &Limites::default())
    }
}

/// Puissance entière exacte (exponentiation rapide).
/// Appelant : base non nulle si exp < 0.
fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    let mut e = exp.unsigned_abs();
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

    if exp < 0 {
        acc.recip()
    } else {
        acc
    }
}
