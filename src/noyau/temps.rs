// src/noyau/temps.rs
//
// Opérateurs temporels : décaler une date d’une quantité le long d’une unité.
// -----------------------------------------------------------------------
// Alphabet : y M d H m s + -
//   y = années (12 mois), M = mois, d = jours, H = heures, m = minutes, s = secondes
//   + / - = jours entiers (ajout / retrait)
//
// Règles (politique fixe, testée plus bas) :
// - y / M / d / + / - : quantité tronquée vers zéro (1.9 d => 1 jour, -1.9 d => -1 jour)
// - H / m / s         : fraction conservée, arrondie à la milliseconde
// - mois/années : jour borné à la fin du mois cible (31 janv + 1 M => 29 févr 2020)
// - quantité NaN / infinie => NonFiniteResult ; hors plage chrono => DateOutOfRange

use chrono::{DateTime, Months, NaiveDateTime, TimeDelta, TimeZone};
use tracing::debug;

use super::erreurs::OperatorError;
use super::operateurs::Operande;

/// Granularités d’un incrément temporel (une par symbole).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpTemps {
    Annee,
    Mois,
    Jour,
    Heure,
    Minute,
    Seconde,
    Plus,
    Moins,
}

impl OpTemps {
    pub const TOUS: [OpTemps; 8] = [
        OpTemps::Annee,
        OpTemps::Mois,
        OpTemps::Jour,
        OpTemps::Heure,
        OpTemps::Minute,
        OpTemps::Seconde,
        OpTemps::Plus,
        OpTemps::Moins,
    ];

    /// Sensible à la casse : "M" = mois, "m" = minutes.
    pub fn from_symbole(s: &str) -> Option<Self> {
        match s {
            "y" => Some(Self::Annee),
            "M" => Some(Self::Mois),
            "d" => Some(Self::Jour),
            "H" => Some(Self::Heure),
            "m" => Some(Self::Minute),
            "s" => Some(Self::Seconde),
            "+" => Some(Self::Plus),
            "-" => Some(Self::Moins),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Self::Annee => "y",
            Self::Mois => "M",
            Self::Jour => "d",
            Self::Heure => "H",
            Self::Minute => "m",
            Self::Seconde => "s",
            Self::Plus => "+",
            Self::Moins => "-",
        }
    }
}

pub fn is_temporal_operator(token: &str) -> bool {
    OpTemps::from_symbole(token).is_some()
}

/// Ce qu’il faut savoir faire d’une date pour la décaler.
trait Horodatage: Sized {
    fn plus_mois(self, mois: i64) -> Option<Self>;
    fn plus_duree(self, duree: TimeDelta) -> Option<Self>;
}

fn mois_chrono(mois: i64) -> Option<Months> {
    u32::try_from(mois.unsigned_abs()).ok().map(Months::new)
}

impl Horodatage for NaiveDateTime {
    fn plus_mois(self, mois: i64) -> Option<Self> {
        let m = mois_chrono(mois)?;
        if mois >= 0 {
            self.checked_add_months(m)
        } else {
            self.checked_sub_months(m)
        }
    }

    fn plus_duree(self, duree: TimeDelta) -> Option<Self> {
        self.checked_add_signed(duree)
    }
}

impl<Tz: TimeZone> Horodatage for DateTime<Tz> {
    fn plus_mois(self, mois: i64) -> Option<Self> {
        let m = mois_chrono(mois)?;
        if mois >= 0 {
            self.checked_add_months(m)
        } else {
            self.checked_sub_months(m)
        }
    }

    fn plus_duree(self, duree: TimeDelta) -> Option<Self> {
        self.checked_add_signed(duree)
    }
}

/// Partie entière (troncature vers zéro) ; le cast sature, chrono refusera au-delà.
fn entier(quantite: f64) -> i64 {
    quantite.trunc() as i64
}

/// `quantite` unités de `ms_par_unite` millisecondes, arrondi à la ms.
fn duree_ms(quantite: f64, ms_par_unite: f64) -> Option<TimeDelta> {
    let ms = (quantite * ms_par_unite).round();
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(ms as i64)
}

fn decaler_horodatage<T: Horodatage>(
    op: OpTemps,
    date: T,
    quantite: f64,
) -> Result<T, OperatorError> {
    if !quantite.is_finite() {
        return Err(OperatorError::NonFiniteResult);
    }

    let res = match op {
        OpTemps::Annee => entier(quantite)
            .checked_mul(12)
            .and_then(|mois| date.plus_mois(mois)),
        OpTemps::Mois => date.plus_mois(entier(quantite)),
        OpTemps::Jour | OpTemps::Plus => {
            TimeDelta::try_days(entier(quantite)).and_then(|d| date.plus_duree(d))
        }
        OpTemps::Moins => entier(quantite)
            .checked_neg()
            .and_then(TimeDelta::try_days)
            .and_then(|d| date.plus_duree(d)),
        OpTemps::Heure => duree_ms(quantite, 3_600_000.0).and_then(|d| date.plus_duree(d)),
        OpTemps::Minute => duree_ms(quantite, 60_000.0).and_then(|d| date.plus_duree(d)),
        OpTemps::Seconde => duree_ms(quantite, 1_000.0).and_then(|d| date.plus_duree(d)),
    };

    res.ok_or_else(|| {
        debug!(op = op.symbole(), quantite, "décalage temporel hors limites");
        OperatorError::DateOutOfRange
    })
}

/// Décalage typé (les contrôles “spinner” connaissent déjà leur granularité).
pub fn decaler(
    op: OpTemps,
    date: NaiveDateTime,
    quantite: f64,
) -> Result<NaiveDateTime, OperatorError> {
    decaler_horodatage(op, date, quantite)
}

fn operateur_temporel(op: &str) -> Result<OpTemps, OperatorError> {
    OpTemps::from_symbole(op).ok_or_else(|| OperatorError::UnsupportedOperator(op.to_string()))
}

impl Operande for NaiveDateTime {
    type Quantite = f64;

    fn appliquer(op: &str, date: Self, quantite: f64) -> Result<Self, OperatorError> {
        decaler_horodatage(operateur_temporel(op)?, date, quantite)
    }
}

impl<Tz: TimeZone> Operande for DateTime<Tz> {
    type Quantite = f64;

    fn appliquer(op: &str, date: Self, quantite: f64) -> Result<Self, OperatorError> {
        decaler_horodatage(operateur_temporel(op)?, date, quantite)
    }
}
