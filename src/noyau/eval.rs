//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> réduction exacte (BigRational) -> f64
//!
//! `compute` est l’unique frontière de normalisation : toute erreur (jetons,
//! forme, division par zéro, opérateur) sort en `ExpressionMalformee`.
//! `try_compute` ne remonte jamais d’erreur.

use num_rational::BigRational;
use num_traits::ToPrimitive;
use tracing::{debug, trace};

use super::erreurs::{ExpressionMalformee, Motif};
use super::jetons::{format_tokens, tokenize, Tok};
use super::lecture::{format_rat, lecture_decimale};
use super::limites::Limites;
use super::rpn::{eval_rpn, to_rpn};

/// Démarche d’une évaluation (panneau d’explication côté appelant).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub exact: BigRational,
    pub valeur: f64,
    pub demarche: Demarche,
}

impl Evaluation {
    /// Lecture décimale tronquée à `digits` chiffres (au plus `DIGITS_MAX`).
    pub fn lecture(&self, digits: usize) -> String {
        lecture_decimale(&self.exact, digits)
    }

    /// Forme exacte : "3.5", "1/3"...
    pub fn exact_txt(&self) -> String {
        format_rat(&self.exact)
    }
}

struct Etapes {
    jetons: Vec<Tok>,
    rpn: Vec<Tok>,
    exact: BigRational,
}

fn evaluer(expr: &str, limites: &Limites) -> Result<Etapes, Motif> {
    let longueur = expr.chars().count();
    if longueur > limites.longueur_max {
        return Err(Motif::TropLongue {
            longueur,
            max: limites.longueur_max,
        });
    }

    // 1) Jetons
    let jetons = tokenize(expr)?;
    trace!(jetons = %format_tokens(&jetons), "expression tokenisée");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_tokens(&rpn), "forme postfixée");

    // 3) Réduction exacte
    let exact = eval_rpn(&rpn, limites)?;
    trace!(resultat = %exact, "expression réduite");

    Ok(Etapes { jetons, rpn, exact })
}

fn en_f64(exact: &BigRational) -> Result<f64, Motif> {
    exact
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(Motif::ResultatNonRepresentable)
}

fn rejet(expr: &str, motif: Motif) -> ExpressionMalformee {
    debug!(expression = expr, motif = %motif, "expression rejetée");
    ExpressionMalformee::from(motif)
}

/// Évalue avec des limites explicites.
pub fn compute_with(expr: &str, limites: &Limites) -> Result<f64, ExpressionMalformee> {
    evaluer(expr, limites)
        .and_then(|e| en_f64(&e.exact))
        .map_err(|m| rejet(expr, m))
}

/// `compute("2*(3+4)") == Ok(14.0)`
pub fn compute(expr: &str) -> Result<f64, ExpressionMalformee> {
    compute_with(expr, &Limites::default())
}

/// Valeur exacte (pas de passage par f64) : `compute_exact("0.1+0.2")` vaut 3/10.
pub fn compute_exact(expr: &str) -> Result<BigRational, ExpressionMalformee> {
    evaluer(expr, &Limites::default())
        .map(|e| e.exact)
        .map_err(|m| rejet(expr, m))
}

/// Ne remonte jamais d’erreur : `None` pour toute expression refusée.
pub fn try_compute(expr: &str) -> Option<f64> {
    compute(expr).ok()
}

/// Forme (succès, valeur) : `(false, 0.0)` en cas d’échec.
pub fn try_compute_or_default(expr: &str) -> (bool, f64) {
    match try_compute(expr) {
        Some(v) => (true, v),
        None => (false, f64::default()),
    }
}

/// Évaluation + démarche (jetons, RPN).
pub fn evaluate_detaille(expr: &str) -> Result<Evaluation, ExpressionMalformee> {
    let etapes = evaluer(expr, &Limites::default()).map_err(|m| rejet(expr, m))?;
    let valeur = en_f64(&etapes.exact).map_err(|m| rejet(expr, m))?;

    Ok(Evaluation {
        valeur,
        demarche: Demarche {
            jetons: format_tokens(&etapes.jetons),
            rpn: format_tokens(&etapes.rpn),
        },
        exact: etapes.exact,
    })
}
