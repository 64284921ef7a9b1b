// src/noyau/erreurs.rs
//
// Erreurs du noyau
// ----------------
// - OperatorError       : erreurs DIRECTES de apply_operator (numérique + temporel)
// - ExpressionMalformee : l’unique erreur visible côté chaîne (compute)
//
// Règle : compute normalise tout en ExpressionMalformee, mais garde la cause
// (Motif) et la chaîne de `source` pour le diagnostic.

use thiserror::Error;

/// Échec d’une application d’opérateur (sans passer par le parseur).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    #[error("opérateur non supporté: {0:?}")]
    UnsupportedOperator(String),
    #[error("division par zéro")]
    DivisionByZero,
    #[error("résultat non fini")]
    NonFiniteResult,
    #[error("date hors limites")]
    DateOutOfRange,
}

/// Cause précise d’une expression refusée.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Motif {
    #[error("entrée vide")]
    Vide,
    #[error("caractère inattendu: '{c}' (position {position})")]
    CaractereInattendu { c: char, position: usize },
    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),
    #[error("parenthèses non fermées")]
    ParentheseNonFermee,
    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,
    #[error("opérande manquant")]
    OperandeManquant,
    #[error("opérande inattendu")]
    OperandeInattendu,
    #[error("expression trop longue ({longueur} > {max})")]
    TropLongue { longueur: usize, max: usize },
    #[error("résultat non représentable")]
    ResultatNonRepresentable,
    #[error(transparent)]
    Operateur(#[from] OperatorError),
}

/// Erreur unique de `compute` : tout ce qui échoue sur une chaîne arrive ici.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expression malformée: {motif}")]
pub struct ExpressionMalformee {
    #[source]
    pub motif: Motif,
}

impl From<Motif> for ExpressionMalformee {
    fn from(motif: Motif) -> Self {
        Self { motif }
    }
}
