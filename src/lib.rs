// src/lib.rs
//
// Calculatrice — évaluateur d’expressions arithmétiques + décalages temporels
// ---------------------------------------------------------------------------
// - Chaînes  : compute / try_compute ("3+4*2/(1-5)^2" -> 3.5)
// - Nombres  : apply_operator("%", 7.0, 3.0) -> 1.0
// - Dates    : apply_operator("M", date, 1.0) -> date + 1 mois
//
// Tout est pur et sans état : appelable depuis n’importe quel thread.
// Les contrôles de saisie (champ numérique, spinner de date) vivent ailleurs.

pub mod noyau;

pub use noyau::{
    apply_operator, compute, compute_exact, compute_with, decaler, eval_rpn, evaluate_detaille,
    format_tokens, is_operator, is_temporal_operator, to_rpn, tokenize, try_compute,
    try_compute_or_default, Demarche, Evaluation, ExpressionMalformee, Limites, Motif, Nombre,
    OpTemps, Operande, Operateur, OperatorError, Tok,
};
