//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation + alphabet numérique (Operateur)
//! - rpn.rs        : shunting-yard + réduction de la RPN
//! - operateurs.rs : apply_operator (trait Operande) + domaine numérique
//! - temps.rs      : opérateurs temporels (y M d H m s + -)
//! - eval.rs       : pipeline complet (compute / try_compute)
//! - lecture.rs    : lecture décimale tronquée + affichage exact
//! - erreurs.rs    : OperatorError / ExpressionMalformee
//! - limites.rs    : garde-fous (longueur, taille des puissances exactes)

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod lecture;
pub mod limites;
pub mod operateurs;
pub mod rpn;
pub mod temps;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use erreurs::{ExpressionMalformee, Motif, OperatorError};
pub use eval::{
    compute, compute_exact, compute_with, evaluate_detaille, try_compute, try_compute_or_default,
    Demarche, Evaluation,
};
pub use jetons::{format_tokens, is_operator, tokenize, Operateur, Tok};
pub use limites::Limites;
pub use operateurs::{apply_operator, Nombre, Operande};
pub use rpn::{eval_rpn, to_rpn};
pub use temps::{decaler, is_temporal_operator, OpTemps};
