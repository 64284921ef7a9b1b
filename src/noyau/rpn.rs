// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix) en VALIDANT la forme
// - Puis réduire la RPN sur une pile de valeurs exactes
//
// Règles:
// - précédence : + - < * / % < ^ ; ^ associatif à droite, les autres à gauche
// - pas de moins unaire : un opérateur doit toujours suivre une valeur
//   ("-5", "2++2", "(-1)" sont refusés)
// - deux valeurs juxtaposées sont refusées ("2 3", "2(3)", "(2)(3)")

use num_rational::BigRational;

use super::erreurs::Motif;
use super::jetons::Tok;
use super::limites::Limites;
use super::operateurs::appliquer;

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: 3 + 4 * 2 / ( 1 - 5 ) ^ 2
///   rpn:    3 4 2 * 1 5 - 2 ^ / +
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, Motif> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une parenthèse fermée.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(Motif::OperandeInattendu);
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(Motif::OperandeInattendu);
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // "()" ou "(2+)"
                if !prev_was_value {
                    return Err(Motif::OperandeManquant);
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(Motif::ParentheseInattendue),
                    }
                }

                prev_was_value = true;
            }

            Tok::Op(op) => {
                if !prev_was_value {
                    return Err(Motif::OperandeManquant);
                }

                // dépile tant que la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(&Tok::Op(top)) = ops.last() {
                    let doit_pop = if op.is_right_associative() {
                        top.precedence() > op.precedence()
                    } else {
                        top.precedence() >= op.precedence()
                    };

                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(Tok::Op(top));
                }

                ops.push(Tok::Op(op));
                prev_was_value = false;
            }
        }
    }

    // opérateur final (ou entrée sans valeur)
    if !prev_was_value {
        return Err(Motif::OperandeManquant);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(Motif::ParentheseNonFermee);
        }
        out.push(op);
    }

    Ok(out)
}

/// Réduit une RPN en valeur exacte.
/// Chaque noeud binaire passe par `appliquer` (mêmes règles que `apply_operator`).
pub fn eval_rpn(rpn: &[Tok], limites: &Limites) -> Result<BigRational, Motif> {
    let mut st: Vec<BigRational> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(r) => st.push(r.clone()),

            Tok::Op(op) => {
                let b = st.pop().ok_or(Motif::OperandeManquant)?;
                let a = st.pop().ok_or(Motif::OperandeManquant)?;
                st.push(appliquer(*op, a, b, limites)?);
            }

            Tok::LPar | Tok::RPar => return Err(Motif::ParentheseInattendue),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        (Some(_), false) => Err(Motif::OperandeInattendu),
        (None, _) => Err(Motif::OperandeManquant),
    }
}
