//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - proptest (cas bornés, profondeur bornée)
//! - invariant clé : try_compute(e) == compute(e).ok(), pour TOUTE chaîne
//! - les expressions bien formées ne sont refusées que pour une raison d’opérateur
//!   (division par zéro, puissance non finie) ou de taille

use proptest::prelude::*;

use super::*;

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn nombre() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
    ]
}

fn operateur() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "/", "%", "^"])
}

/// Expressions bien formées : nombres, opérateurs binaires, parenthèses.
fn expression() -> impl Strategy<Value = String> {
    nombre().prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), operateur(), inner.clone())
                .prop_map(|(a, op, b)| format!("{a}{op}{b}")),
            inner.prop_map(|e| format!("({e})")),
        ]
    })
}

fn is_erreur_attendue(motif: &Motif) -> bool {
    matches!(
        motif,
        Motif::Operateur(OperatorError::DivisionByZero)
            | Motif::Operateur(OperatorError::NonFiniteResult)
            | Motif::ResultatNonRepresentable
    )
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fuzz_try_compute_suit_compute(s in "[0-9+\\-*/^%(). a-z]{0,24}") {
        prop_assert_eq!(try_compute(&s), compute(&s).ok());
    }

    #[test]
    fn fuzz_bien_formees(e in expression()) {
        match compute(&e) {
            Ok(v) => prop_assert!(v.is_finite()),
            Err(err) => prop_assert!(
                is_erreur_attendue(&err.motif),
                "erreur non attendue: expr={:?} err={}", e, err
            ),
        }
    }

    #[test]
    fn fuzz_determinisme(e in expression()) {
        prop_assert_eq!(try_compute(&e), try_compute(&e));
        prop_assert_eq!(compute_exact(&e), compute_exact(&e));
    }

    #[test]
    fn fuzz_precedence(a in 0u32..1000, b in 0u32..1000, c in 0u32..1000) {
        prop_assert_eq!(
            compute(&format!("{a}+{b}*{c}")),
            compute(&format!("{a}+({b}*{c})"))
        );
        prop_assert_eq!(
            compute(&format!("{a}*{b}^2")),
            compute(&format!("{a}*({b}^2)"))
        );
    }

    #[test]
    fn fuzz_operateur_isole(op in "[+\\-*/^%]") {
        // un opérateur seul, en tête ou en queue : jamais accepté
        let en_tete = format!("{op}1");
        let en_queue = format!("1{op}");
        let double = format!("1{op}{op}1");
        prop_assert!(compute(&op).is_err());
        prop_assert!(compute(&en_tete).is_err());
        prop_assert!(compute(&en_queue).is_err());
        prop_assert!(compute(&double).is_err());
    }

    #[test]
    fn fuzz_apply_operator_f64(a in -1e6f64..1e6, b in -1e6f64..1e6, op in operateur()) {
        let r = apply_operator(op, a, b);
        if (op == "/" || op == "%") && b == 0.0 {
            prop_assert_eq!(r, Err(OperatorError::DivisionByZero));
        } else {
            prop_assert!(r.is_ok());
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    // 600 termes : ~3600 caractères, sous la longueur max par défaut
    let expr = somme_balancee("1/2", 600);
    let v = compute(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, 300.0);

    // au-delà : refusé d’office, sauf limites élargies
    let long = somme_balancee("1/2", 800);
    assert!(matches!(
        compute(&long).unwrap_err().motif,
        Motif::TropLongue { max: 4096, .. }
    ));
    let large = Limites::default().with_longueur_max(10_000);
    assert_eq!(compute_with(&long, &large), Ok(400.0));
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    // parseur itératif : pas de récursion, donc pas de débordement de pile
    let n = 1500;
    let expr = format!("{}7{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(compute(&expr), Ok(7.0));

    let desequilibree = format!("{}7{}", "(".repeat(n), ")".repeat(n - 1));
    assert_eq!(
        compute(&desequilibree).unwrap_err().motif,
        Motif::ParentheseNonFermee
    );
}

#[test]
fn fuzz_safe_puissances_geantes_bornees() {
    // tours de puissances : jamais de big int géant (repli f64 => non fini)
    for expr in ["9^9^9", "(10^1000)^1000", "2^100000"] {
        let e = compute(expr).unwrap_err();
        assert!(is_erreur_attendue(&e.motif), "expr={expr:?} err={e}");
    }
}
