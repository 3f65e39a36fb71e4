//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler normaliseur et évaluateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur et longueur bornées
//! - budget temps global
//! - on accepte les erreurs *attendues* (syntaxe, division par zéro,
//!   dépassement, domaine) — jamais de panic, jamais d'autre issue
//! - invariants clés : normaliser est idempotent ; évaluer est total et
//!   déterministe ; une expression bien formée n'échoue jamais en syntaxe

use std::time::{Duration, Instant};

use crate::erreurs::ErreurEval;
use crate::{eval_expression, normalise};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de texte brut ------------------------ */

// Alphabet volontairement vicieux : chiffres, lettres, opérateurs,
// parenthèses, points, blancs, et quelques noms de fonctions entiers.

fn gen_brut(rng: &mut Rng) -> String {
    const MORCEAUX: &[&str] = &[
        "0", "1", "2", "7", "9", "x", "y", "z", "a", "b", "_", "+", "-", "*", "/", "%", "^",
        "(", ")", ".", " ", "  ", "sin", "cos", "ln", "sqrt", "pi", "3.14", "..", "**",
    ];

    // une fois sur huit : une expression bien formée, pour garantir un mix
    // succès/erreurs dans les campagnes en aval
    if rng.pick(8) == 0 {
        return gen_expr(rng, 2);
    }

    let longueur = 1 + rng.pick(24) as usize;
    let mut s = String::new();
    for _ in 0..longueur {
        s.push_str(MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize]);
    }
    s
}

/* ------------------------ Génération d'expressions bien formées ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "7".to_string(),
        4 => "0.5".to_string(),
        _ => "3.25".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(9) {
        0 | 1 => gen_nombre(rng),
        2 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        7 => format!("(-{})", gen_expr(rng, depth - 1)),
        _ => {
            // exposant borné pour rester dans le garde-fou
            let e = rng.pick(5);
            if rng.coin() {
                format!("({}**{e})", gen_expr(rng, depth - 1))
            } else {
                format!("({}**0.5)", gen_expr(rng, depth - 1))
            }
        }
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn est_erreur_attendue(e: &ErreurEval) -> bool {
    // Liste blanche : les seules issues permises pour un fuzz, parce que
    // le domaine est volontairement limité.
    matches!(
        e,
        ErreurEval::Syntaxe { .. }
            | ErreurEval::DivisionParZero
            | ErreurEval::Debordement
            | ErreurEval::Domaine(_)
    )
}

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

#[test]
fn fuzz_safe_normaliseur_total_et_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let brut = gen_brut(&mut rng);

        // total : jamais de panic, même sur du texte absurde
        let une_fois = normalise(&brut);
        // déterministe
        assert_eq!(normalise(&brut), une_fois, "brut={brut:?}");
        // idempotent
        assert_eq!(
            normalise(&une_fois),
            une_fois,
            "idempotence violée pour brut={brut:?}"
        );
    }
}

#[test]
fn fuzz_safe_evaluateur_total_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let brut = gen_brut(&mut rng);
        let canonique = normalise(&brut);

        let r1 = eval_expression(&canonique);
        let r2 = eval_expression(&canonique);
        assert_eq!(r1, r2, "non-déterminisme pour {canonique:?}");

        match r1 {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    est_erreur_attendue(&e),
                    "erreur non attendue: entrée={canonique:?} err={e:?}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne « balaye » rien.
    assert!(seen_err > 10, "trop peu d'erreurs vues: {seen_err}");
    assert!(seen_ok > 0, "aucun succès: fuzz trop « sage »");
}

#[test]
fn fuzz_safe_bien_forme_jamais_erreur_de_syntaxe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr) {
            Ok(_) => {}
            Err(ErreurEval::DivisionParZero)
            | Err(ErreurEval::Debordement)
            | Err(ErreurEval::Domaine(_)) => {}
            Err(autre) => {
                panic!("expression bien formée rejetée: expr={expr:?} err={autre:?}")
            }
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(0.5) = 400, exact
    assert_eq!(v.to_string(), "400");
}
