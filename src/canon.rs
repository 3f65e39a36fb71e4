// src/canon.rs
//
// Normalisation du texte mathématique informel vers une forme canonique :
// - toute multiplication est explicite (`2x` -> `2*x`, `(x)(y)` -> `(x)*(y)`)
// - toute puissance utilise `**` (`x^2` -> `x**2`)
// - toute fonction connue est appliquée avec parenthèses (`sin x` -> `sin(x)`)
//
// Contrat : n'échoue jamais. Une entrée malformée est normalisée au mieux ;
// c'est l'évaluateur restreint (ou le collaborateur symbolique externe) qui
// rejettera ensuite.
//
// Construction en trois passes sur la chaîne qui GRANDIT (l'ordre compte :
// une passe ultérieure ne doit jamais défaire une insertion antérieure) :
//   1. `^` -> `**`                      (substitution inconditionnelle)
//   2. application des fonctions nues   (`sin x` -> `sin(x)`)
//   3. un seul balayage gauche-droite   (toutes les insertions de `*`)
// La passe 3 remplace l'empilement de règles regex du schéma historique :
// une classification d'adjacence par position, puis l'insertion, en un
// passage — même comportement, sans interaction de règles.
//
// Invariant de sortie : renormaliser une sortie ne change rien
// (normalise(normalise(s)) == normalise(s)).

use crate::caracteres::{est_alnum, est_mot};
use crate::fonctions::est_fonction_connue;

/// Point d'entrée du normaliseur.
pub fn normalise(entree: &str) -> String {
    let s = remplace_puissances(entree);
    let s = applique_fonctions_nues(&s);
    insere_multiplications(&s)
}

/* ------------------------ passe 1 : puissances ------------------------ */

fn remplace_puissances(s: &str) -> String {
    s.replace('^', "**")
}

/* ------------------------ passe 2 : fonctions nues ------------------------ */

// `FUNC␣OPERANDE` -> `FUNC(OPERANDE)` où OPERANDE est le seul jeton qui suit
// (identifiant ou nombre), et seulement si FUNC n'est pas déjà suivi de `(`.
// Un « mot » précédé d'un caractère de mot n'est pas une occurrence de
// fonction (`2sin x` n'applique pas `sin` — même frontière que \b).

fn applique_fonctions_nues(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut sortie = String::with_capacity(s.len() + 8);
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        let debut_de_mot = (c.is_ascii_alphabetic() || c == '_')
            && (i == 0 || !est_mot(chars[i - 1]));

        if !debut_de_mot {
            sortie.push(c);
            i += 1;
            continue;
        }

        // mot complet
        let debut = i;
        while i < chars.len() && est_mot(chars[i]) {
            i += 1;
        }
        let mot: String = chars[debut..i].iter().collect();
        sortie.push_str(&mot);

        if !est_fonction_connue(&mot) {
            continue;
        }

        // au moins un blanc, puis un opérande qui ne commence PAS par `(`
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j == i || j >= chars.len() || chars[j] == '(' {
            continue;
        }

        if let Some(fin) = fin_operande(&chars, j) {
            sortie.push('(');
            for &c in &chars[j..fin] {
                sortie.push(c);
            }
            sortie.push(')');
            i = fin;
        }
    }

    sortie
}

/// Fin (exclusive) de l'opérande débutant en `j` : identifiant `[a-zA-Z_]\w*`
/// ou nombre `\d+(\.\d*)?`. None si `j` ne commence pas un opérande.
fn fin_operande(chars: &[char], j: usize) -> Option<usize> {
    let c = chars[j];

    if c.is_ascii_alphabetic() || c == '_' {
        let mut fin = j + 1;
        while fin < chars.len() && est_mot(chars[fin]) {
            fin += 1;
        }
        return Some(fin);
    }

    if c.is_ascii_digit() {
        let mut fin = j + 1;
        while fin < chars.len() && chars[fin].is_ascii_digit() {
            fin += 1;
        }
        if fin < chars.len() && chars[fin] == '.' {
            fin += 1;
            while fin < chars.len() && chars[fin].is_ascii_digit() {
                fin += 1;
            }
        }
        return Some(fin);
    }

    None
}

/* ------------------------ passe 3 : insertions de `*` ------------------------ */

// Un seul balayage. Pour chaque paire (courant, suivant) on décide d'insérer
// `*` d'après quatre adjacences :
//   a. chiffre  puis lettre / `_` / `(`          : 2x -> 2*x, 2( -> 2*(
//   b. `)`      puis `(` / lettre / chiffre / `_`: (x)(y) -> (x)*(y)
//   c. lettre/_ puis `(` : identifiant complet (récupéré en arrière) hors
//      table des fonctions : x(y+1) -> x*(y+1), mais sin(x) intouché
//   d. deux lettres isolées (ni précédées ni suivies d'alphanumérique),
//      hors nom de fonction connue : xy -> x*y, mais `ln(x)` jamais scindé
//
// Les gardes « avant » (c, d) se lisent sur la SORTIE déjà émise — la chaîne
// qui grandit — pour que les insertions des adjacences précédentes comptent
// (2xy -> 2*xy au moment de la paire (2,x), donc (x,y) voit `*` avant x et
// scinde bien en 2*x*y). Les gardes « après » se lisent sur l'entrée.

fn insere_multiplications(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut sortie: Vec<char> = Vec::with_capacity(chars.len() + 8);

    for i in 0..chars.len() {
        sortie.push(chars[i]);

        let Some(&suivant) = chars.get(i + 1) else {
            break;
        };
        let courant = chars[i];

        // a. chiffre puis lettre / souligné / parenthèse ouvrante
        if courant.is_ascii_digit()
            && (suivant.is_ascii_alphabetic() || suivant == '_' || suivant == '(')
        {
            sortie.push('*');
            continue;
        }

        // b. parenthèse fermante puis ouvrante ou caractère de mot
        if courant == ')' && (suivant == '(' || est_mot(suivant)) {
            sortie.push('*');
            continue;
        }

        // c. lettre/souligné puis parenthèse ouvrante : fonction ou produit ?
        if (courant.is_ascii_alphabetic() || courant == '_') && suivant == '(' {
            let ident = mot_arriere(&sortie);
            if !est_fonction_connue(&ident) {
                sortie.push('*');
            }
            continue;
        }

        // d. deux lettres isolées
        if courant.is_ascii_alphabetic() && suivant.is_ascii_alphabetic() {
            let avant_isole = sortie
                .len()
                .checked_sub(2)
                .map_or(true, |k| !est_alnum(sortie[k]));
            let apres_isole = chars.get(i + 2).map_or(true, |&c| !est_alnum(c));

            if avant_isole && apres_isole && !dans_nom_de_fonction(&sortie, &chars, i) {
                sortie.push('*');
            }
        }
    }

    sortie.into_iter().collect()
}

/// Mot (caractères de mot) qui termine la sortie déjà émise.
fn mot_arriere(sortie: &[char]) -> String {
    let fin = sortie.len();
    let mut debut = fin;
    while debut > 0 && est_mot(sortie[debut - 1]) {
        debut -= 1;
    }
    sortie[debut..fin].iter().collect()
}

/// La paire de lettres (i, i+1) vit-elle dans un nom de fonction connue ?
/// On recompose le mot : queue de la sortie émise + suite de l'entrée.
/// C'est ce qui empêche la règle d de scinder `ln` (nom à deux lettres,
/// que la garde « isolé » ne protège pas).
fn dans_nom_de_fonction(sortie: &[char], chars: &[char], i: usize) -> bool {
    let mut mot = mot_arriere(sortie);
    let mut j = i + 1;
    while j < chars.len() && est_mot(chars[j]) {
        mot.push(chars[j]);
        j += 1;
    }
    est_fonction_connue(&mot)
}

/* ------------------------ tests ------------------------ */
