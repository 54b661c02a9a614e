//! Rule 8: expressive phonetic lengthening.
//!
//! Speakers stretch vowels (`buenooo`, `siií`) and transcribers type them out.
//! Runs of identical `a/i/u` collapse from two; `e/o` only from three, since
//! double `e`/`o` is legitimate Spanish (`creer`, `leer`, `coordinar`). A
//! word-final run of identical consonants collapses unless it is exactly `ll`
//! or `rr`. Standalone `yy...` runs become a single `y`.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::engine::spans::ProtectedSpans;
use crate::rules::{char_at, squash_spaces};

pub(crate) fn rule() -> Rule {
    Rule { id: 8, phenomenon: "expressive lengthening", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();

    let out = collapse_vowel_runs(text, is_aiu, 2, &mut events);
    let out = collapse_vowel_runs(&out, is_eo, 3, &mut events);
    let out = collapse_final_consonants(&out, &mut events);
    let out = collapse_y_runs(&out, &mut events);

    Rewritten { text: squash_spaces(&out), events }
}

fn is_aiu(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'á' | 'í' | 'ú' | 'A' | 'I' | 'U' | 'Á' | 'Í' | 'Ú')
}

fn is_eo(c: char) -> bool {
    matches!(c, 'e' | 'o' | 'é' | 'ó' | 'E' | 'O' | 'É' | 'Ó')
}

fn is_repeatable_consonant(c: char) -> bool {
    matches!(
        c.to_ascii_lowercase(),
        'b' | 'c' | 'd' | 'f' | 'g' | 'h' | 'j' | 'k' | 'l' | 'm' | 'n' | 'p' | 'q' | 'r' | 's'
            | 't' | 'v' | 'w' | 'x' | 'z'
    ) || c == 'ñ'
        || c == 'Ñ'
}

/// Collapse runs of the *same* character (case and accent included) when the
/// run reaches `min_run`.
fn collapse_vowel_runs(
    text: &str,
    in_class: fn(char) -> bool,
    min_run: usize,
    events: &mut Vec<Rewrite>,
) -> String {
    let spans = ProtectedSpans::scan_blocks(text);
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let (start, c) = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j].1 == c {
            j += 1;
        }
        let end = chars.get(j).map(|&(p, _)| p).unwrap_or(text.len());
        let run = j - i;
        if run >= min_run && in_class(c) && !spans.overlaps(start, end) {
            events.push(Rewrite::replaced(&text[start..end], c.to_string(), "VOWEL_RUN_COLLAPSED"));
            out.push(c);
        } else {
            out.push_str(&text[start..end]);
        }
        i = j;
    }
    out
}

fn collapse_final_consonants(text: &str, events: &mut Vec<Rewrite>) -> String {
    let spans = ProtectedSpans::scan_blocks(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in regex!(r"\b\w+\b").find_iter(text) {
        if spans.overlaps(m.start(), m.end()) {
            continue;
        }
        let word = m.as_str();
        let chars: Vec<char> = word.chars().collect();
        let final_char = match chars.last() {
            Some(&c) if is_repeatable_consonant(c) => c,
            _ => continue,
        };
        let run = chars.iter().rev().take_while(|&&c| c == final_char).count();
        if run < 2 {
            continue;
        }
        if run == 2 && matches!(final_char.to_ascii_lowercase(), 'l' | 'r') {
            continue;
        }
        let stem: String = chars[..chars.len() - run].iter().collect();
        let collapsed = format!("{stem}{final_char}");
        events.push(Rewrite::replaced(word, collapsed.as_str(), "FINAL_CONSONANT_COLLAPSED"));
        out.push_str(&text[last..m.start()]);
        out.push_str(&collapsed);
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn collapse_y_runs(text: &str, events: &mut Vec<Rewrite>) -> String {
    let spans = ProtectedSpans::scan_blocks(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in regex!(r"\b[yY]{2,}\b").find_iter(text) {
        if spans.overlaps(m.start(), m.end()) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push('y');
        events.push(Rewrite::replaced(m.as_str(), "y", "Y_RUN_COLLAPSED"));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests_support::{ctx, neutral_ctx};

    fn run(text: &str) -> Rewritten {
        let (oracle, vocab) = neutral_ctx();
        apply(text, &ctx(&oracle, &vocab))
    }

    #[test]
    fn aiu_collapse_from_two() {
        assert_eq!(run("siií no").text, "sií no");
        assert_eq!(run("muuucho").text, "mucho");
    }

    #[test]
    fn eo_collapse_only_from_three() {
        assert_eq!(run("buenooo").text, "bueno");
        assert_eq!(run("creer y leer").text, "creer y leer");
    }

    #[test]
    fn accented_runs_collapse_too() {
        assert_eq!(run("aháá").text, "ahá");
    }

    #[test]
    fn final_consonant_runs() {
        assert_eq!(run("verdadd").text, "verdad");
        assert_eq!(run("ojalatt pues").text, "ojalat pues");
    }

    #[test]
    fn ll_and_rr_survive() {
        assert_eq!(run("ell carr").text, "ell carr");
        let out = run("elll");
        assert_eq!(out.text, "el");
    }

    #[test]
    fn y_runs_become_single_y() {
        let out = run("yyy entonces");
        assert_eq!(out.text, "y entonces");
        assert_eq!(out.events[0].action, "Y_RUN_COLLAPSED");
    }

    #[test]
    fn bracketed_material_is_untouched() {
        assert_eq!(run("va [siii] bien").text, "va [siii] bien");
    }
}
