//! Rule 10: emphatic all-caps.
//!
//! Shouted words are transcribed in capitals. Title-case tokens (names) are
//! untouched. All-caps tokens of two to ten characters are lowered only when
//! the lowered form is a dictionary word, which protects genuine acronyms;
//! anything longer is emphasis, not an acronym, and is lowered outright.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::engine::spans::ProtectedSpans;
use crate::rules::squash_spaces;

pub(crate) fn rule() -> Rule {
    Rule { id: 10, phenomenon: "emphatic capitals", apply: Box::new(apply) }
}

fn apply(text: &str, ctx: &RuleContext) -> Rewritten {
    let spans = ProtectedSpans::scan_blocks(text);
    let mut events = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in regex!(r"\b\w+\b").find_iter(text) {
        if spans.overlaps(m.start(), m.end()) {
            continue;
        }
        let token = m.as_str();
        if is_title_case(token) || !is_all_caps(token) {
            continue;
        }
        let lowered = token.to_lowercase();
        let len = token.chars().count();
        if (2..=10).contains(&len) && !ctx.oracle.is_valid_word(&lowered) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(&lowered);
        events.push(Rewrite::replaced(token, lowered.as_str(), "CAPS_LOWERED"));
        last = m.end();
    }
    out.push_str(&text[last..]);

    Rewritten { text: squash_spaces(&out), events }
}

fn is_title_case(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if token.chars().count() >= 2 => {
            first.is_uppercase() && chars.all(|c| c.is_lowercase())
        }
        _ => false,
    }
}

/// Has at least one letter and no lowercase letters.
fn is_all_caps(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic()) && !token.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::testing::SetOracle;
    use crate::rules::tests_support::ctx;
    use crate::vocab::Vocabulary;

    fn run(text: &str) -> Rewritten {
        let oracle = SetOracle::new(&["casa", "nunca", "determinadamente"]);
        let vocab = Vocabulary::new();
        apply(text, &ctx(&oracle, &vocab))
    }

    #[test]
    fn dictionary_word_is_lowered() {
        let out = run("en mi CASA no");
        assert_eq!(out.text, "en mi casa no");
        assert_eq!(out.events[0].action, "CAPS_LOWERED");
    }

    #[test]
    fn acronym_is_protected() {
        let out = run("trabajó en la ONU");
        assert_eq!(out.text, "trabajó en la ONU");
        assert!(out.events.is_empty());
    }

    #[test]
    fn long_emphasis_is_always_lowered() {
        assert_eq!(run("DETERMINADAMENTE sí").text, "determinadamente sí");
        assert_eq!(run("QUEFUERTEHOMBRE ya").text, "quefuertehombre ya");
    }

    #[test]
    fn title_case_is_untouched() {
        let out = run("fuimos a Medellín con Ana");
        assert!(out.events.is_empty());
    }

    #[test]
    fn bracketed_tokens_are_untouched() {
        assert_eq!(run("sigue [CASA] igual").text, "sigue [CASA] igual");
    }

    #[test]
    fn accented_caps_count_as_caps() {
        assert_eq!(run("NUNCA JAMÁS").text, "nunca JAMÁS");
    }
}
