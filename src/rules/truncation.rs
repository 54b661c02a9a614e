//! Rule 1: word-truncation markers.
//!
//! Transcribers mark an abandoned word with a trailing dash and, when they can
//! reconstruct it, the intended form in brackets: `bue- [bueno]`. The pair
//! resolves to the correction. A bare `X-` with no bracketed correction is an
//! abandoned fragment and is deleted outright.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::rules::{char_at, squash_spaces};

pub(crate) fn rule() -> Rule {
    Rule { id: 1, phenomenon: "truncation marker", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();

    // X- [Y] -> Y
    let corrected = regex!(r"\b(\w+)[-–—]\s*\[([^\]]+)\]")
        .replace_all(text, |caps: &regex::Captures| {
            let correction = caps[2].trim().to_string();
            events.push(Rewrite::replaced(&caps[0], correction.as_str(), "TRUNCATION_RESOLVED"));
            correction
        })
        .into_owned();

    // bare X- -> deleted, unless a bracketed correction follows after all
    let mut out = String::with_capacity(corrected.len());
    let mut last = 0;
    for caps in regex!(r"\b(\w+)[-–—]").captures_iter(&corrected) {
        let m = caps.get(0).unwrap();
        if !bare_truncation(&corrected, m.end()) {
            continue;
        }
        out.push_str(&corrected[last..m.start()]);
        events.push(Rewrite::removed(m.as_str(), "TRUNCATION_DROPPED"));
        last = m.end();
    }
    out.push_str(&corrected[last..]);

    Rewritten { text: squash_spaces(&out), events }
}

/// The dash must be followed by whitespace, end-of-text or sentence
/// punctuation, and must not lead into a bracketed correction.
fn bare_truncation(text: &str, end: usize) -> bool {
    match char_at(text, end) {
        None => true,
        Some(next) => {
            if !(next.is_whitespace() || matches!(next, '.' | ',' | ';' | ':' | '!' | '?' | '¿' | '¡')) {
                return false;
            }
            let after_spaces = text[end..].trim_start();
            !after_spaces.starts_with('[')
        }
    }
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
    fn resolves_correction() {
        let out = run("bue- [bueno] eso fue");
        assert_eq!(out.text, "bueno eso fue");
        assert_eq!(out.events[0].original, "bue- [bueno]");
        assert_eq!(out.events[0].resulting, "bueno");
    }

    #[test]
    fn drops_bare_fragment() {
        let out = run("la cami- se rompió");
        assert_eq!(out.text, "la se rompió");
        assert_eq!(out.events[0].action, "TRUNCATION_DROPPED");
    }

    #[test]
    fn drops_fragment_at_end_of_text() {
        assert_eq!(run("y entonces qui-").text, "y entonces ");
    }

    #[test]
    fn hyphenated_compound_is_untouched() {
        let out = run("un no-lugar cualquiera");
        assert_eq!(out.text, "un no-lugar cualquiera");
        assert!(out.events.is_empty());
    }

    #[test]
    fn en_and_em_dashes_count() {
        assert_eq!(run("bue– [bueno] ya").text, "bueno ya");
        assert_eq!(run("bue— [bueno] ya").text, "bueno ya");
    }
}
