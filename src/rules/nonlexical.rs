//! Rule 6: non-lexical bracket/brace content, plus free-standing laughter.
//!
//! `[...]` and `{...}` blocks are transcriber annotation and are deleted,
//! except when they name a contact language (kept as a placeholder tag).
//! Before the blocks go, free-standing laughter tokens (`jajaja`, `jejeje`)
//! found *outside* any block are deleted; block interiors are never entered by
//! the token pass.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::engine::spans::ProtectedSpans;
use crate::rules::{languages, squash_spaces};

pub(crate) fn rule() -> Rule {
    Rule { id: 6, phenomenon: "non-lexical annotation", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();

    // 1) free-standing laughter outside any block
    let spans = ProtectedSpans::scan_blocks(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in regex!(r"\b\w+\b").find_iter(text) {
        if spans.contains(m.start()) || !is_laughter_token(m.as_str()) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        events.push(Rewrite::removed(m.as_str(), "LAUGHTER_REMOVED"));
        last = m.end();
    }
    out.push_str(&text[last..]);

    // 2) the blocks themselves
    for re in [regex!(r"\[[^\]]*\]"), regex!(r"\{[^}]*\}")] {
        out = re
            .replace_all(&out, |caps: &regex::Captures| {
                let matched = caps.get(0).unwrap().as_str();
                let inner = &matched[1..matched.len() - 1];
                match languages::detect(inner) {
                    Some(tag) => {
                        let replacement = languages::placeholder(tag);
                        events.push(Rewrite::replaced(matched, replacement.as_str(), "BLOCK_L2_TAGGED"));
                        replacement
                    }
                    None => {
                        events.push(Rewrite::removed(matched, "BLOCK_REMOVED"));
                        String::new()
                    }
                }
            })
            .into_owned();
    }

    Rewritten { text: squash_spaces(&out), events }
}

/// Laughter shape: starts with `j`, at least three `j`s total, at least one
/// vowel, nothing but `j` and vowels, five characters or more.
fn is_laughter_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    if chars.len() < 5 || chars[0] != 'j' {
        return false;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü');
    if !chars.iter().all(|&c| c == 'j' || is_vowel(c)) {
        return false;
    }
    chars.iter().filter(|&&c| c == 'j').count() >= 3 && chars.iter().any(|&c| is_vowel(c))
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
    fn laughter_outside_blocks_is_removed() {
        let out = run("bueno JAJAJAJA eso fue");
        assert_eq!(out.text, "bueno eso fue");
        assert_eq!(out.events[0].action, "LAUGHTER_REMOVED");
    }

    #[test]
    fn laughter_inside_brackets_goes_with_the_block() {
        let out = run("bueno [JAJAJAJA] eso fue");
        assert_eq!(out.text, "bueno eso fue");
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.events[0].original, "[JAJAJAJA]");
        assert_eq!(out.events[0].action, "BLOCK_REMOVED");
    }

    #[test]
    fn language_block_becomes_placeholder() {
        let out = run("lo cuenta [en guaraní] despacio");
        assert_eq!(out.text, "lo cuenta ⟦L2_GUARANÍ⟧ despacio");
        assert_eq!(out.events[0].action, "BLOCK_L2_TAGGED");
    }

    #[test]
    fn brace_blocks_are_removed_too() {
        let out = run("sigue {tos} hablando");
        assert_eq!(out.text, "sigue hablando");
    }

    #[test]
    fn laughter_shape_is_strict() {
        assert!(is_laughter_token("jajaja"));
        assert!(is_laughter_token("jejeje"));
        assert!(is_laughter_token("JAJAJAJA"));
        assert!(!is_laughter_token("jaja"));
        assert!(!is_laughter_token("jamón"));
        assert!(!is_laughter_token("jjjjj"));
    }
}
