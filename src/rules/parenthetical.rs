//! Rule 7: parenthetical asides.
//!
//! Parenthesized material is transcriber commentary, not speech, and is
//! removed. Removal iterates layer-by-layer until stable so nested asides
//! collapse too. A contact-language name inside the parentheses becomes a
//! placeholder tag instead of disappearing. Stray unmatched parentheses are
//! stripped as a final cleanup.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::rules::{languages, squash_spaces};

pub(crate) fn rule() -> Rule {
    Rule { id: 7, phenomenon: "parenthetical aside", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let re = regex!(r"\([^)]*\)");
    let mut events = Vec::new();
    let mut out = text.to_string();

    loop {
        let next = re
            .replace_all(&out, |caps: &regex::Captures| {
                let matched = caps.get(0).unwrap().as_str();
                let inner = &matched[1..matched.len() - 1];
                match languages::detect(inner) {
                    Some(tag) => {
                        let replacement = languages::placeholder(tag);
                        events.push(Rewrite::replaced(matched, replacement.as_str(), "PAREN_L2_TAGGED"));
                        replacement
                    }
                    None => {
                        events.push(Rewrite::removed(matched, "PAREN_REMOVED"));
                        String::new()
                    }
                }
            })
            .into_owned();
        if next == out {
            break;
        }
        out = next;
    }

    if out.contains('(') || out.contains(')') {
        for ch in out.chars().filter(|c| *c == '(' || *c == ')') {
            events.push(Rewrite::removed(ch.to_string(), "STRAY_PAREN_REMOVED"));
        }
        out = out.replace(['(', ')'], "");
    }

    Rewritten { text: squash_spaces(&out), events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests_support::neutral_ctx;

    fn run(text: &str) -> Rewritten {
        let (oracle, vocab) = neutral_ctx();
        let ctx = RuleContext {
            oracle: &oracle,
            vocabulary: &vocab,
            dialect: crate::rules::dialect::DialectProfile::Neutral,
        };
        apply(text, &ctx)
    }

    #[test]
    fn removes_simple_aside() {
        let out = run("bueno (se ríe) pues eso");
        assert_eq!(out.text, "bueno pues eso");
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.events[0].original, "(se ríe)");
    }

    #[test]
    fn nested_layers_degrade_to_full_removal() {
        // Fastest-closing pairs the outer opener with the inner closer; the
        // stray cleanup then takes the leftover delimiter.
        let out = run("a (b (c) d) e");
        assert_eq!(out.text, "a d e");
        assert!(!out.text.contains('('));
        assert!(!out.text.contains(')'));
    }

    #[test]
    fn language_name_becomes_placeholder() {
        let out = run("lo dijo (en kichwa) así");
        assert_eq!(out.text, "lo dijo ⟦L2_KICHWA⟧ así");
        assert_eq!(out.events[0].action, "PAREN_L2_TAGGED");
    }

    #[test]
    fn stray_parens_are_stripped() {
        let out = run("queda ) suelto ( aquí");
        assert_eq!(out.text, "queda suelto aquí");
        assert!(out.events.iter().any(|e| e.action == "STRAY_PAREN_REMOVED"));
    }
}
