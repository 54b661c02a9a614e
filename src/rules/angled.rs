//! Rule 5: angle-bracketed spans outside `[ ]` and `{ }`.
//!
//! One left-to-right scan with a nesting counter per block kind. An angle span
//! that opens inside a bracket or brace region is someone else's business; an
//! angle span that never closes before end-of-text is left untouched.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::rules::squash_spaces;

pub(crate) fn rule() -> Rule {
    Rule { id: 5, phenomenon: "angle-bracketed span", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut events = Vec::new();
    let mut brackets = 0u32;
    let mut braces = 0u32;
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        match ch {
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            '{' => braces += 1,
            '}' => braces = braces.saturating_sub(1),
            '<' if brackets == 0 && braces == 0 => {
                if let Some(offset) = chars[i + 1..].iter().position(|&(_, c)| c == '>') {
                    let close = i + 1 + offset;
                    let end = chars[close].0 + '>'.len_utf8();
                    events.push(Rewrite::removed(&text[pos..end], "ANGLE_SPAN_REMOVED"));
                    i = close + 1;
                    continue;
                }
                // unclosed span: keep the character
            }
            _ => {}
        }
        out.push(ch);
        i += 1;
    }

    Rewritten { text: squash_spaces(&out), events }
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
    fn removes_span_outside_blocks() {
        let out = run("dijo <~inaudible> algo");
        assert_eq!(out.text, "dijo algo");
        assert_eq!(out.events[0].original, "<~inaudible>");
    }

    #[test]
    fn keeps_span_inside_bracket_region() {
        let out = run("antes [nota <x> nota] después");
        assert_eq!(out.text, "antes [nota <x> nota] después");
        assert!(out.events.is_empty());
    }

    #[test]
    fn unclosed_angle_is_left() {
        let out = run("queda <abierto para siempre");
        assert_eq!(out.text, "queda <abierto para siempre");
        assert!(out.events.is_empty());
    }
}
