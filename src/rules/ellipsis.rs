//! Rule 3: ellipses.
//!
//! Runs of three or more dots (spaces allowed between them) and the single
//! ellipsis glyph are hesitation marks, not punctuation. Deleting one that
//! sits between two word characters would fuse the words, so that case gets a
//! space instead.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::rules::{char_at, char_before, is_word_char, squash_spaces};

pub(crate) fn rule() -> Rule {
    Rule { id: 3, phenomenon: "ellipsis", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in regex!(r"(?:\.\s*){3,}|…").find_iter(text) {
        let left_word = char_before(text, m.start()).map(is_word_char).unwrap_or(false);
        let right_word = char_at(text, m.end()).map(is_word_char).unwrap_or(false);
        out.push_str(&text[last..m.start()]);
        if left_word && right_word {
            events.push(Rewrite::replaced(m.as_str(), " ", "ELLIPSIS_SPACED"));
            out.push(' ');
        } else {
            events.push(Rewrite::removed(m.as_str(), "ELLIPSIS_REMOVED"));
        }
        last = m.end();
    }
    out.push_str(&text[last..]);

    Rewritten { text: squash_spaces(&out), events }
}
