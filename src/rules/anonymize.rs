//! Rule 13: anonymization of the bare token `x`.
//!
//! Transcribers redact names to a lone `x`. A standalone `x` (no word
//! character on either side) becomes the anonymization tag; `x` inside a
//! longer word is just a letter.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::engine::spans::ProtectedSpans;
use crate::rules::{char_at, char_before, is_word_char};

pub(crate) const ANONYMIZED: &str = "⟦ANON_X⟧";

pub(crate) fn rule() -> Rule {
    Rule { id: 13, phenomenon: "anonymized name", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let spans = ProtectedSpans::scan_blocks(text);
    let mut events = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (pos, ch) in text.char_indices() {
        if ch != 'x' || spans.contains(pos) {
            continue;
        }
        let before = char_before(text, pos).map(is_word_char).unwrap_or(false);
        let after = char_at(text, pos + ch.len_utf8()).map(is_word_char).unwrap_or(false);
        if before || after {
            continue;
        }
        out.push_str(&text[last..pos]);
        out.push_str(ANONYMIZED);
        events.push(Rewrite::replaced("x", ANONYMIZED, "TOKEN_ANONYMIZED"));
        last = pos + ch.len_utf8();
    }
    out.push_str(&text[last..]);

    Rewritten { text: out, events }
}
