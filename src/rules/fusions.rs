//! Rule 12: known mis-tokenized fusions.
//!
//! A closed list of whole-word fusions the earlier passes are known to leave
//! behind.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::engine::spans::ProtectedSpans;

pub(crate) fn rule() -> Rule {
    Rule { id: 12, phenomenon: "mis-tokenized fusion", apply: Box::new(apply) }
}

static FUSIONS: &[(&str, &str)] = &[("sese", "se se"), ("síes", "sí es"), ("eses", "es es")];

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();
    let mut out = text.to_string();

    for (fused, split) in FUSIONS {
        let spans = ProtectedSpans::scan_blocks(&out);
        let source = out;
        let mut rewritten = String::with_capacity(source.len());
        let mut last = 0;
        for m in regex!(r"\b\w+\b").find_iter(&source) {
            if m.as_str() != *fused || spans.overlaps(m.start(), m.end()) {
                continue;
            }
            rewritten.push_str(&source[last..m.start()]);
            rewritten.push_str(split);
            events.push(Rewrite::replaced(*fused, *split, "FUSION_SPLIT"));
            last = m.end();
        }
        rewritten.push_str(&source[last..]);
        out = rewritten;
    }

    Rewritten { text: out, events }
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
    fn splits_whole_words_only() {
        assert_eq!(run("y sese fue").text, "y se se fue");
        assert_eq!(run("los sesenta años").text, "los sesenta años");
    }

    #[test]
    fn all_entries() {
        assert_eq!(run("síes claro").text, "sí es claro");
        assert_eq!(run("eses que sí").text, "es es que sí");
    }
}
