//! Rule 9: apostrophe contractions.
//!
//! Colloquial contractions are expanded from a literal table (both straight
//! and curly apostrophes appear in the transcripts), checked in table order so
//! the multi-word forms win before their prefixes. The productive case
//! `l'WORD` expands to an article plus the word: a short exception list takes
//! `el`, words in `-a` take `la`, everything else `el`.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::rules::squash_spaces;

pub(crate) fn rule() -> Rule {
    Rule { id: 9, phenomenon: "apostrophe contraction", apply: Box::new(apply) }
}

/// Table order is load-bearing: `pa' el` must be seen before `pa'`.
static CONTRACTIONS: &[(&str, &str)] = &[
    ("pa'l", "para el"),
    ("pa’l", "para el"),
    ("p'al", "para el"),
    ("p’al", "para el"),
    ("pal’", "para el"),
    ("pal'", "para el"),
    ("pa' el", "para el"),
    ("pa’ el", "para el"),
    ("p' al", "para el"),
    ("p’ al", "para el"),
    ("pa' un", "para un"),
    ("pa’ un", "para un"),
    ("pa' que", "para que"),
    ("pa’ que", "para que"),
    ("to'", "todo"),
    ("to’", "todo"),
    ("pa'", "para"),
    ("pa’", "para"),
    ("p’acá", "para acá"),
    ("p’allá", "para allá"),
    ("p’alla", "para allá"),
    ("p’alante", "para adelante"),
    ("l’aspecto", "el aspecto"),
    ("l’azabache", "el azabache"),
];

const MASCULINE_EXCEPTIONS: &[&str] = &["águila", "aguila", "agua"];

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();
    let mut out = text.to_string();

    for (from, to) in CONTRACTIONS {
        let occurrences = out.matches(from).count();
        if occurrences == 0 {
            continue;
        }
        for _ in 0..occurrences {
            events.push(Rewrite::replaced(*from, *to, "CONTRACTION_EXPANDED"));
        }
        out = out.replace(from, to);
    }

    let out = regex!(r"\bl['’]\s*(\w+)")
        .replace_all(&out, |caps: &regex::Captures| {
            let word = &caps[1];
            let lower = word.to_lowercase();
            let article = if MASCULINE_EXCEPTIONS.contains(&lower.as_str()) {
                "el"
            } else if lower.ends_with('a') {
                "la"
            } else {
                "el"
            };
            let expanded = format!("{article} {word}");
            events.push(Rewrite::replaced(&caps[0], expanded.as_str(), "ARTICLE_EXPANDED"));
            expanded
        })
        .into_owned();

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
    fn literal_contractions() {
        assert_eq!(run("voy pa'l pueblo").text, "voy para el pueblo");
        assert_eq!(run("to' el día").text, "todo el día");
        assert_eq!(run("pa' que veas").text, "para que veas");
    }

    #[test]
    fn longest_form_wins_over_prefix() {
        assert_eq!(run("pa' el campo").text, "para el campo");
    }

    #[test]
    fn curly_apostrophes_work() {
        assert_eq!(run("vamos pa’ casa").text, "vamos para casa");
    }

    #[test]
    fn productive_article_expansion() {
        assert_eq!(run("l'arena fina").text, "la arena fina");
        assert_eq!(run("l'invierno frío").text, "el invierno frío");
        assert_eq!(run("l'agua clara").text, "el agua clara");
    }

    #[test]
    fn events_count_occurrences() {
        let out = run("to' esto y to' eso");
        assert_eq!(out.text, "todo esto y todo eso");
        assert_eq!(out.events.len(), 2);
    }
}
