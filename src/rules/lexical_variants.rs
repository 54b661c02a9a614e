//! Rule 4: token + bracketed lexical variant.
//!
//! `token [variant]` resolves to the variant only when the two surface forms
//! are plausibly the same word. Similarity is judged on a folded letter
//! skeleton: lowercase, accents stripped, `ll` and `i` both mapped to `y`,
//! everything but letters dropped. Tokens of one or two folded letters need a
//! single shared letter; longer tokens need a shared bigram. Both thresholds
//! are a frozen contract.
//!
//! Recognized meta annotations (laughter, coughs, silence, noise, transcriber
//! notes) are not variants; they stay in place for rule 6.

use crate::Rewrite;
use crate::Rewritten;
use crate::engine::pipeline::{Rule, RuleContext};
use crate::rules::squash_spaces;

pub(crate) fn rule() -> Rule {
    Rule { id: 4, phenomenon: "bracketed lexical variant", apply: Box::new(apply) }
}

fn apply(text: &str, _ctx: &RuleContext) -> Rewritten {
    let mut events = Vec::new();
    let out = regex!(r"\b(\w+)\b\s*:?\s*\[([^\]]+)\]")
        .replace_all(text, |caps: &regex::Captures| {
            let token = &caps[1];
            let variant = caps[2].replace(['<', '~'], "");
            let variant = variant.trim();
            if is_meta_annotation(variant) || !similar_enough(token, variant) {
                return caps[0].to_string();
            }
            events.push(Rewrite::replaced(&caps[0], variant, "VARIANT_RESOLVED"));
            variant.to_string()
        })
        .into_owned();
    Rewritten { text: squash_spaces(&out), events }
}

fn is_meta_annotation(content: &str) -> bool {
    let folded = squash_spaces(&content.trim().to_lowercase());
    if folded.starts_with("n. de t.") {
        return true;
    }
    regex!(r"\b(?:risas|risa|carraspea|tos|tose|silencio|ruidos|ruido|música|timbre)\b")
        .is_match(&folded)
}

fn letter_skeleton(raw: &str) -> String {
    let mut s = raw.to_lowercase();
    for (accented, plain) in
        [("á", "a"), ("é", "e"), ("í", "i"), ("ó", "o"), ("ú", "u"), ("ü", "u")]
    {
        s = s.replace(accented, plain);
    }
    let s = s.replace("ll", "y").replace('i', "y");
    s.chars().filter(|c| c.is_ascii_lowercase() || *c == 'ñ').collect()
}

fn similar_enough(token: &str, variant: &str) -> bool {
    let a = letter_skeleton(token);
    let b = letter_skeleton(variant);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.chars().count() <= 2 {
        return a.chars().any(|c| b.contains(c));
    }
    shares_bigram(&a, &b)
}

fn shares_bigram(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() < 2 || b.len() < 2 {
        return false;
    }
    a.windows(2).any(|wa| b.windows(2).any(|wb| wa == wb))
}
