//! Placeholder vault.
//!
//! Reversibly hides literal exact-match substrings behind opaque tokens so a
//! later generic rewrite pass cannot corrupt them. Keys are substituted
//! longest-first to avoid a shorter key shadowing a longer one. The mapping
//! lives for one rule invocation: `restore(protect(text)) == text`.

const TOKEN_PREFIX: &str = "⟦FIX_";
const TOKEN_SUFFIX: &str = "⟧";

#[derive(Debug, Clone, Default)]
pub struct Vault {
    /// `(token, original)` pairs in substitution order.
    entries: Vec<(String, String)>,
}

impl Vault {
    /// Replace every literal occurrence of any key with a unique opaque token.
    pub fn protect(text: &str, keys: &[&str]) -> (String, Vault) {
        let mut ordered: Vec<&str> = keys.iter().copied().filter(|k| !k.is_empty()).collect();
        ordered.sort_by_key(|k| std::cmp::Reverse(k.len()));

        let mut out = text.to_string();
        let mut vault = Vault::default();
        for key in ordered {
            let mut search = 0;
            while let Some(rel) = out[search..].find(key) {
                let pos = search + rel;
                let token = format!("{TOKEN_PREFIX}{}{TOKEN_SUFFIX}", vault.entries.len());
                out.replace_range(pos..pos + key.len(), &token);
                search = pos + token.len();
                vault.entries.push((token, key.to_string()));
            }
        }
        (out, vault)
    }

    /// Reverse the substitution exactly.
    pub fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, original) in &self.entries {
            out = out.replace(token, original);
        }
        out
    }

    /// Keys that were actually found and hidden, in substitution order.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, original)| original.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
