//! Protected-span scanning.
//!
//! Rules that must not alter delimited material ask for the byte ranges of
//! `[...]`, `{...}`, `(...)` and `<...>` regions in the current text and skip
//! any match overlapping one. Spans are recomputed per rule invocation because
//! earlier rules remove them; nothing here is persisted.
//!
//! Matching is fastest-closing within a kind: an opener pairs with the nearest
//! closer, so nesting of the same kind is handled by the callers that iterate
//! removal layer-by-layer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bracket,
    Brace,
    Paren,
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedSpan {
    /// Start byte index (inclusive), covering the opening delimiter.
    pub start: usize,
    /// End byte index (exclusive), covering the closing delimiter.
    pub end: usize,
    pub kind: SpanKind,
}

#[derive(Debug, Clone, Default)]
pub struct ProtectedSpans {
    spans: Vec<ProtectedSpan>,
}

impl ProtectedSpans {
    /// Scan for all four delimiter kinds.
    pub fn scan(text: &str) -> Self {
        let mut spans = Self::scan_blocks(text);
        spans.collect_kind(text, regex!(r"\([^)]*\)"), SpanKind::Paren);
        spans.collect_kind(text, regex!(r"<[^>]*>"), SpanKind::Angle);
        spans.spans.sort_by_key(|s| (s.start, s.end));
        spans
    }

    /// Scan only `[...]` and `{...}`, the regions the generic token-level
    /// rules treat as untouchable.
    pub fn scan_blocks(text: &str) -> Self {
        let mut spans = ProtectedSpans::default();
        spans.collect_kind(text, regex!(r"\[[^\]]*\]"), SpanKind::Bracket);
        spans.collect_kind(text, regex!(r"\{[^}]*\}"), SpanKind::Brace);
        spans.spans.sort_by_key(|s| (s.start, s.end));
        spans
    }

    fn collect_kind(&mut self, text: &str, re: &regex::Regex, kind: SpanKind) {
        for m in re.find_iter(text) {
            self.spans.push(ProtectedSpan { start: m.start(), end: m.end(), kind });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProtectedSpan> {
        self.spans.iter()
    }

    /// True when the byte position lies inside any span.
    pub fn contains(&self, pos: usize) -> bool {
        self.spans.iter().any(|s| s.start <= pos && pos < s.end)
    }

    /// True when `[start, end)` overlaps any span.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.spans.iter().any(|s| start < s.end && s.start < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_all_kinds() {
        let spans = ProtectedSpans::scan("a [b] c {d} e (f) g <h>");
        let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SpanKind::Bracket, SpanKind::Brace, SpanKind::Paren, SpanKind::Angle]
        );
    }

    #[test]
    fn block_scan_ignores_parens() {
        let spans = ProtectedSpans::scan_blocks("a (b) [c]");
        assert_eq!(spans.iter().count(), 1);
        assert!(spans.contains(6));
        assert!(!spans.contains(2));
    }

    #[test]
    fn unmatched_openers_yield_no_span() {
        assert!(ProtectedSpans::scan("a [b sin cierre").is_empty());
        assert!(ProtectedSpans::scan("a <b sin cierre").is_empty());
    }

    #[test]
    fn fastest_closing_match() {
        // "(a (b)" pairs the outer opener with the first closer.
        let spans = ProtectedSpans::scan("(a (b) c)");
        let first = spans.iter().next().unwrap();
        assert_eq!((first.start, first.end), (0, 6));
    }

    #[test]
    fn overlap_queries() {
        let spans = ProtectedSpans::scan_blocks("xx [abc] yy");
        assert!(spans.overlaps(4, 5));
        assert!(spans.overlaps(0, 4));
        assert!(!spans.overlaps(0, 3));
        assert!(!spans.overlaps(8, 10));
    }
}
