//! Provenance log.
//!
//! Every atomic content rewrite is recorded as one append-only row. The export
//! is semicolon-delimited, UTF-8 with a byte-order mark so spreadsheet tools
//! pick the encoding up, with rows sorted by (file, utterance, line, rule).

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::PipelineError;
use crate::turn::Role;

/// One logged rewrite. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvent {
    pub file_id: String,
    pub utterance_id: String,
    pub line_number: usize,
    pub speaker: String,
    pub role: Role,
    pub rule_id: u8,
    pub phenomenon: &'static str,
    pub form_original: String,
    pub form_resulting: String,
    pub action: &'static str,
    pub context: String,
}

const HEADER: &str = "file_id;utterance_id;line_number;speaker;role;rule_id;phenomenon;form_original;form_resulting;action;context";

/// Sort rows into the canonical export order.
pub fn sort_rows(rows: &mut [RuleEvent]) {
    rows.sort_by(|a, b| {
        (&a.file_id, &a.utterance_id, a.line_number, a.rule_id)
            .cmp(&(&b.file_id, &b.utterance_id, b.line_number, b.rule_id))
    });
}

/// Write the full log to `path`.
pub fn write_log(path: &Path, rows: &[RuleEvent]) -> Result<(), PipelineError> {
    let mut out = String::with_capacity(rows.len() * 64 + 128);
    out.push('\u{feff}');
    out.push_str(HEADER);
    out.push('\n');
    for row in rows {
        let fields = [
            field(&row.file_id),
            field(&row.utterance_id),
            field_owned(row.line_number.to_string()),
            field(&row.speaker),
            field(row.role.as_str()),
            field_owned(row.rule_id.to_string()),
            field(row.phenomenon),
            field(&row.form_original),
            field(&row.form_resulting),
            field(row.action),
            field(&row.context),
        ];
        out.push_str(&fields.join(";"));
        out.push('\n');
    }
    fs::write(path, out).map_err(|source| PipelineError::Write { path: path.to_path_buf(), source })
}

fn field(value: &str) -> Cow<'_, str> {
    if value.contains(';') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn field_owned(value: String) -> Cow<'static, str> {
    Cow::Owned(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(file: &str, ud: &str, rule: u8) -> RuleEvent {
        RuleEvent {
            file_id: file.to_string(),
            utterance_id: ud.to_string(),
            line_number: 1,
            speaker: "E1".to_string(),
            role: Role::Interviewer,
            rule_id: rule,
            phenomenon: "test",
            form_original: "a;b".to_string(),
            form_resulting: String::new(),
            action: "REMOVED",
            context: "a;b c".to_string(),
        }
    }

    #[test]
    fn sorted_export_with_bom_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut rows = vec![row("b.txt", "UD00001", 7), row("a.txt", "UD00002", 2), row("a.txt", "UD00001", 5)];
        sort_rows(&mut rows);
        write_log(&path, &rows).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with('\u{feff}'));
        let lines: Vec<&str> = written.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("a.txt;UD00001"));
        assert!(lines[3].starts_with("b.txt"));
        assert!(lines[1].contains("\"a;b\""));
    }
}
