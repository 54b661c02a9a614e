//! Turn parsing.
//!
//! A transcript line opens a turn when it starts with a speaker tag: one or
//! more role codes (`INF`, `ENT`, `E`, `I`, `C`), optionally numbered or
//! suffixed (`E1`, `INF.b`), optionally combined with `/` (`I1/I2`), followed
//! by `:`, `=` or whitespace. Lines without a recognizable tag are either
//! appended to the open turn as continuations or discarded when no turn is
//! open. Parsing is pure; the continuation-vs-discard policy lives in
//! [`parse_turns`].

use regex::Regex;

/// Speaker role derived from the first letters of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Interviewer,
    Informant,
}

impl Role {
    pub fn from_label(label: &str) -> Role {
        let upper = label.to_uppercase();
        if upper.starts_with('E') { Role::Interviewer } else { Role::Informant }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Interviewer => "INTERVIEWER",
            Role::Informant => "INFORMANT",
        }
    }
}

/// One speaker's uninterrupted contribution.
///
/// The label is never mutated by any rule; it round-trips byte-identical from
/// input to every output the pipeline writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub label: String,
    pub role: Role,
    pub content: String,
}

fn tag_regex() -> &'static Regex {
    // The separator is mandatory: a bare `[:=]?` would let prose like
    // "En la casa" parse as speaker "E" with content "n la casa".
    regex!(
        r"^\s*(?P<label>(?:INF|ENT|E|I|C)(?:[0-9]+|\.[A-Za-z0-9]+)*(?:/(?:INF|ENT|E|I|C)(?:[0-9]+|\.[A-Za-z0-9]+)*)*)(?:\s*[:=]\s*|\s+|\s*$)(?P<rest>.*)$"
    )
}

/// Match a leading speaker tag. Returns `(label, role, remainder)`, or `None`
/// when the line carries no recognizable tag.
pub fn parse_line(line: &str) -> Option<(String, Role, String)> {
    let caps = tag_regex().captures(line)?;
    let label = caps.name("label")?.as_str().to_string();
    let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("").to_string();
    let role = Role::from_label(&label);
    Some((label, role, rest))
}

/// Parse a whole transcript into turns.
///
/// Blank lines are skipped. Unlabeled lines extend the open turn; with no open
/// turn they are dropped. Continuation lines are joined with single spaces.
pub fn parse_turns(text: &str) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    let mut current: Option<(String, Role, Vec<String>)> = None;

    let flush = |current: &mut Option<(String, Role, Vec<String>)>, turns: &mut Vec<Turn>| {
        if let Some((label, role, buffer)) = current.take() {
            let content = buffer.join(" ").trim().to_string();
            turns.push(Turn { label, role, content });
        }
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((label, role, rest)) => {
                flush(&mut current, &mut turns);
                let buffer = if rest.trim().is_empty() { Vec::new() } else { vec![rest] };
                current = Some((label, role, buffer));
            }
            None => {
                if let Some((_, _, buffer)) = current.as_mut() {
                    buffer.push(line.trim().to_string());
                }
            }
        }
    }
    flush(&mut current, &mut turns);
    turns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_labels() {
        let (label, role, rest) = parse_line("E1: bueno pues sí").unwrap();
        assert_eq!(label, "E1");
        assert_eq!(role, Role::Interviewer);
        assert_eq!(rest, "bueno pues sí");
    }

    #[test]
    fn informant_roles() {
        assert_eq!(parse_line("I2: hola").unwrap().1, Role::Informant);
        assert_eq!(parse_line("INF: hola").unwrap().1, Role::Informant);
        assert_eq!(parse_line("ENT: hola").unwrap().1, Role::Interviewer);
        assert_eq!(parse_line("C1: hola").unwrap().1, Role::Informant);
    }

    #[test]
    fn combined_and_suffixed_labels() {
        assert_eq!(parse_line("I1/I2: a la vez").unwrap().0, "I1/I2");
        assert_eq!(parse_line("INF.b: sí").unwrap().0, "INF.b");
    }

    #[test]
    fn equals_and_whitespace_separators() {
        assert_eq!(parse_line("E1= claro").unwrap().2, "claro");
        assert_eq!(parse_line("E1 claro").unwrap().2, "claro");
    }

    #[test]
    fn prose_starting_with_role_letter_is_not_a_tag() {
        assert!(parse_line("En la casa de mi madre").is_none());
        assert!(parse_line("Incluso entonces").is_none());
    }

    #[test]
    fn continuations_extend_the_open_turn() {
        let turns = parse_turns("E1: primera parte\nsegunda parte\n\nI1: otra cosa\n");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "primera parte segunda parte");
        assert_eq!(turns[1].content, "otra cosa");
    }

    #[test]
    fn orphan_lines_are_discarded() {
        let turns = parse_turns("sin etiqueta\nE1: contenido\n");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "contenido");
    }
}
