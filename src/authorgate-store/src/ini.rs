//! Line-preserving model of an INI-like file.
//!
//! Only section/key-value semantics are understood. Comments, blank lines and
//! entries that are never touched are written back exactly as they were read,
//! which keeps unrelated parts of a `.git/config` intact.
//!
//! Section names and keys are compared case-sensitively.

use std::fmt;

use indexmap::IndexMap;

use crate::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Blank line or comment.
    Raw(String),
    Entry {
        key: String,
        value: String,
        /// Original text, dropped once the value is rewritten.
        raw: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    header: Option<String>,
    lines: Vec<Line>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            header: None,
            lines: Vec::new(),
        }
    }

    /// Index of the last entry for `key`; later duplicates win, as in git.
    fn position(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .rposition(|line| matches!(line, Line::Entry { key: k, .. } if k == key))
    }
}

/// Parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl IniDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from text.
    ///
    /// A `key = value` line before the first section header is an error;
    /// any other line is accepted.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
                let name = trimmed[1..trimmed.len() - 1].trim();
                doc.sections.push(Section {
                    name: name.to_string(),
                    header: Some(line.to_string()),
                    lines: Vec::new(),
                });
                continue;
            }

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                match doc.sections.last_mut() {
                    Some(section) => section.lines.push(Line::Raw(line.to_string())),
                    None => doc.preamble.push(line.to_string()),
                }
                continue;
            }

            let Some(section) = doc.sections.last_mut() else {
                return Err(StoreError::Malformed {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };

            // A bare key (git's boolean shorthand) is kept with an empty value.
            let (key, value) = match trimmed.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (trimmed, ""),
            };
            section.lines.push(Line::Entry {
                key: key.to_string(),
                value: value.to_string(),
                raw: Some(line.to_string()),
            });
        }

        Ok(doc)
    }

    /// Check whether a section exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Append an empty section unless one with that name already exists.
    pub fn add_section(&mut self, name: &str) {
        if !self.has_section(name) {
            self.sections.push(Section::new(name));
        }
    }

    /// Check whether `key` is set in `section`.
    pub fn has(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    /// Look up a value. Repeated sections and keys resolve to the last one.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .rev()
            .filter(|s| s.name == section)
            .find_map(|s| {
                s.position(key).and_then(|pos| match &s.lines[pos] {
                    Line::Entry { value, .. } => Some(value.as_str()),
                    Line::Raw(_) => None,
                })
            })
    }

    /// Set a value, rewriting the existing entry in place or appending it to
    /// the last section with that name. The section is created if needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let existing = self
            .sections
            .iter_mut()
            .rev()
            .filter(|s| s.name == section)
            .find_map(|s| match s.position(key) {
                Some(pos) => s.lines.get_mut(pos),
                None => None,
            });

        if let Some(Line::Entry {
            value: current,
            raw,
            ..
        }) = existing
        {
            if current.as_str() != value {
                *current = value.to_string();
                *raw = None;
            }
            return;
        }

        self.add_section(section);
        if let Some(target) = self.sections.iter_mut().rev().find(|s| s.name == section) {
            // Keep trailing blank lines and comments after the new entry.
            let insert_at = target
                .lines
                .iter()
                .rposition(|line| matches!(line, Line::Entry { .. }))
                .map_or(0, |pos| pos + 1);
            target.lines.insert(
                insert_at,
                Line::Entry {
                    key: key.to_string(),
                    value: value.to_string(),
                    raw: None,
                },
            );
        }
    }

    /// All entries of a section in file order, later duplicates winning.
    pub fn entries(&self, section: &str) -> IndexMap<String, String> {
        let mut entries = IndexMap::new();
        for s in self.sections.iter().filter(|s| s.name == section) {
            for line in &s.lines {
                if let Line::Entry { key, value, .. } = line {
                    entries.insert(key.clone(), value.clone());
                }
            }
        }
        entries
    }
}

/// Whether `key` reads back unchanged after being written as an entry.
///
/// Keys are trimmed on read and split at the first `=`, and a line starting
/// with `#`, `;` or `[` is not an entry. Spaces inside a key are preserved
/// here, though git itself refuses such names in a `.git/config`.
pub fn is_storable_key(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.contains(['=', '\n', '\r'])
        && !key.starts_with(['#', ';', '['])
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.preamble {
            writeln!(f, "{line}")?;
        }
        for section in &self.sections {
            match &section.header {
                Some(header) => writeln!(f, "{header}")?,
                None => writeln!(f, "[{}]", section.name)?,
            }
            for line in &section.lines {
                match line {
                    Line::Raw(raw) | Line::Entry { raw: Some(raw), .. } => writeln!(f, "{raw}")?,
                    Line::Entry {
                        key,
                        value,
                        raw: None,
                    } => writeln!(f, "\t{key} = {value}")?,
                }
            }
        }
        Ok(())
    }
}
