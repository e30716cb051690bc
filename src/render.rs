//! Output line templating.
//!
//! Templates are plain text with `{placeholder}` fields substituted per
//! repository. The template is parsed and validated once before the scan
//! starts; an unknown placeholder is a configuration error, not a
//! per-repository failure.

use std::fmt::Write;

use crate::error::{Result, ScanError};
use crate::git::status::{ModFlag, RepoStatus};

/// Default output format, e.g. `[ M   S →] ./api (git@host:api.git » main)`
pub const DEFAULT_FORMAT: &str = "[{U}{A}{M}{R}{D}{S} {state}] {path} ({origin}{branch})";

const ORIGIN_SEPARATOR: &str = " » ";

/// A recognized template field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    /// One-letter marker for a modification flag, blank when unset
    Flag(ModFlag),
    /// Sync-state glyph
    State,
    Path,
    Branch,
    /// Bare push URL, empty when no remote is configured
    Remote,
    /// Push URL plus separator, collapsing to nothing without a remote
    Origin,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "U" => Some(Field::Flag(ModFlag::Unknown)),
            "A" => Some(Field::Flag(ModFlag::Added)),
            "M" => Some(Field::Flag(ModFlag::Modified)),
            "R" => Some(Field::Flag(ModFlag::Removed)),
            "D" => Some(Field::Flag(ModFlag::Deleted)),
            "S" => Some(Field::Flag(ModFlag::Stashed)),
            "state" => Some(Field::State),
            "path" => Some(Field::Path),
            "branch" => Some(Field::Branch),
            "remote" => Some(Field::Remote),
            "origin" => Some(Field::Origin),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed, validated output template
#[derive(Debug)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a format string, rejecting unknown placeholders and
    /// unterminated braces up front.
    pub fn parse(format: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => name.push(c),
                    None => {
                        return Err(ScanError::config(format!(
                            "unterminated placeholder '{{{name}'"
                        )))
                    }
                }
            }

            let field = Field::from_name(&name)
                .ok_or_else(|| ScanError::config(format!("unknown placeholder '{{{name}}}'")))?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(field));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template { segments })
    }

    /// Renders one output line for a repository status.
    pub fn render(&self, status: &RepoStatus) -> String {
        let mut line = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Field(Field::Flag(flag)) => {
                    if status.modifications.contains(*flag) {
                        line.push(flag.letter());
                    } else {
                        line.push(' ');
                    }
                }
                Segment::Field(Field::State) => line.push_str(status.sync.glyph()),
                Segment::Field(Field::Path) => {
                    let _ = write!(line, "{}", status.path.display());
                }
                Segment::Field(Field::Branch) => line.push_str(&status.branch),
                Segment::Field(Field::Remote) => line.push_str(&status.remote_url),
                Segment::Field(Field::Origin) => {
                    if !status.remote_url.is_empty() {
                        line.push_str(&status.remote_url);
                        line.push_str(ORIGIN_SEPARATOR);
                    }
                }
            }
        }

        line
    }
}
