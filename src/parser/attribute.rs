//! Attribute line classification
//!
//! An attribute line has the shape `<alias>: <value>`, optionally behind a
//! list marker. The alias must be exactly one of the known spellings (any
//! case); anything else is description text, never an error.

use super::markup::strip_markup;
use crate::domain::Task;

/// Task field an attribute line sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Env,
    DependsOn,
    Inputs,
    Dir,
}

/// Accepted spellings, lowercase
const ALIASES: &[(&str, Attribute)] = &[
    ("env", Attribute::Env),
    ("environment", Attribute::Env),
    ("req", Attribute::DependsOn),
    ("requires", Attribute::DependsOn),
    ("input", Attribute::Inputs),
    ("inputs", Attribute::Inputs),
    ("dir", Attribute::Dir),
    ("directory", Attribute::Dir),
];

impl Attribute {
    /// Resolves an alias, ignoring case
    pub fn from_alias(alias: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(alias))
            .map(|(_, attribute)| *attribute)
    }

    /// Canonical field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Env => "env",
            Attribute::DependsOn => "depends_on",
            Attribute::Inputs => "inputs",
            Attribute::Dir => "dir",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized attribute line: which field, and its normalized value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub attribute: Attribute,
    pub value: &'a str,
}

impl Assignment<'_> {
    /// Applies the value to a task.
    ///
    /// List fields accumulate, empty values included; `dir` is overwritten.
    pub fn apply(&self, task: &mut Task) {
        let list = match self.attribute {
            Attribute::Dir => {
                task.dir = self.value.to_string();
                return;
            }
            Attribute::Env => &mut task.env,
            Attribute::DependsOn => &mut task.depends_on,
            Attribute::Inputs => &mut task.inputs,
        };

        list.push(self.value.to_string());
    }
}

/// Classifies a single line, returning `None` when it is not an attribute
pub fn classify(line: &str) -> Option<Assignment<'_>> {
    let line = strip_list_marker(line.trim());
    let (key, raw) = line.split_once(':')?;
    let attribute = Attribute::from_alias(key.trim())?;

    Some(Assignment {
        attribute,
        value: strip_markup(raw),
    })
}

/// Removes a leading `- `, `* ` or `+ ` bullet
fn strip_list_marker(line: &str) -> &str {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }
    line
}
