//! Tag emphasis and prompt assembly.
//!
//! The assembler is the last stage of every enhancer: wrap each resolved tag
//! according to the requested emphasis level, then join the wrapped tags onto
//! the base prompt. Tag order is an observable contract: tags are emitted in
//! the order their option categories were resolved, never sorted.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Bracket emphasis applied to each generated tag.
///
/// `medium` leaves the tag untouched; `low` wraps one parenthesis pair,
/// `high` two and `very_high` three, following the prompt-weighting
/// convention of the downstream image models. Values outside this set are a
/// configuration error and are rejected when parsing, not guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmphasisLevel {
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

impl EmphasisLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EmphasisLevel::Low => "low",
            EmphasisLevel::Medium => "medium",
            EmphasisLevel::High => "high",
            EmphasisLevel::VeryHigh => "very_high",
        }
    }

    fn depth(self) -> usize {
        match self {
            EmphasisLevel::Medium => 0,
            EmphasisLevel::Low => 1,
            EmphasisLevel::High => 2,
            EmphasisLevel::VeryHigh => 3,
        }
    }
}

impl fmt::Display for EmphasisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown emphasis level '{0}'")]
pub struct UnknownEmphasisLevel(pub String);

impl FromStr for EmphasisLevel {
    type Err = UnknownEmphasisLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" => Ok(EmphasisLevel::Low),
            "medium" => Ok(EmphasisLevel::Medium),
            "high" => Ok(EmphasisLevel::High),
            "very_high" => Ok(EmphasisLevel::VeryHigh),
            other => Err(UnknownEmphasisLevel(other.to_string())),
        }
    }
}

/// Wraps `tag` in as many parenthesis pairs as `level` calls for.
pub fn apply_emphasis(tag: &str, level: EmphasisLevel) -> String {
    let depth = level.depth();
    if depth == 0 {
        return tag.to_string();
    }
    let mut wrapped = String::with_capacity(tag.len() + depth * 2);
    for _ in 0..depth {
        wrapped.push('(');
    }
    wrapped.push_str(tag);
    for _ in 0..depth {
        wrapped.push(')');
    }
    wrapped
}

pub fn emphasize_all(tags: &[String], level: EmphasisLevel) -> Vec<String> {
    tags.iter().map(|tag| apply_emphasis(tag, level)).collect()
}

/// Appends the wrapped tags to the base prompt, comma separated. An empty
/// tag list returns the base prompt unchanged, with no trailing separator.
pub fn join_prompt(base_prompt: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        return base_prompt.to_string();
    }
    format!("{}, {}", base_prompt, tags.join(", "))
}
