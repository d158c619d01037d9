//! The five enhancer nodes. Each follows the same shape: analyze the prompt
//! for context, resolve one tag (or tag list) per option category, then
//! assemble the emphasized tags and a human-readable summary.

pub mod camera;
pub mod color;
pub mod lighting;
pub mod product;
pub mod sizing;

/// Output of an enhancer: the augmented prompt plus a summary of what was
/// applied, one line per resolved category in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancement {
    pub prompt: String,
    pub summary: String,
}

pub(crate) fn push_all(tags: &mut Vec<String>, extra: &[&str]) {
    tags.extend(extra.iter().map(|tag| tag.to_string()));
}

pub(crate) fn push_owned(tags: &mut Vec<String>, extra: &[String]) {
    tags.extend(extra.iter().cloned());
}

pub(crate) fn render_summary(header: &str, parts: &[String]) -> String {
    let mut lines = Vec::with_capacity(parts.len() + 1);
    lines.push(header.to_string());
    for part in parts {
        lines.push(format!("- {part}"));
    }
    lines.join("\n")
}
