//! Tool output sanitizer.
//!
//! Tool results reach the adapter as opaque strings that may have passed
//! through several JSON encoding layers and may embed a provenance-tagged
//! region such as `<untrusted-data-ID>...</untrusted-data-ID>`. The sanitizer
//! recovers the JSON payload and pretty-prints it, falling back to the best
//! plain text available at each stage. It never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Tag prefix used by MCP servers to mark extracted payload regions.
pub const DEFAULT_TAG: &str = "untrusted-data";

static DEFAULT_SANITIZER: LazyLock<Sanitizer> =
    LazyLock::new(|| Sanitizer::new(DEFAULT_TAG).expect("default tag is a valid pattern"));

/// Sanitize a raw tool output using the default delimiter tag.
pub fn sanitize(raw: &str) -> String {
    DEFAULT_SANITIZER.sanitize(raw)
}

/// Sanitizer bound to one delimiter tag prefix.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    tag: String,
    opening: Regex,
}

impl Sanitizer {
    /// Build a sanitizer for delimiters of the form `<{tag}-ID>`.
    pub fn new(tag: &str) -> Result<Self, regex::Error> {
        let opening = Regex::new(&format!("<{}-([^>]+)>", regex::escape(tag)))?;
        Ok(Self {
            tag: tag.to_string(),
            opening,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Recover and pretty-print the JSON payload of a tool output.
    ///
    /// Precedence: outer JSON layer, delimited region, direct parse, raw text.
    pub fn sanitize(&self, raw: &str) -> String {
        let working = match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(inner)) => inner,
            Ok(value) => return pretty(&value),
            Err(_) => raw.to_string(),
        };

        if let Some(interior) = self.delimited_region(&working) {
            let interior = interior.trim();
            let candidate = strip_to_json_bounds(interior);
            return match serde_json::from_str::<Value>(candidate) {
                Ok(value) => pretty(&value),
                Err(_) if candidate.is_empty() => interior.to_string(),
                Err(_) => candidate.to_string(),
            };
        }

        match serde_json::from_str::<Value>(&working) {
            Ok(value) => pretty(&value),
            Err(_) => working,
        }
    }

    /// Interior of the first `<tag-ID>...</tag-ID>` pair, if both delimiters exist.
    fn delimited_region<'a>(&self, text: &'a str) -> Option<&'a str> {
        let captures = self.opening.captures(text)?;
        let open = captures.get(0)?;
        let id = captures.get(1)?.as_str();

        let closing = format!("</{}-{}>", self.tag, id);
        let rest = &text[open.end()..];
        let end = rest.find(&closing)?;
        Some(&rest[..end])
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        DEFAULT_SANITIZER.clone()
    }
}

/// Drop prose before the first `[`/`{` and after the last `]`/`}`.
fn strip_to_json_bounds(text: &str) -> &str {
    let start = text.find(['[', '{']).unwrap_or(text.len());
    let body = &text[start..];
    match body.rfind([']', '}']) {
        Some(last) => body[..=last].trim(),
        None => body.trim(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
