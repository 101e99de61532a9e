//! YAML frontmatter codec for markdown resources.
//!
//! A document may open with a header block:
//!
//! ```text
//! ---
//! name: testing
//! description: Test conventions
//! globs: ["*.ts"]
//! ---
//! # Body
//! ```
//!
//! The header is an ordered YAML mapping; the body is everything after the
//! closing delimiter, trimmed. Documents without a header parse to an empty
//! mapping and the whole text as body.

use serde_yaml::{Mapping, Value};

/// Parsed header: an ordered mapping of keys to arbitrary YAML values.
pub type Header = Mapping;

/// Errors raised while decoding or encoding a header block.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// The header block is not valid YAML.
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
    /// The header block is valid YAML but not a mapping.
    #[error("frontmatter must be a mapping of keys to values")]
    NotAMapping,
}

/// A document split into header and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Header fields; empty when the document has no header block.
    pub header: Header,
    /// Content after the header, trimmed.
    pub body: String,
}

/// Split content into the raw header YAML and the remaining body.
///
/// The opening delimiter must be the first non-blank line; the header ends at
/// the next line consisting of `---`. Without both delimiters the whole
/// content is body.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let doc = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = doc.trim_start();

    let mut lines = rest.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, content);
    };
    if first.trim_end() != "---" || !first.ends_with('\n') {
        return (None, content);
    }

    let after_open = &rest[first.len()..];
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

fn decode_header(yaml: &str) -> Result<Header, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Header::new());
    }
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Null => Ok(Header::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Parse a document into header and trimmed body.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterError> {
    let (raw, body) = split_frontmatter(content);
    let header = match raw {
        Some(yaml) => decode_header(yaml)?,
        None => Header::new(),
    };
    Ok(ParsedDocument {
        header,
        body: body.trim().to_string(),
    })
}

/// Serialize a header and body back into a document.
///
/// An empty header still emits an empty delimiter pair so a body that itself
/// starts with `---` is never mistaken for a header on the next parse.
pub fn serialize(header: &Header, body: &str) -> Result<String, FrontmatterError> {
    let mut out = String::from("---\n");
    if !header.is_empty() {
        out.push_str(&serde_yaml::to_string(header)?);
    }
    out.push_str("---\n");
    let body = body.trim();
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    Ok(out)
}

/// Extract only the header of a document.
pub fn extract_header(content: &str) -> Result<Header, FrontmatterError> {
    parse(content).map(|doc| doc.header)
}

/// Returns true when the document has a non-empty, parseable header.
pub fn has_header(content: &str) -> bool {
    extract_header(content).is_ok_and(|header| !header.is_empty())
}

/// Typed view over a resource header.
///
/// Recognized fields are lifted out; every other key (and any recognized key
/// whose value has an unexpected type) stays in `extra` so that
/// [`ResourceHeader::to_header`] never drops data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceHeader {
    pub name: Option<String>,
    pub description: Option<String>,
    pub globs: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub color: Option<String>,
    pub mcp_integrations: Option<Vec<String>>,
    pub extra: Header,
}

impl ResourceHeader {
    /// Header keys with a typed field.
    pub const KNOWN_FIELDS: [&'static str; 6] = [
        "name",
        "description",
        "globs",
        "tools",
        "color",
        "mcp_integrations",
    ];

    /// Builds the typed view. Never fails: missing or mistyped fields are
    /// left as `None` and the raw value is kept in `extra`.
    pub fn from_header(header: &Header) -> Self {
        let mut typed = ResourceHeader::default();
        for (key, value) in header {
            let lifted = match key.as_str() {
                Some("name") => lift_string(value).map(|v| typed.name = Some(v)),
                Some("description") => lift_string(value).map(|v| typed.description = Some(v)),
                Some("color") => lift_string(value).map(|v| typed.color = Some(v)),
                Some("globs") => lift_list(value).map(|v| typed.globs = Some(v)),
                Some("tools") => lift_list(value).map(|v| typed.tools = Some(v)),
                Some("mcp_integrations") => {
                    lift_list(value).map(|v| typed.mcp_integrations = Some(v))
                }
                _ => None,
            };
            if lifted.is_none() {
                typed.extra.insert(key.clone(), value.clone());
            }
        }
        typed
    }

    /// Re-emits the header: recognized fields first, then extras in their
    /// original order.
    pub fn to_header(&self) -> Header {
        let mut header = Header::new();
        let mut put_str = |key: &str, value: &Option<String>| {
            if let Some(v) = value {
                header.insert(Value::from(key), Value::from(v.as_str()));
            }
        };
        put_str("name", &self.name);
        put_str("description", &self.description);
        for (key, value) in [
            ("globs", &self.globs),
            ("tools", &self.tools),
            ("mcp_integrations", &self.mcp_integrations),
        ] {
            if let Some(list) = value {
                let seq = list.iter().map(|s| Value::from(s.as_str())).collect();
                header.insert(Value::from(key), Value::Sequence(seq));
            }
        }
        if let Some(color) = &self.color {
            header.insert(Value::from("color"), Value::from(color.as_str()));
        }
        for (key, value) in &self.extra {
            header.insert(key.clone(), value.clone());
        }
        header
    }
}

fn lift_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn lift_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_sequence()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
