//! Input payload shape.
//!
//! Article detail payloads arrive as JSON from the fetch collaborator. Only
//! the fields the parser reads are modelled; anything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One article detail payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePayload {
    /// Article identifier.
    pub id: i64,

    /// Article title.
    pub title: String,

    /// Release instant as epoch seconds.
    #[serde(default)]
    pub released_time: Option<i64>,

    /// Article body markup.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,

    /// Pre-segmented body blocks, present in newer API responses.
    #[serde(default)]
    pub body_extends: Option<Vec<BodyBlock>>,
}

/// One entry of the `body_extends` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyBlock {
    /// Block heading.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Block markup, consumed verbatim.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

impl ArticlePayload {
    /// Decodes a payload from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPayload`] when `id` or `title` is missing or
    /// any field has an unexpected type.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::MalformedPayload(e.to_string()))
    }

    /// Number of `body_extends` entries (zero when the field is absent).
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.body_extends.as_ref().map_or(0, Vec::len)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
