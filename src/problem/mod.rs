//! RFC 7807 problem details value.
//!
//! A [`ProblemDetails`] is built once per intercepted fault and is read-only
//! afterwards. Its serialized form always carries the keys
//! `type, status, title, detail, instance` in that order, with `null` for
//! unset optional members.

use axum::http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Content type of a problem details body.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem type used when no specific type is known.
pub const ABOUT_BLANK: &str = "about:blank";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

fn about_blank() -> String {
    ABOUT_BLANK.to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ProblemDetails {
    #[serde(rename = "type", default = "about_blank")]
    type_url: String,
    #[serde(
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    status: StatusCode,
    title: String,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    instance: Option<String>,
}

impl ProblemDetails {
    /// Create a problem with type `about:blank` and no detail or instance.
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_url: about_blank(),
            status,
            title: title.into(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    /// Key-ordered mapping of all five members.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(5);
        map.insert("type".to_owned(), Value::String(self.type_url.clone()));
        map.insert("status".to_owned(), Value::from(self.status.as_u16()));
        map.insert("title".to_owned(), Value::String(self.title.clone()));
        map.insert(
            "detail".to_owned(),
            self.detail.clone().map_or(Value::Null, Value::String),
        );
        map.insert(
            "instance".to_owned(),
            self.instance.clone().map_or(Value::Null, Value::String),
        );
        map
    }

    /// Compact JSON text of [`ProblemDetails::to_map`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_map())
    }
}

impl fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.title)
    }
}
