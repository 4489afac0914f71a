//! Miscellaneous common types used throughout the Billwerk codebase.

use std::fmt::{Debug, Display};

use serde::Serialize;

/// Represents a key-value pair. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Represents any JSON value. Used for serializing/deserializing arbitrary JSON data.
pub type AnyJson = serde_json::Value;

/// A Billwerk resource handle sent with a create call.
///
/// Handles are either supplied by the caller or generated as a fallback. Generated
/// handles are random, so they are kept distinguishable to let callers and tests
/// tell the two apart.
///
/// ```
/// use billwerk_core::types::Handle;
///
/// let supplied = Handle::supplied_or_generate(Some("order-42"), "order");
/// assert_eq!(supplied, Handle::Supplied("order-42".to_string()));
///
/// let generated = Handle::supplied_or_generate(None, "order");
/// assert!(generated.is_generated());
/// assert!(generated.as_str().starts_with("order_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Handle given by the caller.
    Supplied(String),
    /// Handle generated because the caller did not supply one.
    Generated(String),
}

impl Handle {
    /// Generate a new random handle, `<prefix>_<24 hex chars>`.
    pub fn generate(prefix: &str) -> Self {
        let entropy: [u8; 12] = rand::random();
        Handle::Generated(format!("{prefix}_{}", hex::encode(entropy)))
    }

    /// Use the supplied value when present and non-empty, otherwise generate one.
    pub fn supplied_or_generate(value: Option<&str>, prefix: &str) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => Handle::Supplied(v.to_string()),
            None => Handle::generate(prefix),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Handle::Supplied(v) | Handle::Generated(v) => v,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Handle::Generated(_))
    }
}

impl Serialize for Handle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query parameters of the request a customer returns with from checkout.
///
/// Billwerk appends the resource id to the accept URL, e.g.
/// `?invoice=order-42&id=cs_123`.
///
/// ```
/// use billwerk_core::types::QueryParams;
///
/// let query = QueryParams::parse("invoice=order-42&customer=cust-1");
/// assert_eq!(query.get("invoice"), Some("order-42"));
/// assert_eq!(query.get("charge"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Record<String>);

impl QueryParams {
    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored. When a key repeats, the first value wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Record::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        QueryParams(params)
    }

    /// Get a non-empty parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Record<String>> for QueryParams {
    fn from(value: Record<String>) -> Self {
        QueryParams(value)
    }
}

impl From<&str> for QueryParams {
    fn from(value: &str) -> Self {
        QueryParams::parse(value)
    }
}

impl From<&url::Url> for QueryParams {
    fn from(value: &url::Url) -> Self {
        value.query().map(QueryParams::parse).unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        QueryParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
