//! Query strings and absolute URL composition.

use url::{Url, form_urlencoded};

use crate::error::{CronofyError, CronofyResult};

/// A query parameter value.
///
/// Sequences render as repeated `key[]=value` pairs, one per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Scalar(if value { "true" } else { "false" }.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Sequence(values)
    }
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scalar parameter.
    #[must_use]
    pub fn scalar(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a sequence parameter.
    #[must_use]
    pub fn sequence<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.0.push((key.into(), QueryValue::Sequence(values)));
        self
    }

    /// Appends a parameter in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, QueryValue)> {
        self.0.iter()
    }

    /// Renders the parameters as `?k=v&k[]=a&k[]=b`, or `""` when empty.
    ///
    /// Values are form-encoded individually; keys are emitted verbatim.
    pub fn to_query_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            match value {
                QueryValue::Scalar(v) => pairs.push(format!("{key}={}", encode_value(v))),
                QueryValue::Sequence(vs) => {
                    pairs.extend(vs.iter().map(|v| format!("{key}[]={}", encode_value(v))));
                }
            }
        }
        format!("?{}", pairs.join("&"))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Joins `root`, `path` and `query` into an absolute URL and checks that the
/// result is well formed.
pub fn compose_url(root: &str, path: &str, query: &QueryParams) -> CronofyResult<String> {
    let url = format!("{root}{path}{}", query.to_query_string());
    validate_url(&url)?;
    Ok(url)
}

/// Checks that `url` is an absolute URL with a host and no whitespace or
/// control characters.
pub fn validate_url(url: &str) -> CronofyResult<()> {
    let invalid = || CronofyError::InvalidUrl {
        url: url.to_string(),
    };
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid());
    }
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}
