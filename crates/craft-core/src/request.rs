// crates/craft-core/src/request.rs - Request Descriptors and URL assembly
//
// A RequestDescriptor is the in-memory form of one outgoing call. Command
// handlers build it, the dispatcher consumes it. Nothing mutates it once it
// has been handed over.

use indexmap::IndexMap;
use url::Url;

use crate::error::CraftResult;

/// A query parameter value: one string, or a repeated parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

/// Ordered query parameters (iteration order is wire order)
pub type Query = IndexMap<String, QueryValue>;

/// Ordered request headers
pub type Headers = IndexMap<String, String>;

/// Everything the dispatcher needs to issue one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: String,
    pub path: String,
    pub query: Query,
    pub headers: Headers,
    pub body: Option<String>,
    pub content_type: Option<String>,
    pub raw: bool,
}

impl RequestDescriptor {
    pub fn new<M: Into<String>, P: Into<String>>(method: M, path: P) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: Query::new(),
            headers: Headers::new(),
            body: None,
            content_type: None,
            raw: false,
        }
    }

    pub fn get<P: Into<String>>(path: P) -> Self {
        Self::new("GET", path)
    }

    pub fn post<P: Into<String>>(path: P) -> Self {
        Self::new("POST", path)
    }

    pub fn put<P: Into<String>>(path: P) -> Self {
        Self::new("PUT", path)
    }

    pub fn delete<P: Into<String>>(path: P) -> Self {
        Self::new("DELETE", path)
    }

    /// Add a query parameter (replaces an earlier one with the same key)
    pub fn query<K: Into<String>, V: Into<QueryValue>>(mut self, key: K, value: V) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt<K: Into<String>, V: Into<QueryValue>>(self, key: K, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add a `key=true` flag parameter when `enabled`
    pub fn query_flag<K: Into<String>>(self, key: K, enabled: bool) -> Self {
        if enabled { self.query(key, "true") } else { self }
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body<B: Into<String>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn content_type<C: Into<String>>(mut self, content_type: C) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }
}

/// Whether `path` is already a full URL rather than an API-relative path
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Build the final request URL
///
/// ALGORITHM:
/// 1. Absolute paths are used as-is; relative paths are joined onto
///    `base_url + "/"` so the base's own path segments are kept
/// 2. Scalar parameters replace any same-named pair already in the URL
/// 3. List parameters append one pair per element, in order
/// 4. Empty values (and empty list elements) are skipped
pub fn build_url(base_url: &str, path: &str, query: &Query) -> CraftResult<Url> {
    let mut url = if is_absolute_url(path) {
        Url::parse(path)?
    } else {
        Url::parse(&format!("{base_url}/"))?.join(path)?
    };

    for (key, value) in query {
        match value {
            QueryValue::Single(value) if value.is_empty() => {}
            QueryValue::Single(value) => set_query_pair(&mut url, key, value),
            QueryValue::Multiple(values) => {
                let entries: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();
                if entries.is_empty() {
                    continue;
                }
                let mut pairs = url.query_pairs_mut();
                for entry in entries {
                    pairs.append_pair(key, entry);
                }
            }
        }
    }

    Ok(url)
}

fn set_query_pair(url: &mut Url, key: &str, value: &str) {
    let existing: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    pairs.extend_pairs(existing);
    pairs.append_pair(key, value);
}
