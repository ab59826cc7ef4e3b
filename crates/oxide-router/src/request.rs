//! Incoming page request.

use std::collections::HashMap;

use crate::url::decode_query_value;

/// A page request: path plus decoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Request path.
    pub path: String,
    /// Query string parameters.
    pub query: HashMap<String, String>,
}

impl Request {
    /// Creates a request for `uri`, splitting off and decoding its query.
    pub fn get(uri: &str) -> Self {
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        Self {
            path: path.to_string(),
            query: Self::parse_query_string(query),
        }
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Gets a query parameter.
    pub fn get_query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Parses query parameters from a query string.
    pub fn parse_query_string(query: &str) -> HashMap<String, String> {
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((decode_query_value(key), decode_query_value(value)))
            })
            .collect()
    }
}
