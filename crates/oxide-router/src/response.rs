//! Page responses.

use std::collections::HashMap;

/// What a page hands back to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Rendered body.
    pub body: String,
}

impl Response {
    /// A `200` response carrying rendered markup.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )]),
            body: body.into(),
        }
    }

    /// A `302` response sending the visitor to `url`.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            status: 302,
            headers: HashMap::from([("Location".to_string(), url.into())]),
            body: String::new(),
        }
    }

    /// Returns the redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        if (300..400).contains(&self.status) {
            self.headers.get("Location").map(String::as_str)
        } else {
            None
        }
    }

    /// Returns whether this response is a redirect.
    pub fn is_redirect(&self) -> bool {
        self.location().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response() {
        let res = Response::html("<h2>Create your account</h2>");
        assert_eq!(res.status, 200);
        assert_eq!(
            res.headers.get("Content-Type").map(String::as_str),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(res.body, "<h2>Create your account</h2>");
        assert!(!res.is_redirect());
    }

    #[test]
    fn test_redirect_response() {
        let res = Response::redirect("/dashboard");
        assert_eq!(res.status, 302);
        assert_eq!(res.location(), Some("/dashboard"));
        assert!(res.body.is_empty());
    }
}
