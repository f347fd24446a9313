//! Incoming HTTP request type.

use serde::de::DeserializeOwned;

use crate::method::Method;

/// An incoming HTTP request with its body already collected.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Self {
        Self { method, path, headers, body }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decodes the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn post(body: &str) -> Request {
        Request::new(
            Method::Post,
            "/api/validate_chirp".to_owned(),
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body.as_bytes().to_vec(),
        )
    }

    #[derive(Deserialize)]
    struct Body {
        body: String,
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(post("").header("content-type"), Some("application/json"));
        assert_eq!(post("").header("accept"), None);
    }

    #[test]
    fn decodes_json_body() {
        let parsed: Body = post(r#"{"body":"hello"}"#).json().unwrap();
        assert_eq!(parsed.body, "hello");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(post("{not json").json::<Body>().is_err());
    }
}
