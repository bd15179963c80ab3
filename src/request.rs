use std::fmt;

/// Methods allowed for a request. Anything else on a `method=` argument is a
/// malformed line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Method {
    Delete,
    Get,
    Head,
    Options,
    Post,
    Put,
    Trace,
}

const METHOD_NAMES: [(Method, &str); 7] = [
    (Method::Delete, "DELETE"),
    (Method::Get, "GET"),
    (Method::Head, "HEAD"),
    (Method::Options, "OPTIONS"),
    (Method::Post, "POST"),
    (Method::Put, "PUT"),
    (Method::Trace, "TRACE"),
];

impl Method {
    /// Resolves a `method=` token by case-sensitive prefix match against the
    /// name table, first match wins.
    pub fn from_token(token: &str) -> Option<Method> {
        METHOD_NAMES
            .iter()
            .find(|(_, name)| token.starts_with(name))
            .map(|(method, _)| *method)
    }

    pub fn name(&self) -> &'static str {
        METHOD_NAMES
            .iter()
            .find(|(method, _)| method == self)
            .map(|(_, name)| *name)
            .unwrap_or("GET")
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extra header lines accumulated for one request, each CRLF-terminated.
///
/// At most one of them is the synthesized `Content-Length` line; its position
/// is remembered so a body-length refresh replaces it in place instead of
/// appending a duplicate.
#[derive(Debug, Default, Clone)]
pub struct HeaderBlock {
    lines: Vec<String>,
    content_length_slot: Option<usize>,
}

impl HeaderBlock {
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(format!("{line}\r\n"));
    }

    /// Inserts or replaces the `Content-Length` line for the given body
    /// length. Replacement happens in place, keeping the slot's position.
    pub fn set_content_length(&mut self, len: usize) {
        let line = format!("Content-Length: {len}\r\n");
        match self.content_length_slot {
            Some(slot) => self.lines[slot] = line,
            None => {
                self.content_length_slot = Some(self.lines.len());
                self.lines.push(line);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The raw bytes appended to a call's request headers.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.iter().flat_map(|line| line.bytes()).collect()
    }
}

/// One workload entry: everything needed to fill in a single call.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    headers: HeaderBlock,
    body: Option<Vec<u8>>,
}

impl Request {
    /// A fresh entry for the given URI, method defaulting to GET.
    pub fn new(uri: String) -> Request {
        debug_assert!(!uri.is_empty());
        Request {
            method: Method::Get,
            uri,
            headers: HeaderBlock::default(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderBlock {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderBlock {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }

    /// Installs the body. An empty buffer normalizes to no body at all;
    /// a request never carries a present-but-empty body.
    pub fn set_body(&mut self, contents: Vec<u8>) {
        self.body = if contents.is_empty() {
            None
        } else {
            Some(contents)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("GET", Some(Method::Get))]
    #[test_case("POST", Some(Method::Post))]
    #[test_case("DELETE", Some(Method::Delete))]
    #[test_case("HEAD", Some(Method::Head))]
    #[test_case("OPTIONS", Some(Method::Options))]
    #[test_case("PUT", Some(Method::Put))]
    #[test_case("TRACE", Some(Method::Trace))]
    #[test_case("GETX", Some(Method::Get); "prefix match accepts trailing junk")]
    #[test_case("get", None; "matching is case sensitive")]
    #[test_case("PATCH", None)]
    #[test_case("", None)]
    fn method_table(token: &str, want: Option<Method>) {
        assert_eq!(Method::from_token(token), want);
    }

    #[test]
    fn content_length_replaces_in_place() {
        let mut block = HeaderBlock::default();
        block.push_line("Content-Type: text/plain");
        block.set_content_length(5);
        block.push_line("Cookie: abc");
        block.set_content_length(11);

        let lines = block.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Content-Type: text/plain\r\n");
        assert_eq!(lines[1], "Content-Length: 11\r\n");
        assert_eq!(lines[2], "Cookie: abc\r\n");
        let text = String::from_utf8(block.to_bytes()).unwrap();
        assert_eq!(text.matches("Content-Length").count(), 1);
    }

    #[test]
    fn empty_body_normalizes_to_absent() {
        let mut req = Request::new("/x".to_string());
        req.set_body(Vec::new());
        assert!(req.body().is_none());
        assert_eq!(req.body_len(), 0);

        req.set_body(b"abc".to_vec());
        assert_eq!(req.body(), Some(&b"abc"[..]));
        assert_eq!(req.body_len(), 3);
    }
}
