use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::arg_tokenizer::parse_arg;
use crate::content_loader::load_contents;
use crate::errors::{ParseError, Result};
use crate::request::{Method, Request};
use crate::store::WorkloadStore;

// Token separators within a line; '\r' covers CRLF-terminated files.
const WS: &[char] = &[' ', '\t', '\r'];

fn split_token(s: &str) -> (&str, &str) {
    match s.find(WS) {
        Some(pos) => (&s[..pos], &s[pos..]),
        None => (s, ""),
    }
}

/// Builds the request store from a workload file.
///
/// One request per non-comment, non-blank line:
///
/// ```text
/// <uri> [method=<METHOD>] [content-type=<type>] [cookie=<value>]
///       [header=<raw-header-line>] [file=<path> | contents=<value>]
/// ```
///
/// Any malformed line aborts the whole parse; a partial store is never
/// returned.
pub fn parse_workload(path: &Path, do_loop: bool) -> Result<WorkloadStore> {
    let file = File::open(path).map_err(|source| ParseError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workload_from(BufReader::new(file), path, do_loop)
}

/// Same as [`parse_workload`], over an already-opened reader. `origin` names
/// the workload in diagnostics.
pub fn parse_workload_from<R: BufRead>(
    reader: R,
    origin: &Path,
    do_loop: bool,
) -> Result<WorkloadStore> {
    let mut requests: Vec<Request> = Vec::new();

    for (idx, read) in reader.lines().enumerate() {
        let lineno = idx + 1;
        let line = read.map_err(|source| ParseError::ConfigNotFound {
            path: origin.to_path_buf(),
            source,
        })?;

        if line.starts_with('#') {
            continue; // comment line
        }
        let after_uri = line.trim_start_matches(WS);
        if after_uri.is_empty() {
            continue; // blank line
        }

        // First token is the URI, everything after it is key=value arguments.
        let (uri, mut rest) = split_token(after_uri);
        let mut request = Request::new(uri.to_string());

        loop {
            rest = rest.trim_start_matches(WS);
            if rest.is_empty() {
                break;
            }
            let malformed = |token: &str| ParseError::MalformedLine {
                file: origin.to_path_buf(),
                lineno,
                line: line.clone(),
                token: token.to_string(),
            };

            if let Some(after) = rest.strip_prefix("method=") {
                let (token, tail) = split_token(after);
                let method = Method::from_token(token).ok_or_else(|| malformed(token))?;
                request.set_method(method);
                rest = tail;
            } else if let Some(after) = rest.strip_prefix("content-type=") {
                let (token, tail) = split_token(after);
                request
                    .headers_mut()
                    .push_line(&format!("Content-Type: {token}"));
                rest = tail;
            } else if let Some(after) = rest.strip_prefix("cookie=") {
                let (value, consumed) = parse_arg(after)?;
                request.headers_mut().push_line(&format!("Cookie: {value}"));
                rest = &after[consumed..];
            } else if let Some(after) = rest.strip_prefix("header=") {
                // The value is a complete "Name: value" header line.
                let (value, consumed) = parse_arg(after)?;
                request.headers_mut().push_line(&value);
                rest = &after[consumed..];
            } else if let Some(after) = rest.strip_prefix("file=") {
                let (token, tail) = split_token(after);
                request.set_body(load_contents(Path::new(token))?);
                rest = tail;
            } else if let Some(after) = rest.strip_prefix("contents=") {
                let (value, consumed) = parse_arg(after)?;
                request.set_body(value.into_bytes());
                rest = &after[consumed..];
            } else {
                let (token, _) = split_token(rest);
                return Err(malformed(token));
            }

            // Keep Content-Length in step with the body; the slot is
            // replaced in place so no argument order can duplicate it.
            let body_len = request.body_len();
            if body_len > 0 {
                request.headers_mut().set_content_length(body_len);
            }
        }

        requests.push(request);
    }

    let store = WorkloadStore::new(requests, do_loop);
    debug!(
        file = %origin.display(),
        requests = store.len(),
        looped = store.is_looped(),
        "parsed workload"
    );
    for request in store.requests() {
        debug!(
            uri = request.uri(),
            method = %request.method(),
            headers = request.headers().lines().len(),
            body_len = request.body_len(),
            "workload entry"
        );
    }
    Ok(store)
}
