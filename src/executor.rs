use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::dispatcher::{Call, Harness};

/// Connection state shared by every replayed call.
pub struct ReplayContext {
    pub client: reqwest::blocking::Client,
    pub server: reqwest::Url,
}

impl ReplayContext {
    pub fn new(server: &str) -> Result<ReplayContext> {
        Ok(ReplayContext {
            client: reqwest::blocking::Client::new(),
            server: server
                .parse()
                .map_err(|e| anyhow!("{:?} @ '{}'", e, server))?,
        })
    }
}

/// Buffer the dispatcher fills in for one call event.
#[derive(Debug, Default)]
pub struct ReplayCall {
    method: Option<String>,
    uri: Vec<u8>,
    headers: Vec<u8>,
    body: Option<Vec<u8>>,
}

impl Call for ReplayCall {
    fn set_method(&mut self, name: &str) {
        self.method = Some(name.to_string());
    }
    fn set_uri(&mut self, uri: &[u8]) {
        self.uri = uri.to_vec();
    }
    fn append_request_headers(&mut self, headers: &[u8]) {
        self.headers.extend_from_slice(headers);
    }
    fn set_body(&mut self, body: &[u8]) {
        self.body = Some(body.to_vec());
    }
}

impl ReplayCall {
    pub fn method(&self) -> Result<reqwest::Method> {
        match &self.method {
            Some(name) => reqwest::Method::from_bytes(name.as_bytes())
                .map_err(|_| anyhow!("{} is a unknown http method", name)),
            None => Ok(reqwest::Method::GET),
        }
    }

    pub fn url(&self, server: &reqwest::Url) -> Result<reqwest::Url> {
        let uri = std::str::from_utf8(&self.uri).context("workload URI is not valid UTF-8")?;
        server
            .join(uri)
            .map_err(|e| anyhow!("{:?} @ '{}'", e, uri))
    }

    /// The accumulated raw header lines as a reqwest header map.
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        let text = std::str::from_utf8(&self.headers).context("header block is not valid UTF-8")?;
        for line in text.split("\r\n").filter(|line| !line.is_empty()) {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("header line without a colon: '{}'", line))?;
            map.append(
                HeaderName::try_from(name.trim())
                    .map_err(|e| anyhow!("{:?} @ '{}'", e, line))?,
                HeaderValue::try_from(value.trim())
                    .map_err(|e| anyhow!("{:?} @ '{}'", e, line))?,
            );
        }
        Ok(map)
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Stop signal raised by the dispatcher once the workload is exhausted.
#[derive(Debug, Default)]
pub struct StopFlag {
    stopped: bool,
}

impl StopFlag {
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Harness for StopFlag {
    fn stop(&mut self) {
        self.stopped = true;
    }
}

pub fn send_call(call: &ReplayCall, context: &ReplayContext) -> Result<()> {
    let url = call.url(&context.server)?;
    let mut request = context
        .client
        .request(call.method()?, url.clone())
        .headers(call.header_map()?);
    if let Some(body) = call.body() {
        request = request.body(body.to_vec());
    }

    let response = request.send().context(format!("while requesting {url}"))?;

    let headers: String = response
        .headers()
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<String>>()
        .join("\n");
    println!("{} {}\n", response.status(), url);
    println!("{}\n", headers);
    println!("{}", response.text().unwrap_or_default());
    Ok(())
}
