use std::io::Cursor;
use std::path::Path;

use httpreplay::dispatcher::{Call, Dispatcher, Harness};
use httpreplay::workload_parser::parse_workload_from;

#[derive(Debug, Default)]
struct CallBuffer {
    method: Option<String>,
    uri: Option<String>,
    headers: String,
    body: Option<Vec<u8>>,
}

impl Call for CallBuffer {
    fn set_method(&mut self, name: &str) {
        self.method = Some(name.to_string());
    }
    fn set_uri(&mut self, uri: &[u8]) {
        self.uri = Some(String::from_utf8(uri.to_vec()).unwrap());
    }
    fn append_request_headers(&mut self, headers: &[u8]) {
        self.headers.push_str(std::str::from_utf8(headers).unwrap());
    }
    fn set_body(&mut self, body: &[u8]) {
        self.body = Some(body.to_vec());
    }
}

#[derive(Debug, Default)]
struct StopFlag {
    stopped: bool,
}

impl Harness for StopFlag {
    fn stop(&mut self) {
        self.stopped = true;
    }
}

fn dispatcher_for(workload: &str, do_loop: bool) -> Dispatcher {
    let store = parse_workload_from(Cursor::new(workload), Path::new("wlog.txt"), do_loop)
        .expect("workload should parse");
    Dispatcher::new(store)
}

#[test]
fn replays_a_parsed_workload_in_order_then_stops() {
    let workload = "\
# a comment
/first
/second method=HEAD

/third method=POST content-type=text/plain contents='a b c'
";
    let mut dispatcher = dispatcher_for(workload, false);
    let mut harness = StopFlag::default();

    let mut calls = Vec::new();
    for _ in 0..3 {
        let mut call = CallBuffer::default();
        dispatcher.dispatch(&mut call, &mut harness);
        assert!(!harness.stopped);
        calls.push(call);
    }

    assert_eq!(calls[0].uri.as_deref(), Some("/first"));
    assert_eq!(calls[0].method, None);
    assert!(calls[0].headers.is_empty());
    assert!(calls[0].body.is_none());

    assert_eq!(calls[1].uri.as_deref(), Some("/second"));
    assert_eq!(calls[1].method.as_deref(), Some("HEAD"));

    assert_eq!(calls[2].uri.as_deref(), Some("/third"));
    assert_eq!(calls[2].method.as_deref(), Some("POST"));
    assert_eq!(
        calls[2].headers,
        "Content-Type: text/plain\r\nContent-Length: 5\r\n"
    );
    assert_eq!(calls[2].body.as_deref(), Some(&b"a b c"[..]));

    let mut call = CallBuffer::default();
    dispatcher.dispatch(&mut call, &mut harness);
    assert!(harness.stopped);
    assert_eq!(call.uri.as_deref(), Some(""));
}

#[test]
fn looped_workload_cycles_without_stopping() {
    let mut dispatcher = dispatcher_for("/a\n/b\n/c\n", true);
    let mut harness = StopFlag::default();

    let mut seen = Vec::new();
    for _ in 0..7 {
        let mut call = CallBuffer::default();
        dispatcher.dispatch(&mut call, &mut harness);
        seen.push(call.uri.unwrap());
    }
    assert_eq!(seen, ["/a", "/b", "/c", "/a", "/b", "/c", "/a"]);
    assert!(!harness.stopped);
}

#[test]
fn quoted_header_and_cookie_arrive_in_file_order() {
    let mut dispatcher = dispatcher_for("/y header='X-Foo: bar' cookie=abc\n", false);
    let mut call = CallBuffer::default();
    dispatcher.dispatch(&mut call, &mut StopFlag::default());
    assert_eq!(call.headers, "X-Foo: bar\r\nCookie: abc\r\n");
}
