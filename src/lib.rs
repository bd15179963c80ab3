//! Workload-replay request source for HTTP load generation.
//!
//! A workload file lists one request per line (URI plus optional
//! `method=`/`content-type=`/`cookie=`/`header=`/`file=`/`contents=`
//! arguments). The parser builds an in-memory request store from it; the
//! dispatcher then serves exactly one stored request per "new call" event,
//! advancing a cursor until the list runs out or, in loop mode, forever.
//! The `httpreplay` binary wires the dispatcher to a blocking HTTP client
//! and replays the workload against a server.

pub mod arg_tokenizer;
pub mod content_loader;
pub mod dispatcher;
pub mod errors;
pub mod executor;
pub mod replay;
pub mod request;
pub mod store;
pub mod workload_parser;
