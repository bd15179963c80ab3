use tracing::debug;

use crate::request::Method;
use crate::store::WorkloadStore;

/// The field surface of one outgoing call, supplied by the harness for every
/// "new call" event. The dispatcher only writes into it; the written slices
/// are valid for the processing of that call only.
pub trait Call {
    fn set_method(&mut self, name: &str);
    fn set_uri(&mut self, uri: &[u8]);
    fn append_request_headers(&mut self, headers: &[u8]);
    fn set_body(&mut self, body: &[u8]);
}

/// Control surface back into the harness.
pub trait Harness {
    /// Stop issuing new calls.
    fn stop(&mut self);
}

/// Serves one stored request per call event, advancing the cursor until the
/// store runs out (or forever in loop mode).
///
/// Owns the store outright, so independent dispatchers can run side by side;
/// dropping the dispatcher releases every stored request exactly once.
#[derive(Debug)]
pub struct Dispatcher {
    store: WorkloadStore,
}

impl Dispatcher {
    pub fn new(store: WorkloadStore) -> Dispatcher {
        Dispatcher { store }
    }

    pub fn store(&self) -> &WorkloadStore {
        &self.store
    }

    /// Handles one "new call" event.
    ///
    /// On exhaustion the harness is told to stop and the call gets an empty
    /// URI so the in-flight event stays a harmless no-op. Otherwise the
    /// current request's fields are written into the call (method only when
    /// it differs from GET) and the cursor advances. Never fails.
    pub fn dispatch(&mut self, call: &mut dyn Call, harness: &mut dyn Harness) {
        let Some(request) = self.store.current() else {
            harness.stop();
            call.set_uri(b"");
            return;
        };

        if request.method() != Method::Get {
            call.set_method(request.method().name());
        }
        call.set_uri(request.uri().as_bytes());
        if !request.headers().is_empty() {
            call.append_request_headers(&request.headers().to_bytes());
        }
        if let Some(body) = request.body() {
            call.set_body(body);
        }
        debug!(uri = request.uri(), "accessing URI");

        self.store.advance();
    }
}
