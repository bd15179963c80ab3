use crate::request::Request;

/// The parsed request sequence plus the cursor over it.
///
/// Requests live in a flat arena indexed by the cursor; loop mode wraps the
/// cursor modulo the arena length instead of tying the tail back to the
/// head, so dropping the store releases each request exactly once with no
/// ring to walk.
#[derive(Debug)]
pub struct WorkloadStore {
    requests: Vec<Request>,
    cursor: Option<usize>,
    looped: bool,
}

impl WorkloadStore {
    pub fn new(requests: Vec<Request>, looped: bool) -> WorkloadStore {
        let cursor = if requests.is_empty() { None } else { Some(0) };
        WorkloadStore {
            requests,
            cursor,
            looped,
        }
    }

    /// The request the next dispatch will serve, or `None` once the list is
    /// exhausted.
    pub fn current(&self) -> Option<&Request> {
        self.cursor.map(|i| &self.requests[i])
    }

    /// Moves the cursor past the current request: to the next entry, back to
    /// the head in loop mode, or to exhausted past the tail of an open list.
    pub fn advance(&mut self) {
        self.cursor = match self.cursor {
            Some(i) if self.looped => Some((i + 1) % self.requests.len()),
            Some(i) if i + 1 < self.requests.len() => Some(i + 1),
            _ => None,
        };
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }
}
