use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::executor::{send_call, ReplayCall, ReplayContext, StopFlag};
use crate::workload_parser::parse_workload;

/// Parses the workload file, then replays it against the server: one call
/// event per request until the dispatcher stops the run or the call budget
/// is spent. A budget is the only way a looped workload ends.
pub fn replay_workload(
    file: &Path,
    server: &str,
    do_loop: bool,
    max_calls: Option<u64>,
) -> Result<()> {
    let store = parse_workload(file, do_loop)
        .with_context(|| format!("while parsing workload {}", file.display()))?;
    info!(
        requests = store.len(),
        looped = store.is_looped(),
        "workload loaded"
    );

    let context = ReplayContext::new(server)?;
    let mut dispatcher = Dispatcher::new(store);
    let mut harness = StopFlag::default();
    let mut issued: u64 = 0;

    while max_calls.map_or(true, |max| issued < max) {
        let mut call = ReplayCall::default();
        dispatcher.dispatch(&mut call, &mut harness);
        if harness.is_stopped() {
            break;
        }
        send_call(&call, &context)?;
        issued += 1;
    }

    info!(issued, "replay finished");
    Ok(())
}
