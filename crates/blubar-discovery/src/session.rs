//! Reply collection for one discovery pass.

use async_channel::Receiver;
use blubar_core::types::DiscoveredDevice;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, trace};

/// Drains the reply stream until the producer finishes or the session
/// deadline fires, whichever comes first.
///
/// Replies are deduplicated by formatted base URL and kept in first-seen
/// order. Whatever has been accumulated when the deadline fires is returned
/// as-is; partial results are valid output.
pub(crate) async fn collect_candidates(
    rx: Receiver<DiscoveredDevice>,
    budget: Duration,
) -> Vec<DiscoveredDevice> {
    let deadline = tokio::time::sleep(budget);
    tokio::pin!(deadline);

    let mut seen: HashSet<String> = HashSet::new();
    let mut devices: Vec<DiscoveredDevice> = Vec::new();

    loop {
        tokio::select! {
            reply = rx.recv() => match reply {
                Ok(device) => {
                    if seen.insert(device.address.base_url()) {
                        debug!(device = %device, "discovered device");
                        devices.push(device);
                    } else {
                        trace!(device = %device, "duplicate reply ignored");
                    }
                }
                // Producer dropped its sender, the pass is complete.
                Err(_) => break,
            },
            _ = &mut deadline => {
                debug!(count = devices.len(), "discovery deadline reached");
                break;
            }
        }
    }

    devices
}
