//! Ordered status delivery.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use uplink_core::Signal;

use crate::status::Status;

/// Delivers published statuses to observers without blocking the polling
/// loop or holding the monitor's lock during callbacks.
///
/// Publications go through a FIFO queue drained by whichever thread gets
/// there first; while one thread is draining, others only enqueue. This
/// keeps delivery in completion order even when a one-shot check and a
/// poll tick publish back to back, and it makes re-entrancy harmless: an
/// observer that calls back into the monitor merely appends to the queue
/// the current drainer is already working through.
pub(crate) struct StatusDispatcher {
    /// Every published status change, in occurrence order.
    status_changed: Arc<Signal<Status>>,
    /// Connected/disconnected grouping flips (`Determining` is neither and
    /// never contributes a flip).
    online_state_changed: Arc<Signal<bool>>,
    queue: Mutex<DispatchQueue>,
}

struct DispatchQueue {
    pending: VecDeque<Status>,
    draining: bool,
    last_online: Option<bool>,
}

impl StatusDispatcher {
    pub(crate) fn new() -> Self {
        Self {
            status_changed: Arc::new(Signal::new()),
            online_state_changed: Arc::new(Signal::new()),
            queue: Mutex::new(DispatchQueue {
                pending: VecDeque::new(),
                draining: false,
                last_online: None,
            }),
        }
    }

    pub(crate) fn status_changed(&self) -> &Arc<Signal<Status>> {
        &self.status_changed
    }

    pub(crate) fn online_state_changed(&self) -> &Arc<Signal<bool>> {
        &self.online_state_changed
    }

    /// Queue a status for delivery. Safe to call while the monitor's lock
    /// is held; nothing is emitted from here.
    pub(crate) fn enqueue(&self, status: Status) {
        self.queue.lock().pending.push_back(status);
    }

    /// Deliver queued statuses. Must be called with no monitor lock held.
    ///
    /// Returns immediately when another thread is already draining; that
    /// thread will pick up whatever was enqueued in the meantime.
    pub(crate) fn drain(&self) {
        {
            let mut queue = self.queue.lock();
            if queue.draining {
                return;
            }
            queue.draining = true;
        }

        loop {
            let (status, online_flip) = {
                let mut queue = self.queue.lock();
                let Some(status) = queue.pending.pop_front() else {
                    queue.draining = false;
                    return;
                };

                let online_flip = if status.is_determining() {
                    None
                } else {
                    let online = status.is_connected();
                    if queue.last_online == Some(online) {
                        None
                    } else {
                        queue.last_online = Some(online);
                        Some(online)
                    }
                };

                (status, online_flip)
            };

            tracing::debug!(target: "uplink::monitor", %status, "status changed");
            self.status_changed.emit(status);
            if let Some(online) = online_flip {
                self.online_state_changed.emit(online);
            }
        }
    }
}
