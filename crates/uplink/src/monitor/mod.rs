//! Connectivity monitoring.

mod dispatcher;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use uplink_core::{Signal, runtime};

use crate::classify::classify;
use crate::config::{MonitorConfig, StrategyKind};
use crate::error::ConfigError;
use crate::probe::{ActiveProbeStrategy, PassiveLinkStrategy, ProbeStrategy};
use crate::status::Status;

use dispatcher::StatusDispatcher;

/// Extra headroom the monitor grants a probe beyond its own timeout before
/// abandoning it.
const PROBE_GRACE: Duration = Duration::from_secs(1);

/// Lifecycle state of a [`ConnectivityMonitor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorState {
    /// No check in flight and no polling scheduled.
    Idle,
    /// A one-shot check or the first poll tick is in flight.
    Checking,
    /// The notifier is active and periodic ticks are scheduled.
    Observing,
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Checking => write!(f, "Checking"),
            Self::Observing => write!(f, "Observing"),
        }
    }
}

/// Tracks whether a host has usable internet connectivity.
///
/// The monitor owns a current [`Status`] and the active probe strategy. It
/// supports one-shot checks ([`check_once`](Self::check_once)) and a
/// continuous polling notifier
/// ([`start_notifier`](Self::start_notifier) /
/// [`stop_notifier`](Self::stop_notifier)); whenever a check's verdict
/// differs from the previously published status, observers connected to
/// [`status_changed`](Self::status_changed) are informed, in the order the
/// checks completed.
///
/// # Example
///
/// ```ignore
/// use uplink::{ConnectivityMonitor, MonitorConfig, StrategyKind};
///
/// let monitor = ConnectivityMonitor::new(MonitorConfig::default())?;
///
/// // Watch for verdict changes
/// monitor.status_changed.connect(|status| {
///     println!("Connectivity: {}", status);
/// });
///
/// // Or just for online/offline flips
/// monitor.online_state_changed.connect(|&online| {
///     println!("Online: {}", online);
/// });
///
/// // Continuous observation (runs in the background)
/// monitor.start_notifier();
///
/// // Switch how probing is done; a fresh check runs immediately
/// monitor.set_strategy(StrategyKind::Passive);
///
/// monitor.stop_notifier();
/// ```
pub struct ConnectivityMonitor {
    /// Signal emitted for every published status change.
    pub status_changed: Arc<Signal<Status>>,

    /// Signal emitted when the connected/disconnected grouping flips.
    pub online_state_changed: Arc<Signal<bool>>,

    /// Internal state shared with background tasks.
    shared: Arc<Shared>,
}

struct Shared {
    dispatcher: StatusDispatcher,
    inner: Mutex<Inner>,
}

struct Inner {
    config: MonitorConfig,
    strategy_kind: StrategyKind,
    probe: Arc<dyn ProbeStrategy>,
    status: Status,
    /// Whether the notifier is running (start called, stop not yet).
    notifier_active: bool,
    /// Whether the running notifier has published its first verdict.
    observing: bool,
    /// Number of one-shot checks currently in flight.
    oneshots_in_flight: usize,
    /// Whether the owning application reported itself backgrounded.
    backgrounded: bool,
    /// Supersession counter. A check may only publish while the epoch it
    /// captured at start is still current; every lifecycle transition
    /// bumps it, which is what discards stale in-flight results.
    epoch: u64,
    /// Cancels the current poll task. Dropping the monitor or stopping the
    /// notifier fires it synchronously.
    cancel: Option<oneshot::Sender<()>>,
}

impl ConnectivityMonitor {
    /// Create a monitor from a validated configuration.
    pub fn new(config: MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let probe = build_probe(config.strategy, &config);
        let strategy_kind = config.strategy;
        let dispatcher = StatusDispatcher::new();
        let status_changed = dispatcher.status_changed().clone();
        let online_state_changed = dispatcher.online_state_changed().clone();

        Ok(Self {
            status_changed,
            online_state_changed,
            shared: Arc::new(Shared {
                dispatcher,
                inner: Mutex::new(Inner {
                    config,
                    strategy_kind,
                    probe,
                    status: Status::Determining,
                    notifier_active: false,
                    observing: false,
                    oneshots_in_flight: 0,
                    backgrounded: false,
                    epoch: 0,
                    cancel: None,
                }),
            }),
        })
    }

    /// The most recently published status.
    pub fn current_status(&self) -> Status {
        self.shared.inner.lock().status
    }

    /// The currently selected strategy kind.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.shared.inner.lock().strategy_kind
    }

    /// The monitor's lifecycle state.
    pub fn state(&self) -> MonitorState {
        monitor_state(&self.shared.inner.lock())
    }

    /// Whether the notifier is currently running.
    pub fn is_notifier_running(&self) -> bool {
        self.shared.inner.lock().notifier_active
    }

    /// The configured foreground poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.shared.inner.lock().config.poll_interval
    }

    /// Run exactly one probe+classify cycle and return the verdict.
    ///
    /// Does not touch the polling state: calling this while the notifier is
    /// running neither resets the poll timer nor stops it. The verdict is
    /// published to observers through the usual change-detection path.
    pub async fn check_once(&self) -> Status {
        self.shared.clone().run_one_shot().await
    }

    /// Like [`check_once`](Self::check_once), but runs on the background
    /// runtime and invokes `completion` exactly once with the verdict.
    pub fn check_once_with<F>(&self, completion: F)
    where
        F: FnOnce(Status) + Send + 'static,
    {
        let shared = self.shared.clone();
        runtime::spawn(async move {
            let status = shared.run_one_shot().await;
            completion(status);
        });
    }

    /// Start continuous observation.
    ///
    /// Idempotent: calling while the notifier is already running is a
    /// no-op. [`Status::Determining`] is published immediately, then probes
    /// run at the effective poll interval, starting right away, so the
    /// first tick's verdict always reaches observers and establishes the
    /// baseline for change detection.
    pub fn start_notifier(&self) {
        {
            let mut inner = self.shared.inner.lock();
            if inner.notifier_active {
                tracing::trace!(target: "uplink::monitor", "notifier already running");
                return;
            }
            inner.notifier_active = true;
        }
        self.launch_poll_session(true);
    }

    /// Stop continuous observation.
    ///
    /// Idempotent. The poll schedule is cancelled synchronously; a probe
    /// already in flight runs to completion but its result is discarded,
    /// never published.
    pub fn stop_notifier(&self) {
        let mut inner = self.shared.inner.lock();
        if !inner.notifier_active {
            return;
        }
        inner.notifier_active = false;
        inner.observing = false;
        inner.epoch += 1;
        if let Some(cancel) = inner.cancel.take() {
            let _ = cancel.send(());
        }
        tracing::debug!(target: "uplink::monitor", "notifier stopped");
    }

    /// Select a built-in probe strategy.
    ///
    /// While idle this only affects future probes. While observing, any
    /// in-flight check is superseded and a fresh check runs immediately
    /// under the new strategy, resetting the tick schedule from that point.
    pub fn set_strategy(&self, kind: StrategyKind) {
        let restart = {
            let mut inner = self.shared.inner.lock();
            if inner.strategy_kind == kind {
                return;
            }
            tracing::debug!(target: "uplink::monitor", strategy = %kind, "strategy changed");
            inner.strategy_kind = kind;
            inner.probe = build_probe(kind, &inner.config);
            if !inner.notifier_active {
                inner.epoch += 1;
                false
            } else {
                true
            }
        };
        if restart {
            self.launch_poll_session(false);
        }
    }

    /// Replace the probe implementation directly.
    ///
    /// The swap semantics are the same as [`set_strategy`](Self::set_strategy);
    /// the selected kind reported by [`strategy_kind`](Self::strategy_kind)
    /// is left unchanged.
    pub fn set_probe(&self, probe: Arc<dyn ProbeStrategy>) {
        let restart = {
            let mut inner = self.shared.inner.lock();
            tracing::debug!(target: "uplink::monitor", strategy = probe.name(), "probe replaced");
            inner.probe = probe;
            if !inner.notifier_active {
                inner.epoch += 1;
                false
            } else {
                true
            }
        };
        if restart {
            self.launch_poll_session(false);
        }
    }

    /// Change the foreground poll interval.
    ///
    /// A running notifier is rescheduled from now.
    pub fn set_poll_interval(&self, interval: Duration) -> Result<(), ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidPollInterval(interval));
        }
        let restart = {
            let mut inner = self.shared.inner.lock();
            inner.config.poll_interval = interval;
            inner.notifier_active
        };
        if restart {
            self.launch_poll_session(false);
        }
        Ok(())
    }

    /// Tell the monitor whether the owning application is backgrounded.
    ///
    /// With a background poll interval configured, a running notifier
    /// switches to it (and back) by rescheduling; without one this only
    /// records the mode.
    pub fn set_backgrounded(&self, backgrounded: bool) {
        let restart = {
            let mut inner = self.shared.inner.lock();
            if inner.backgrounded == backgrounded {
                return;
            }
            inner.backgrounded = backgrounded;
            inner.notifier_active && inner.config.background_poll_interval.is_some()
        };
        if restart {
            self.launch_poll_session(false);
        }
    }

    /// Cancel any current poll session and start a new one at the current
    /// epoch+1. `announce` publishes [`Status::Determining`] for the
    /// idle→checking transition; swaps and reschedules keep quiet until
    /// their first verdict.
    fn launch_poll_session(&self, announce: bool) {
        let (epoch, probe, interval, timeout, cancel_rx) = {
            let mut inner = self.shared.inner.lock();
            if let Some(cancel) = inner.cancel.take() {
                let _ = cancel.send(());
            }
            inner.epoch += 1;
            if announce {
                inner.observing = false;
                inner.status = Status::Determining;
                self.shared.dispatcher.enqueue(Status::Determining);
            }
            let (cancel_tx, cancel_rx) = oneshot::channel();
            inner.cancel = Some(cancel_tx);
            (
                inner.epoch,
                inner.probe.clone(),
                effective_interval(&inner),
                inner.config.probe_timeout,
                cancel_rx,
            )
        };
        self.shared.dispatcher.drain();

        let shared = self.shared.clone();
        runtime::spawn(async move {
            poll_loop(shared, probe, interval, timeout, epoch, cancel_rx).await;
        });
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default()).expect("default configuration is valid")
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        // Ownership of the polling task ends here: cancel the schedule and
        // invalidate the epoch so nothing publishes after teardown.
        let mut inner = self.shared.inner.lock();
        inner.notifier_active = false;
        inner.observing = false;
        inner.epoch += 1;
        if let Some(cancel) = inner.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl std::fmt::Debug for ConnectivityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("ConnectivityMonitor")
            .field("status", &inner.status)
            .field("strategy", &inner.strategy_kind)
            .field("state", &monitor_state(&inner))
            .finish()
    }
}

impl Shared {
    async fn run_one_shot(self: Arc<Self>) -> Status {
        let (probe, timeout, epoch, announce) = {
            let mut inner = self.inner.lock();
            let announce = !inner.notifier_active && inner.oneshots_in_flight == 0;
            inner.oneshots_in_flight += 1;
            if announce {
                inner.status = Status::Determining;
                self.dispatcher.enqueue(Status::Determining);
            }
            (
                inner.probe.clone(),
                inner.config.probe_timeout,
                inner.epoch,
                announce,
            )
        };
        if announce {
            self.dispatcher.drain();
        }

        let status = run_check(&probe, timeout).await;
        self.publish(status, epoch, false);

        self.inner.lock().oneshots_in_flight -= 1;
        status
    }

    /// Record `status` as current if `epoch` is still live, notifying
    /// observers when the value changed. Returns `false` when the check was
    /// superseded and its result discarded. Only poll ticks (`from_poll`)
    /// move the notifier from checking to observing.
    fn publish(&self, status: Status, epoch: u64, from_poll: bool) -> bool {
        {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch {
                tracing::trace!(
                    target: "uplink::monitor",
                    %status,
                    "discarding result from superseded check"
                );
                return false;
            }
            if from_poll && inner.notifier_active && !status.is_determining() {
                inner.observing = true;
            }
            if inner.status == status {
                return true;
            }
            inner.status = status;
            self.dispatcher.enqueue(status);
        }
        self.dispatcher.drain();
        true
    }
}

fn monitor_state(inner: &Inner) -> MonitorState {
    if inner.notifier_active {
        if inner.observing {
            MonitorState::Observing
        } else {
            MonitorState::Checking
        }
    } else if inner.oneshots_in_flight > 0 {
        MonitorState::Checking
    } else {
        MonitorState::Idle
    }
}

fn effective_interval(inner: &Inner) -> Duration {
    if inner.backgrounded {
        inner
            .config
            .background_poll_interval
            .unwrap_or(inner.config.poll_interval)
    } else {
        inner.config.poll_interval
    }
}

fn build_probe(kind: StrategyKind, config: &MonitorConfig) -> Arc<dyn ProbeStrategy> {
    match kind {
        StrategyKind::Passive => Arc::new(PassiveLinkStrategy::new()),
        StrategyKind::Active => Arc::new(ActiveProbeStrategy::with_endpoints(
            config.endpoints.clone(),
        )),
    }
}

/// One probe+classify cycle. Probe failures are data: they fold into a
/// status here and are never surfaced to observers as errors.
async fn run_check(probe: &Arc<dyn ProbeStrategy>, timeout: Duration) -> Status {
    // Outer bound in case a strategy ignores the timeout it was handed.
    match tokio::time::timeout(timeout + PROBE_GRACE, probe.probe(timeout)).await {
        Ok(Ok(result)) => classify(&result),
        Ok(Err(err)) => {
            tracing::warn!(
                target: "uplink::monitor",
                strategy = probe.name(),
                %err,
                "probe failed; treating as not connected"
            );
            Status::NotConnected
        }
        Err(_) => {
            tracing::warn!(
                target: "uplink::monitor",
                strategy = probe.name(),
                "probe overran its timeout; treating as not connected"
            );
            Status::NotConnected
        }
    }
}

async fn poll_loop(
    shared: Arc<Shared>,
    probe: Arc<dyn ProbeStrategy>,
    interval: Duration,
    timeout: Duration,
    epoch: u64,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    tracing::debug!(
        target: "uplink::monitor",
        strategy = probe.name(),
        interval_ms = interval.as_millis() as u64,
        "notifier polling started"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Cancellation must win over a tick that became ready at the
            // same instant.
            biased;

            _ = &mut cancel_rx => {
                tracing::debug!(target: "uplink::monitor", "notifier polling cancelled");
                return;
            }
            _ = ticker.tick() => {
                let status = run_check(&probe, timeout).await;
                if !shared.publish(status, epoch, true) {
                    // A newer session owns publication now.
                    return;
                }
            }
        }
    }
}
