//! Runtime management for async operations.
//!
//! This module provides a lazily-initialized global tokio runtime so that
//! background work can be spawned from synchronous contexts (for example,
//! starting a connectivity notifier from ordinary application code).
//!
//! To see uplink's structured logs, install a `tracing` subscriber in your
//! application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Initialize the global async runtime.
///
/// This should be called early in your application. If not called
/// explicitly, a runtime is created on first use.
pub fn init() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Get a reference to the global async runtime.
///
/// Initializes the runtime if it hasn't been created yet.
pub fn get() -> &'static Runtime {
    init()
}

/// Block on a future using the global runtime.
///
/// This is useful for running async code from synchronous contexts.
///
/// # Warning
///
/// Do not call this from within an async context, as it will block the
/// current thread.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    get().block_on(future)
}

/// Spawn a future on an available runtime.
///
/// When the caller is already inside a tokio runtime (an async task, or a
/// `#[tokio::test]`), the future is spawned there so it shares that
/// runtime's clock and shutdown. Otherwise it goes to the global runtime.
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => handle.spawn(future),
        Err(_) => get().spawn(future),
    }
}
