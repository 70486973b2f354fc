//! Artificial latency for the mocked services.

use std::time::Duration;

/// Suspends for `duration`. A zero duration returns without yielding to a
/// timer, which keeps tests on zero-delay configs immediate.
pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    platform_sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
async fn platform_sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn platform_sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
