//! Timers used by the registration loading flow.

use std::time::Duration;

use fitness::navigation::{REGISTRATION_CALLBACK_DELAY_MS, REGISTRATION_COMPLETE_AFTER_MS};
use fitness::CompletionLatch;

pub(crate) async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Wait for the loading animation to finish, then call `on_complete` once.
/// Later runs sharing the same latch return without calling it.
pub(crate) async fn run_registration_completion(latch: CompletionLatch, on_complete: impl FnOnce()) {
    sleep_ms(REGISTRATION_COMPLETE_AFTER_MS).await;
    if !latch.fire() {
        return;
    }
    sleep_ms(REGISTRATION_CALLBACK_DELAY_MS).await;
    on_complete();
}
