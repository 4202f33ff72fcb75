//! Cancellable handle for the sensor polling task.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Owns the background polling loop started by
/// [`Dashboard::start_sensor_polling`](super::Dashboard::start_sensor_polling).
///
/// Dropping the handle does not stop polling; call [`cancel`](Self::cancel)
/// or [`stop`](Self::stop), or shut the dashboard down.
#[derive(Debug)]
pub struct PollingHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollingHandle {
    pub(crate) fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self { token, task }
    }

    /// Stop scheduling further polls. Polls already in flight still complete.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel and wait for the polling loop to exit.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Sensor polling task ended abnormally");
        }
    }
}
