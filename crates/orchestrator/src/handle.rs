//! Background runs delivered over a caller-owned channel.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use tfuse_fusion::{FusionStrategy, Image};
use tfuse_wavelet::WaveletFamily;
use tracing::debug;

use crate::config::OrchestratorConfig;
use crate::error::OrchestratorError;
use crate::report::MetricReport;
use crate::run::run;

type Outcome = Result<MetricReport, OrchestratorError>;

/// Receiving end of a run started with [`spawn_run`].
///
/// The report is delivered exactly once.
pub struct ReportHandle {
    receiver: Receiver<Outcome>,
}

impl ReportHandle {
    /// Returns the outcome if the run has finished, `None` otherwise.
    ///
    /// After the outcome has been taken, further calls return
    /// [`OrchestratorError::Disconnected`].
    pub fn try_result(&self) -> Option<Outcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(OrchestratorError::Disconnected)),
        }
    }

    /// Blocks until the run finishes.
    ///
    /// # Errors
    ///
    /// Returns the run's own error, or [`OrchestratorError::Disconnected`]
    /// if the worker thread died before sending.
    pub fn wait(self) -> Outcome {
        self.receiver
            .recv()
            .map_err(|_| OrchestratorError::Disconnected)?
    }
}

/// Runs [`run`] on a dedicated thread.
///
/// The inputs move into the worker; the outcome comes back through the
/// returned handle.
pub fn spawn_run(
    a: Image,
    b: Image,
    strategy: FusionStrategy,
    family: WaveletFamily,
    config: OrchestratorConfig,
) -> ReportHandle {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let outcome = run(&a, &b, strategy, family, &config);
        if sender.send(outcome).is_err() {
            debug!(strategy = %strategy, "report handle dropped before delivery");
        }
    });
    ReportHandle { receiver }
}
