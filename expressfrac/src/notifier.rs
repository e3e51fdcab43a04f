//! Delivery of converged time steps to the caller.

use crate::StepReport;

/// Error raised by a notifier. It aborts the run and is returned to the caller unchanged.
pub type NotifyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives one report per converged time step, in time order.
///
/// `notify` is called synchronously from the solver loop and may block.
pub trait Notifier {
    fn notify(&mut self, report: StepReport) -> Result<(), NotifyError>;
}

impl<F> Notifier for F
where
    F: FnMut(StepReport) -> Result<(), NotifyError>,
{
    fn notify(&mut self, report: StepReport) -> Result<(), NotifyError> {
        self(report)
    }
}

/// Keeps the full history of the run.
impl Notifier for Vec<StepReport> {
    fn notify(&mut self, report: StepReport) -> Result<(), NotifyError> {
        self.push(report);
        Ok(())
    }
}

/// Forwards reports to another thread. Dropping the receiver stops the run at the next step.
impl Notifier for crossbeam_channel::Sender<StepReport> {
    fn notify(&mut self, report: StepReport) -> Result<(), NotifyError> {
        self.send(report)
            .map_err(|_| NotifyError::from("result receiver disconnected"))
    }
}

/// Counts deliveries before forwarding them.
pub(crate) struct CountingNotifier<'a, N: ?Sized> {
    pub inner: &'a mut N,
    pub count: &'a mut usize,
}

impl<'a, N: Notifier + ?Sized> Notifier for CountingNotifier<'a, N> {
    fn notify(&mut self, report: StepReport) -> Result<(), NotifyError> {
        *self.count += 1;
        self.inner.notify(report)
    }
}
