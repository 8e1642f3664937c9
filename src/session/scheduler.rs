/// Cancellable scheduled ticks
///
/// Wraps a repeating tick channel in a start/stop handle so timer-driven
/// work is never a raw dangling interval: the session tick and the results
/// poll each own a `Ticker` and drop it to stop. State machines stay
/// deterministic under test by being fed ticks directly.
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};

/// Handle to a repeating tick task. Dropping the handle stops the task.
pub struct Ticker {
    stop_tx: Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Start emitting `()` on `ticks` every `interval` until stopped or
    /// the receiving side goes away.
    pub fn start(interval: Duration, ticks: Sender<()>) -> Self {
        let (stop_tx, stop_rx) = bounded(1);

        let handle = thread::spawn(move || {
            let timer = tick(interval);
            loop {
                select! {
                    recv(timer) -> _ => {
                        if ticks.send(()).is_err() {
                            break;
                        }
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Stop ticking and wait for the task to finish.
    pub fn stop(mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        let _ = self.stop_tx.try_send(());
    }
}
