/// Results polling
///
/// Fetches the public results endpoint on a fixed interval. Each fetch is
/// fire-and-forget with independent success/failure handling: outcomes
/// land in a shared render slot, so a slow response can be overtaken by a
/// newer poll and the last write wins. In-flight fetches are never
/// cancelled; stopping the poller only stops scheduling new ones.
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick};
use parking_lot::Mutex;

use crate::error::ResultsError;

use super::model::ResultsPayload;

/// Blocking client for the results endpoint.
pub struct ResultsClient {
    url: String,
    timeout: Duration,
}

impl ResultsClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch(&self) -> Result<ResultsPayload, ResultsError> {
        let response = match ureq::get(&self.url).timeout(self.timeout).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, _)) => {
                return Err(ResultsError::BadStatus { status })
            }
            Err(e) => return Err(ResultsError::RequestFailed(Box::new(e))),
        };

        response
            .into_json()
            .map_err(|e| ResultsError::ParseFailed(Box::new(e)))
    }
}

#[derive(Debug, Default, Clone)]
struct BoardState {
    latest: Option<ResultsPayload>,
    error: Option<String>,
}

/// The shared render slot. The page renders whatever is here on each
/// display tick; completed fetches overwrite it in completion order.
#[derive(Clone, Default)]
pub struct ResultsBoard {
    inner: Arc<Mutex<BoardState>>,
}

impl ResultsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch succeeded: replace the snapshot and clear the error panel.
    pub fn apply_update(&self, payload: ResultsPayload) {
        let mut state = self.inner.lock();
        state.latest = Some(payload);
        state.error = None;
    }

    /// A fetch failed: raise the error panel. The previous snapshot stays
    /// so the grid keeps showing the last good data; the next successful
    /// poll clears the panel.
    pub fn apply_failure(&self, message: String) {
        self.inner.lock().error = Some(message);
    }

    /// Current snapshot and error panel text.
    pub fn snapshot(&self) -> (Option<ResultsPayload>, Option<String>) {
        let state = self.inner.lock();
        (state.latest.clone(), state.error.clone())
    }
}

/// Runs one fetch and records the outcome.
fn poll_once(client: &ResultsClient, board: &ResultsBoard) {
    match client.fetch() {
        Ok(payload) => {
            log::debug!("Results updated from {}", client.url());
            board.apply_update(payload);
        }
        Err(e) => {
            log::error!("Results fetch failed: {}", e);
            board.apply_failure(e.to_string());
        }
    }
}

/// Handle to the polling schedule. Dropping it stops scheduling new
/// fetches; fetches already in flight run to completion.
pub struct ResultsPoller {
    stop_tx: crossbeam_channel::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ResultsPoller {
    /// Start polling: one fetch immediately, then one per interval.
    pub fn start(client: Arc<ResultsClient>, board: ResultsBoard, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = bounded(1);

        let handle = thread::spawn(move || {
            let timer = tick(interval);

            let first_client = Arc::clone(&client);
            let first_board = board.clone();
            thread::spawn(move || poll_once(&first_client, &first_board));

            loop {
                select! {
                    recv(timer) -> _ => {
                        let client = Arc::clone(&client);
                        let board = board.clone();
                        // Fire and forget; an overlapping slow fetch just
                        // loses the last-write race.
                        thread::spawn(move || poll_once(&client, &board));
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

    pub fn stop(mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ResultsPoller {
    fn drop(&mut self) {
        let _ = self.stop_tx.try_send(());
    }
}
