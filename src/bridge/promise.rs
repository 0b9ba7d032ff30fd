use std::sync::mpsc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::BridgeError;

/// Failure half of a bridge response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl Rejection {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Rejection { code: code.into(), message: message.into() }
    }
}

impl From<BridgeError> for Rejection {
    fn from(err: BridgeError) -> Self {
        Rejection::new(err.code(), err.to_string())
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

pub type Outcome = Result<Value, Rejection>;

/// Send half of a one-shot response.
///
/// `resolve` and `reject` consume the promise, so a request can be answered
/// at most once. Dropping it unanswered is reported to the waiting side as
/// `E_NO_RESPONSE`.
pub struct Promise {
    tx: mpsc::Sender<Outcome>,
}

/// Receive half of a one-shot response.
pub struct PendingResult {
    rx: mpsc::Receiver<Outcome>,
}

impl Promise {
    pub fn channel() -> (Promise, PendingResult) {
        let (tx, rx) = mpsc::channel();
        (Promise { tx }, PendingResult { rx })
    }

    pub fn resolve(self, value: Value) {
        self.settle(Ok(value));
    }

    pub fn reject(self, rejection: impl Into<Rejection>) {
        self.settle(Err(rejection.into()));
    }

    /// Resolves or rejects from a bridge result.
    pub fn complete(self, result: Result<Value, BridgeError>) {
        self.settle(result.map_err(Rejection::from));
    }

    fn settle(self, outcome: Outcome) {
        // The receiver may have given up (timeout); nothing left to notify.
        if self.tx.send(outcome).is_err() {
            log::debug!("promise settled after its receiver went away");
        }
    }
}

impl PendingResult {
    /// Blocks until the promise is settled or dropped.
    pub fn wait(self) -> Outcome {
        self.rx.recv().unwrap_or_else(|_| Err(no_response()))
    }

    pub fn wait_timeout(self, timeout: Duration) -> Outcome {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(Rejection::new(
                "E_TIMEOUT",
                format!("no response within {} ms", timeout.as_millis()),
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(no_response()),
        }
    }
}

fn no_response() -> Rejection {
    Rejection::new("E_NO_RESPONSE", "promise dropped without a response")
}
