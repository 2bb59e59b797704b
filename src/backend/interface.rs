use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::error::FetchError;
use crate::repo::RepoIdentity;
use crate::types::Issue;

/// Handle to the backend engine held by the UI layer.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(super) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking, returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }

    /// Ask for a random issue of `repo`. The reply for submission `seq`
    /// arrives on the returned `PendingReply`.
    pub fn fetch_random_issue(&self, seq: u64, repo: RepoIdentity) -> PendingReply {
        let (reply_tx, rx) = std::sync::mpsc::channel();
        self.send(Request::FetchRandomIssue {
            seq,
            repo,
            reply_tx,
        });
        PendingReply { seq, rx }
    }
}

/// The reply slot of one submission.
///
/// If the engine drops the request without answering (it stopped or its
/// task died) the slot yields `Event::engine_stopped`, so a caller is never
/// left waiting.
pub struct PendingReply {
    seq: u64,
    rx: Receiver<Event>,
}

impl PendingReply {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Non-blocking. `None` while the engine is still working.
    pub fn poll(&self) -> Option<Event> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Event::engine_stopped(self.seq)),
        }
    }

    /// Block until the engine answers.
    pub fn wait(self) -> Event {
        self.rx
            .recv()
            .unwrap_or_else(|_| Event::engine_stopped(self.seq))
    }
}

/// Trait implemented by both `HttpEngine` and `StubEngine`.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// Operations the UI layer can send to the engine.
pub enum Request {
    FetchRandomIssue {
        /// Submission number, echoed back so stale replies can be dropped.
        seq: u64,
        repo: RepoIdentity,
        reply_tx: Sender<Event>,
    },
    Shutdown,
}

/// Replies the engine pushes back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    IssueFetched { seq: u64, issue: Issue },
    FetchFailed { seq: u64, error: FetchError },
}

impl Event {
    pub fn resolved(seq: u64, result: Result<Issue, FetchError>) -> Self {
        match result {
            Ok(issue) => Event::IssueFetched { seq, issue },
            Err(error) => Event::FetchFailed { seq, error },
        }
    }

    /// Reply for a request the engine dropped without answering.
    pub fn engine_stopped(seq: u64) -> Self {
        Event::FetchFailed {
            seq,
            error: FetchError::Transport("engine stopped".to_owned()),
        }
    }

    pub fn seq(&self) -> u64 {
        match self {
            Event::IssueFetched { seq, .. } | Event::FetchFailed { seq, .. } => *seq,
        }
    }

    pub fn into_result(self) -> Result<Issue, FetchError> {
        match self {
            Event::IssueFetched { issue, .. } => Ok(issue),
            Event::FetchFailed { error, .. } => Err(error),
        }
    }
}
