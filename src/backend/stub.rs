use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::{FetchError, NOT_FOUND_MESSAGE};
use crate::repo::RepoIdentity;
use crate::types::Issue;

use super::interface::{Engine, EngineHandle, Event, Request};

/// An engine that serves pre-loaded issues without any network calls.
///
/// Repositories without an entry answer like the backend does for a missing
/// repo: HTTP 404 with the not-found message.
#[derive(Default)]
pub struct StubEngine {
    pub issues: HashMap<RepoIdentity, Issue>,
}

impl StubEngine {
    pub fn with_issue(mut self, repo: RepoIdentity, issue: Issue) -> Self {
        self.issues.insert(repo, issue);
        self
    }
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchRandomIssue {
                    seq,
                    repo,
                    reply_tx,
                } => {
                    let result = self.issues.get(&repo).cloned().ok_or_else(|| {
                        FetchError::Server {
                            status: 404,
                            message: NOT_FOUND_MESSAGE.to_owned(),
                        }
                    });
                    let _ = reply_tx.send(Event::resolved(seq, result));
                }
                Request::Shutdown => break,
            }
        }
    }
}
