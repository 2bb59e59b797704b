//! UI state machine.
//!
//! ```text
//! Idle ──submit──▶ Loading ──resolve──▶ Showing | Error
//!                     ▲                      │
//!                     └────────submit────────┘
//! ```
//!
//! An unparseable submission goes straight to `Error` without a request.
//! Every dispatched request gets a sequence number; only the reply to the
//! latest one is applied, so the last submission always decides what stays
//! on screen no matter in which order the replies arrive.

use crate::backend::Event;
use crate::error::FetchError;
use crate::repo::{RepoIdentity, parse_repo_input};
use crate::types::Issue;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Showing(Issue),
}

/// Which of the three mutually exclusive regions is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub loading: bool,
    pub error: bool,
    pub issue: bool,
}

impl UiState {
    pub fn visibility(&self) -> Visibility {
        Visibility {
            loading: matches!(self, UiState::Loading),
            error: matches!(self, UiState::Error(_)),
            issue: matches!(self, UiState::Showing(_)),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn issue(&self) -> Option<&Issue> {
        match self {
            UiState::Showing(issue) => Some(issue),
            _ => None,
        }
    }
}

/// Outcome of a submit: either nothing to send, or a request to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Rejected,
    Dispatch { seq: u64, repo: RepoIdentity },
}

/// Owns the current `UiState` and every transition out of it.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: UiState,
    latest_seq: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == UiState::Loading
    }

    /// Handle the submit trigger for the raw input text.
    pub fn submit(&mut self, raw: &str) -> Submission {
        match parse_repo_input(raw) {
            Ok(repo) => {
                self.latest_seq += 1;
                self.state = UiState::Loading;
                tracing::debug!("submit[{}]: {repo}", self.latest_seq);
                Submission::Dispatch {
                    seq: self.latest_seq,
                    repo,
                }
            }
            Err(e) => {
                tracing::debug!("submit: rejected {raw:?}");
                self.state = UiState::Error(FetchError::from(e).to_string());
                Submission::Rejected
            }
        }
    }

    /// Apply the reply for submission `seq`.
    ///
    /// Returns `false` when the reply is stale and was dropped.
    pub fn resolve(&mut self, seq: u64, result: Result<Issue, FetchError>) -> bool {
        if seq != self.latest_seq || !self.is_loading() {
            tracing::debug!("resolve[{seq}]: stale, latest is {}", self.latest_seq);
            return false;
        }
        self.state = match result {
            Ok(issue) => UiState::Showing(issue),
            Err(e) => {
                tracing::warn!("resolve[{seq}]: {e:?}");
                UiState::Error(e.to_string())
            }
        };
        true
    }

    pub fn handle_event(&mut self, event: Event) -> bool {
        let seq = event.seq();
        self.resolve(seq, event.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;

    fn issue() -> Issue {
        Issue {
            number: 42,
            title: "Bug".into(),
            html_url: "https://github.com/octocat/Hello-World/issues/42".into(),
            labels: vec![Label {
                name: "bug".into(),
                color: "ff0000".into(),
            }],
        }
    }

    fn dispatched_seq(sub: Submission) -> u64 {
        match sub {
            Submission::Dispatch { seq, .. } => seq,
            Submission::Rejected => panic!("expected a dispatch"),
        }
    }

    #[test]
    fn starts_idle_with_nothing_visible() {
        let c = Controller::new();
        assert_eq!(c.state(), &UiState::Idle);
        assert_eq!(c.state().visibility(), Visibility::default());
    }

    #[test]
    fn invalid_input_shows_error_without_dispatch() {
        let mut c = Controller::new();
        assert_eq!(c.submit("not a url"), Submission::Rejected);
        assert_eq!(c.state(), &UiState::Error("invalid repo url".into()));
        let vis = c.state().visibility();
        assert!(vis.error && !vis.issue && !vis.loading);
    }

    #[test]
    fn valid_input_enters_loading() {
        let mut c = Controller::new();
        let sub = c.submit("https://github.com/octocat/Hello-World");
        assert_eq!(
            sub,
            Submission::Dispatch {
                seq: 1,
                repo: RepoIdentity::new("octocat", "Hello-World"),
            }
        );
        assert!(c.is_loading());
    }

    #[test]
    fn success_shows_issue() {
        let mut c = Controller::new();
        let seq = dispatched_seq(c.submit("octocat/Hello-World"));
        assert!(c.resolve(seq, Ok(issue())));
        assert_eq!(c.state().issue(), Some(&issue()));
        let vis = c.state().visibility();
        assert!(vis.issue && !vis.error && !vis.loading);
    }

    #[test]
    fn failure_shows_error_and_hides_issue() {
        let mut c = Controller::new();
        let seq = dispatched_seq(c.submit("octocat/Hello-World"));
        c.resolve(seq, Ok(issue()));

        let seq = dispatched_seq(c.submit("octocat/Hello-World"));
        assert!(!c.state().visibility().issue);
        c.resolve(seq, Err(FetchError::MalformedResponse));
        assert_eq!(
            c.state().error_message(),
            Some(crate::error::MALFORMED_RESPONSE_MESSAGE)
        );
        assert!(!c.state().visibility().issue);
    }

    #[test]
    fn invalid_submit_after_issue_hides_it() {
        let mut c = Controller::new();
        let seq = dispatched_seq(c.submit("octocat/Hello-World"));
        c.resolve(seq, Ok(issue()));
        c.submit("");
        assert!(c.state().issue().is_none());
    }

    #[test]
    fn stale_reply_is_dropped() {
        let mut c = Controller::new();
        let first = dispatched_seq(c.submit("octocat/Hello-World"));
        let second = dispatched_seq(c.submit("rust-lang/rust"));
        assert!(second > first);

        // The second reply lands first, then the first one straggles in.
        assert!(c.resolve(second, Err(FetchError::InvalidInput)));
        assert!(!c.resolve(first, Ok(issue())));
        assert_eq!(c.state(), &UiState::Error("invalid repo url".into()));
    }

    #[test]
    fn reply_after_rejected_submit_is_dropped() {
        let mut c = Controller::new();
        let seq = dispatched_seq(c.submit("octocat/Hello-World"));
        c.submit("garbage");
        assert!(!c.resolve(seq, Ok(issue())));
        assert_eq!(c.state().error_message(), Some("invalid repo url"));
    }

    #[test]
    fn repeated_submission_is_idempotent() {
        let mut c = Controller::new();
        let seq = dispatched_seq(c.submit("https://github.com/octocat/Hello-World"));
        c.resolve(seq, Ok(issue()));
        let first = c.state().clone();

        let seq = dispatched_seq(c.submit("https://github.com/octocat/Hello-World"));
        c.resolve(seq, Ok(issue()));
        assert_eq!(c.state(), &first);
    }

    #[test]
    fn handle_event_routes_by_seq() {
        let mut c = Controller::new();
        let seq = dispatched_seq(c.submit("octocat/Hello-World"));
        assert!(c.handle_event(Event::IssueFetched {
            seq,
            issue: issue()
        }));
        assert!(c.state().visibility().issue);
    }
}
