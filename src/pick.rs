use crate::backend::EngineHandle;
use crate::state::{Controller, Submission, UiState};

/// Run one submission to completion without a UI and return the final state.
///
/// Blocks the calling thread until the engine replies.
pub fn pick(engine: &EngineHandle, raw: &str) -> UiState {
    let mut controller = Controller::new();
    let Submission::Dispatch { seq, repo } = controller.submit(raw) else {
        return controller.state().clone();
    };

    let reply = engine.fetch_random_issue(seq, repo);
    controller.handle_event(reply.wait());
    controller.state().clone()
}
