use std::sync::{Arc, Mutex};
use std::time::Duration;

use iocraft::prelude::*;

use crate::backend::{EngineHandle, PendingReply};
use crate::components::issue_card::IssueCard;
use crate::components::status::{ErrorBanner, LoadingIndicator};
use crate::components::text_input::{self, RenderedTextInput, TextInput};
use crate::render::RenderedPanel;
use crate::state::{Controller, Submission};
use crate::theme::ResolvedTheme;

const PROMPT: &str = "repo:";
const HINT: &str = "enter: random issue • ctrl-u: clear • esc: quit";
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Reply slot of the latest submission. Replacing it drops the receiver of
/// the previous one, so its reply is never read.
type PendingSlot = Arc<Mutex<Option<PendingReply>>>;

/// Parse the input, update the controller and send the request if any.
fn submit(
    controller: &mut Controller,
    raw: &str,
    engine: Option<&EngineHandle>,
    pending: &PendingSlot,
) {
    if let Submission::Dispatch { seq, repo } = controller.submit(raw)
        && let Some(engine) = engine
    {
        let reply = engine.fetch_random_issue(seq, repo);
        if let Ok(mut slot) = pending.lock() {
            *slot = Some(reply);
        }
    }
}

// ---------------------------------------------------------------------------
// Root App component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct AppProps<'a> {
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    /// Text the input starts with, e.g. the repo detected from `git remote`.
    pub initial_input: Option<String>,
    /// Submit `initial_input` as soon as the app starts.
    pub submit_on_start: bool,
    /// Shown in the header so it is clear which backend answers.
    pub server_label: Option<String>,
}

#[component]
pub fn App<'a>(props: &AppProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let mut should_exit = hooks.use_state(|| false);

    let theme = props.theme.cloned().unwrap_or_default();
    let initial_input = props.initial_input.clone().unwrap_or_default();
    let mut input = hooks.use_state(move || initial_input);
    let mut controller = hooks.use_state(Controller::new);

    // Reply slot: the engine answers the latest submission here.
    let pending_state = hooks.use_state(PendingSlot::default);
    let pending = pending_state.read().clone();
    let engine: Option<EngineHandle> = props.engine.cloned();

    // One-shot submit of the prefilled input.
    let mut started = hooks.use_state(|| false);
    if props.submit_on_start && !started.get() {
        started.set(true);
        let mut c = controller.read().clone();
        submit(&mut c, &input.read(), engine.as_ref(), &pending);
        controller.set(c);
    }

    // Reply polling: feed the answer (or the engine's disappearance) to
    // the controller.
    {
        let pending_for_poll = pending.clone();
        hooks.use_future(async move {
            loop {
                smol::Timer::after(EVENT_POLL_INTERVAL).await;
                let event = {
                    let Ok(mut slot) = pending_for_poll.lock() else {
                        continue;
                    };
                    let Some(event) = slot.as_ref().and_then(PendingReply::poll) else {
                        continue;
                    };
                    *slot = None;
                    event
                };
                let mut c = controller.read().clone();
                if c.handle_event(event) {
                    controller.set(c);
                }
            }
        });
    }

    // Keyboard handling.
    hooks.use_terminal_events({
        let engine = engine.clone();
        let pending = pending.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => match code {
                KeyCode::Esc => should_exit.set(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    should_exit.set(true);
                }
                KeyCode::Enter => {
                    let raw = input.read().clone();
                    let mut c = controller.read().clone();
                    submit(&mut c, &raw, engine.as_ref(), &pending);
                    controller.set(c);
                }
                _ => {
                    let current = input.read().clone();
                    if let Some(next) = text_input::edit_buffer(&current, code, modifiers) {
                        input.set(next);
                    }
                }
            },
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let panel = RenderedPanel::build(controller.read().state(), &theme);
    let rendered_input = RenderedTextInput::build(PROMPT, &input.read(), HINT, &theme);
    let header = match &props.server_label {
        Some(server) => format!("issuemyst  ·  {server}"),
        None => "issuemyst".to_owned(),
    };
    let header_fg = theme.paint(theme.faint);

    element! {
        View(
            width: u32::from(width),
            height: u32::from(height),
            flex_direction: FlexDirection::Column,
        ) {
            View(padding_left: 1, padding_right: 1) {
                Text(content: header, color: header_fg, wrap: TextWrap::NoWrap)
            }
            TextInput(input: rendered_input)
            LoadingIndicator(status: panel.loading)
            ErrorBanner(status: panel.error)
            IssueCard(card: panel.issue)
        }
    }
}
