//! Pure mapping from `UiState` to what the screen shows.
//!
//! Everything here is plain data so it can be checked without a terminal;
//! the iocraft components in `components` only lay it out.

use crossterm::style::Color;

use crate::state::UiState;
use crate::theme::ResolvedTheme;
use crate::types::Issue;

pub const LOADING_TEXT: &str = "fetching a random issue…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLabel {
    pub name: String,
    pub bg: Color,
    pub fg: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIssue {
    pub id: String,
    pub title: String,
    pub url: String,
    pub labels: Vec<RenderedLabel>,
    pub id_fg: Color,
    pub title_fg: Color,
    pub url_fg: Color,
    pub border_fg: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStatus {
    pub text: String,
    pub fg: Color,
}

/// At most one field is `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPanel {
    pub loading: Option<RenderedStatus>,
    pub error: Option<RenderedStatus>,
    pub issue: Option<RenderedIssue>,
}

impl RenderedIssue {
    pub fn build(issue: &Issue, theme: &ResolvedTheme) -> Self {
        let labels = issue
            .labels
            .iter()
            .map(|label| {
                let (bg, fg) = theme.label_colors(label.background());
                RenderedLabel {
                    name: label.name.clone(),
                    bg,
                    fg,
                }
            })
            .collect();
        Self {
            id: issue.id_label(),
            title: issue.title.clone(),
            url: issue.html_url.clone(),
            labels,
            id_fg: theme.paint(theme.faint),
            title_fg: theme.paint(theme.link),
            url_fg: theme.paint(theme.faint),
            border_fg: theme.paint(theme.border),
        }
    }
}

impl RenderedPanel {
    pub fn build(state: &UiState, theme: &ResolvedTheme) -> Self {
        match state {
            UiState::Idle => Self::default(),
            UiState::Loading => Self {
                loading: Some(RenderedStatus {
                    text: LOADING_TEXT.to_owned(),
                    fg: theme.paint(theme.loading),
                }),
                ..Self::default()
            },
            UiState::Error(message) => Self {
                error: Some(RenderedStatus {
                    text: message.clone(),
                    fg: theme.paint(theme.error),
                }),
                ..Self::default()
            },
            UiState::Showing(issue) => Self {
                issue: Some(RenderedIssue::build(issue, theme)),
                ..Self::default()
            },
        }
    }
}

/// Plain-text issue card for non-interactive output.
pub fn plain_lines(issue: &Issue) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", issue.id_label(), issue.title),
        issue.html_url.clone(),
    ];
    if !issue.labels.is_empty() {
        let names: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
        lines.push(format!("labels: {}", names.join(", ")));
    }
    lines
}
