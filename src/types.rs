// Wire types shared by the engine and the UI layer.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A named, colored tag attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Six hex digits, no leading `#`.
    pub color: String,
}

impl Label {
    /// Background color of the label chip, `None` when the server sent
    /// something that is not a 6-digit hex color.
    pub fn background(&self) -> Option<Rgb> {
        Rgb::from_label_hex(&self.color).ok()
    }
}

/// The randomly chosen open issue returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Issue {
    /// The `[#42]` id tag shown next to the title.
    pub fn id_label(&self) -> String {
        format!("[#{}]", self.number)
    }
}
