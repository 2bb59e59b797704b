use serde::Deserialize;

use crate::color::Color;

pub const DEFAULT_SERVER_URL: &str = "https://issue.myst.rs";

// ---------------------------------------------------------------------------
// Custom Color deserialization
// ---------------------------------------------------------------------------

/// Deserialize an `Option<Color>` from a TOML string value.
pub(crate) mod color_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::color::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => Color::parse(&s, "<theme>")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin of the random-issue backend; requests go to `<url>/`.
    pub url: String,
    /// Request timeout in seconds. `None` waits for as long as the server does.
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_owned(),
            timeout_secs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(deserialize_with = "color_de::deserialize")]
    pub text: Option<Color>,
    #[serde(deserialize_with = "color_de::deserialize")]
    pub faint: Option<Color>,
    #[serde(deserialize_with = "color_de::deserialize")]
    pub error: Option<Color>,
    #[serde(deserialize_with = "color_de::deserialize")]
    pub loading: Option<Color>,
    #[serde(deserialize_with = "color_de::deserialize")]
    pub link: Option<Color>,
    #[serde(deserialize_with = "color_de::deserialize")]
    pub border: Option<Color>,
}
