use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "ocean";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS class used for log entries sent by this party.
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "msg-user",
            Sender::Bot => "msg-bot",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preference {
    pub theme: String,
    pub dark_mode: bool,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            dark_mode: false,
        }
    }
}
