//! Page controller: wires preferences, the clock and the chat relay to the page.
//!
//! The controller owns its collaborators and never touches globals, so the
//! hosting shell decides what storage, page, clock and network it runs on.
//! All handlers take `&self`; the shell shares one controller (usually in an
//! `Rc`) between event handlers and spawned tasks.

use crate::chat::{CHAT_ERROR_MESSAGE, ChatTransport, build_chat_request, parse_chat_response};
use crate::clock::{Clock, format_clock_string, local_year};
use crate::config::PageConfig;
use crate::document::{DARK_CLASS, Document, ElementId, THEME_ATTRIBUTE};
use crate::error::StorageError;
use crate::preference::{DARK_KEY, THEME_KEY, format_dark_flag, parse_preference};
use crate::storage::PreferenceStore;
use crate::types::{ChatMessage, Preference};

/// What a chat submission did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Nothing to send, or the page has no chat panel.
    Ignored,
    /// The service answered; carries the bot message that was appended.
    Replied(ChatMessage),
    /// The request or its decoding failed; carries the fallback bot message.
    Failed(ChatMessage),
}

pub struct PageController<S, D, C, T> {
    store: S,
    document: D,
    clock: C,
    transport: T,
    config: PageConfig,
}

impl<S, D, C, T> PageController<S, D, C, T>
where
    S: PreferenceStore,
    D: Document,
    C: Clock,
    T: ChatTransport,
{
    pub fn new(store: S, document: D, clock: C, transport: T, config: PageConfig) -> Self {
        Self {
            store,
            document,
            clock,
            transport,
            config,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Apply the stored preference to the page and render the first clock
    /// tick. Called once by the hosting shell; never fails.
    pub fn initialize(&self) -> Preference {
        if self.document.has_element(ElementId::Year) {
            let year = local_year(self.clock.now());
            self.document.set_text(ElementId::Year, &year.to_string());
        }

        let preference = self.load_preference();

        self.document
            .set_root_attribute(THEME_ATTRIBUTE, &preference.theme);
        self.document.set_value(ElementId::ThemeSelect, &preference.theme);

        if preference.dark_mode {
            self.document.set_body_class(DARK_CLASS, true);
            self.document.set_checked(ElementId::DarkModeToggle, true);
        }

        self.refresh_clock();

        tracing::debug!(
            theme = %preference.theme,
            dark_mode = preference.dark_mode,
            "page initialized"
        );
        preference
    }

    fn load_preference(&self) -> Preference {
        let theme = self.read_key(THEME_KEY);
        let dark = self.read_key(DARK_KEY);
        parse_preference(theme, dark)
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "preference read failed, using default");
                None
            }
        }
    }

    /// The theme value is applied as given; unknown names are not rejected.
    pub fn on_theme_change(&self, theme: &str) -> Result<(), StorageError> {
        self.document.set_root_attribute(THEME_ATTRIBUTE, theme);
        self.document.set_value(ElementId::ThemeSelect, theme);
        self.persist(THEME_KEY, theme)
    }

    pub fn on_dark_mode_change(&self, enabled: bool) -> Result<(), StorageError> {
        self.document.set_body_class(DARK_CLASS, enabled);
        self.document.set_checked(ElementId::DarkModeToggle, enabled);
        self.persist(DARK_KEY, format_dark_flag(enabled))
    }

    fn persist(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.set(key, value).inspect_err(|err| {
            tracing::warn!(key, error = %err, "preference was not persisted");
        })
    }

    /// Write the current time into the clock element, if the page has one.
    pub fn refresh_clock(&self) {
        if !self.document.has_element(ElementId::Time) {
            return;
        }
        let text = format_clock_string(self.clock.now(), &self.config.clock);
        self.document.set_text(ElementId::Time, &text);
    }

    /// Refresh immediately, then once per configured tick, for as long as
    /// the future is polled.
    pub async fn run_clock(&self) {
        let mut interval = tokio::time::interval(self.config.tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.refresh_clock();
        }
    }

    /// Mirror the chat text field into the page.
    pub fn on_chat_input(&self, value: &str) {
        self.document.set_value(ElementId::ChatInput, value);
    }

    /// Send the chat field's text and append the reply.
    ///
    /// There is no in-flight guard: overlapping submissions each append
    /// their reply when it arrives.
    pub async fn submit_chat(&self) -> ChatOutcome {
        let has_panel = [ElementId::ChatForm, ElementId::ChatInput, ElementId::ChatLog]
            .into_iter()
            .all(|id| self.document.has_element(id));
        if !has_panel {
            return ChatOutcome::Ignored;
        }

        let raw = self.document.value(ElementId::ChatInput).unwrap_or_default();
        let text = raw.trim();
        if text.is_empty() {
            return ChatOutcome::Ignored;
        }

        self.document.append_message(ChatMessage::user(text));
        self.document.set_value(ElementId::ChatInput, "");

        let request = build_chat_request(text);
        let reply = self
            .transport
            .send(&request)
            .await
            .and_then(|body| parse_chat_response(&body));

        match reply {
            Ok(reply) => {
                let message = ChatMessage::bot(reply);
                self.document.append_message(message.clone());
                ChatOutcome::Replied(message)
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat relay failed");
                let message = ChatMessage::bot(CHAT_ERROR_MESSAGE);
                self.document.append_message(message.clone());
                ChatOutcome::Failed(message)
            }
        }
    }
}
