//! The page surface the controller writes to.
//!
//! Every element is optional. Writes aimed at an element the page does not
//! have are dropped, so a page without a clock or chat panel still loads.

use crate::types::{ChatMessage, DEFAULT_THEME};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    ThemeSelect,
    DarkModeToggle,
    Year,
    Time,
    ChatForm,
    ChatInput,
    ChatLog,
}

impl ElementId {
    pub const ALL: [ElementId; 7] = [
        ElementId::ThemeSelect,
        ElementId::DarkModeToggle,
        ElementId::Year,
        ElementId::Time,
        ElementId::ChatForm,
        ElementId::ChatInput,
        ElementId::ChatLog,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::ThemeSelect => "theme-select",
            ElementId::DarkModeToggle => "dark-mode-toggle",
            ElementId::Year => "year",
            ElementId::Time => "iran-time",
            ElementId::ChatForm => "chat-form",
            ElementId::ChatInput => "chat-input",
            ElementId::ChatLog => "chat-log",
        }
    }
}

pub trait Document {
    fn has_element(&self, id: ElementId) -> bool;

    fn set_root_attribute(&self, name: &str, value: &str);

    fn set_body_class(&self, class: &str, present: bool);

    fn set_text(&self, id: ElementId, text: &str);

    fn set_value(&self, id: ElementId, value: &str);

    fn value(&self, id: ElementId) -> Option<String>;

    fn set_checked(&self, id: ElementId, checked: bool);

    /// Appends to the chat log; dropped when the page has no log.
    fn append_message(&self, message: ChatMessage);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementState {
    pub text: String,
    pub value: String,
    pub checked: bool,
}

/// The root theme and body classes, the only page state the outer frame renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appearance {
    pub theme: String,
    pub classes: String,
}

/// Plain data snapshot of the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageState {
    pub root_attributes: BTreeMap<String, String>,
    pub body_classes: BTreeSet<String>,
    pub elements: BTreeMap<ElementId, ElementState>,
    pub log: Vec<ChatMessage>,
}

impl PageState {
    pub fn with_elements(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            elements: ids
                .into_iter()
                .map(|id| (id, ElementState::default()))
                .collect(),
            ..Self::default()
        }
    }

    /// A page carrying every element the controller knows about.
    pub fn full() -> Self {
        Self::with_elements(ElementId::ALL)
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_body_class(&mut self, class: &str, present: bool) {
        if present {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.text = text.to_string();
        } else {
            tracing::trace!(element = id.dom_id(), "text write skipped, element absent");
        }
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.value = value.to_string();
        }
    }

    pub fn set_checked(&mut self, id: ElementId, checked: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.checked = checked;
        }
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        if self.elements.contains_key(&ElementId::ChatLog) {
            self.log.push(message);
        }
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            theme: self
                .root_attribute(THEME_ATTRIBUTE)
                .unwrap_or(DEFAULT_THEME)
                .to_string(),
            classes: self.body_class_list(),
        }
    }

    /// Text of an element, empty when the page lacks it.
    pub fn text_of(&self, id: ElementId) -> String {
        self.element(id)
            .map(|element| element.text.clone())
            .unwrap_or_default()
    }

    /// Body classes joined the way a `class` attribute expects.
    pub fn body_class_list(&self) -> String {
        self.body_classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Shared, lock-guarded page. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct PageDocument {
    state: Arc<Mutex<PageState>>,
}

impl PageDocument {
    pub fn new(state: PageState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> PageState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut PageState)) {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
    }
}

impl Document for PageDocument {
    fn has_element(&self, id: ElementId) -> bool {
        self.state
            .lock()
            .map(|state| state.elements.contains_key(&id))
            .unwrap_or(false)
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.update(|state| state.set_root_attribute(name, value));
    }

    fn set_body_class(&self, class: &str, present: bool) {
        self.update(|state| state.set_body_class(class, present));
    }

    fn set_text(&self, id: ElementId, text: &str) {
        self.update(|state| state.set_text(id, text));
    }

    fn set_value(&self, id: ElementId, value: &str) {
        self.update(|state| state.set_value(id, value));
    }

    fn value(&self, id: ElementId) -> Option<String> {
        self.state
            .lock()
            .ok()?
            .element(id)
            .map(|element| element.value.clone())
    }

    fn set_checked(&self, id: ElementId, checked: bool) {
        self.update(|state| state.set_checked(id, checked));
    }

    fn append_message(&self, message: ChatMessage) {
        self.update(|state| state.append_message(message));
    }
}
