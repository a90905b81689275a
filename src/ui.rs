use crate::chat::HttpTransport;
use crate::clock::SystemClock;
use crate::config::PageConfig;
use crate::controller::PageController;
use crate::document::{Appearance, Document, ElementId, PageState};
use crate::storage::{PlatformStore, platform_store};
use crate::theme::page_stylesheet;
use crate::types::ChatMessage;
use crate::views::{ChatPanel, PreferenceControls};
use dioxus::prelude::*;
use std::ops::Deref;
use std::rc::Rc;

/// Page surface backed by a Dioxus signal; every write re-renders the page.
///
/// Reads go through `peek` so the controller never subscribes the calling
/// scope to the page state.
#[derive(Clone, Copy)]
pub struct SignalDocument {
    page: Signal<PageState>,
}

impl SignalDocument {
    pub fn new(page: Signal<PageState>) -> Self {
        Self { page }
    }

    fn update(&self, f: impl FnOnce(&mut PageState)) {
        let mut page = self.page;
        page.with_mut(f);
    }
}

impl Document for SignalDocument {
    fn has_element(&self, id: ElementId) -> bool {
        self.page.peek().elements.contains_key(&id)
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
        self.page
            .peek()
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

pub type ShellController = PageController<PlatformStore, SignalDocument, SystemClock, HttpTransport>;

/// Shared handle to the page controller, provided as context to the views.
#[derive(Clone)]
pub struct PageHandle(Rc<ShellController>);

impl Deref for PageHandle {
    type Target = ShellController;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[component]
pub fn App() -> Element {
    let page = use_signal(PageState::full);

    let handle = use_hook(move || {
        let config = PageConfig::from_env();
        let transport = HttpTransport::new(config.chat_endpoint.clone());
        let controller = PageController::new(
            platform_store(),
            SignalDocument::new(page),
            SystemClock,
            transport,
            config,
        );
        PageHandle(Rc::new(controller))
    });
    use_context_provider(|| handle.clone());

    use_page_startup(handle.clone());

    // Only theme or class changes re-render the frame.
    let appearance = use_memo(move || page.read().appearance());
    let Appearance { theme, classes } = appearance();
    let stylesheet = page_stylesheet();

    rsx! {
        style { dangerous_inner_html: "{stylesheet}" }
        div { class: "page {classes}", "data-theme": "{theme}",
            PageHeader { page }
            ChatPanel { page }
            PageFooter { page }
        }
    }
}

/// Initialize once after the first render, then keep the clock ticking.
fn use_page_startup(handle: PageHandle) {
    let init_handle = handle.clone();
    use_effect(move || {
        init_handle.initialize();
    });

    use_future(move || {
        let handle = handle.clone();
        async move { handle.run_clock().await }
    });
}

#[component]
fn PageHeader(page: Signal<PageState>) -> Element {
    let time = use_memo(move || page.read().text_of(ElementId::Time));
    rsx! {
        header { class: "header",
            h1 { "Amirhossein Naderi" }
            div { class: "controls",
                span { id: ElementId::Time.dom_id(), class: "clock", "{time}" }
                PreferenceControls { page }
            }
        }
    }
}

#[component]
fn PageFooter(page: Signal<PageState>) -> Element {
    let year = use_memo(move || page.read().text_of(ElementId::Year));
    rsx! {
        footer { class: "footer",
            "© "
            span { id: ElementId::Year.dom_id(), "{year}" }
        }
    }
}
