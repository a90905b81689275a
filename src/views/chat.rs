use crate::document::{ElementId, PageState};
use crate::ui::PageHandle;
use dioxus::prelude::*;

#[component]
pub fn ChatPanel(page: Signal<PageState>) -> Element {
    let handle = use_context::<PageHandle>();
    let messages = use_memo(move || page.read().log.clone());
    let input = use_memo(move || {
        page.read()
            .element(ElementId::ChatInput)
            .map(|element| element.value.clone())
            .unwrap_or_default()
    });

    let input_handle = handle.clone();
    let submit_handle = handle;

    rsx! {
        section { class: "chat",
            h2 { "Chat with my assistant" }
            div { id: ElementId::ChatLog.dom_id(), class: "chat-log",
                for (i, msg) in messages.read().iter().enumerate() {
                    div {
                        key: "{i}",
                        class: msg.sender.css_class(),
                        // Keep the newest message in view.
                        onmounted: move |ev: MountedEvent| async move {
                            if let Err(err) = ev.data().scroll_to(ScrollBehavior::Smooth).await {
                                tracing::trace!(?err, "chat log scroll skipped");
                            }
                        },
                        "{msg.text}"
                    }
                }
            }
            form {
                id: ElementId::ChatForm.dom_id(),
                class: "chat-form",
                onsubmit: move |ev: FormEvent| {
                    ev.prevent_default();
                    let handle = submit_handle.clone();
                    spawn(async move {
                        handle.submit_chat().await;
                    });
                },
                input {
                    id: ElementId::ChatInput.dom_id(),
                    r#type: "text",
                    autocomplete: "off",
                    placeholder: "Type a message…",
                    value: "{input}",
                    oninput: move |ev: FormEvent| input_handle.on_chat_input(&ev.value()),
                }
                button { class: "btn btn-primary", r#type: "submit", "Send" }
            }
        }
    }
}
