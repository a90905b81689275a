use crate::document::{ElementId, PageState};
use crate::theme::THEMES;
use crate::ui::PageHandle;
use dioxus::prelude::*;

#[component]
pub fn PreferenceControls(page: Signal<PageState>) -> Element {
    let handle = use_context::<PageHandle>();
    let controls = use_memo(move || {
        let state = page.read();
        let selected = state
            .element(ElementId::ThemeSelect)
            .map(|element| element.value.clone())
            .unwrap_or_default();
        let dark = state
            .element(ElementId::DarkModeToggle)
            .is_some_and(|element| element.checked);
        (selected, dark)
    });
    let (selected, dark) = controls();

    let theme_handle = handle.clone();
    let dark_handle = handle;

    rsx! {
        select {
            id: ElementId::ThemeSelect.dom_id(),
            value: "{selected}",
            onchange: move |ev: FormEvent| {
                // The controller has logged the failure; the page keeps the
                // new theme for this session.
                if let Err(err) = theme_handle.on_theme_change(&ev.value()) {
                    tracing::debug!(error = %err, "theme applied without saving");
                }
            },
            for theme in THEMES.iter() {
                option {
                    value: theme.name,
                    selected: theme.name == selected,
                    "{theme.label}"
                }
            }
        }
        label { class: "dark-toggle",
            input {
                id: ElementId::DarkModeToggle.dom_id(),
                r#type: "checkbox",
                checked: dark,
                onchange: move |ev: FormEvent| {
                    if let Err(err) = dark_handle.on_dark_mode_change(ev.checked()) {
                        tracing::debug!(error = %err, "dark mode applied without saving");
                    }
                },
            }
            " Dark mode"
        }
    }
}
