pub struct ThemeDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub css: &'static str,
}

pub const THEMES: &[ThemeDefinition] = &[
    ThemeDefinition {
        name: "ocean",
        label: "Ocean",
        css: OCEAN_THEME,
    },
    ThemeDefinition {
        name: "sunset",
        label: "Sunset",
        css: SUNSET_THEME,
    },
    ThemeDefinition {
        name: "forest",
        label: "Forest",
        css: FOREST_THEME,
    },
    ThemeDefinition {
        name: "midnight",
        label: "Midnight",
        css: MIDNIGHT_THEME,
    },
];

/// All theme palettes, the dark-mode override and the page layout, in cascade order.
pub fn page_stylesheet() -> String {
    let mut css = String::from(BASE_STYLES);
    for theme in THEMES {
        css.push_str(theme.css);
    }
    css.push_str(DARK_MODE);
    css
}

const BASE_STYLES: &str = r#"
.page {
    --color-bg-primary: #f7f9fb;
    --color-text-primary: #16202a;
    --color-accent: #2f6fde;
    --color-surface: #ffffff;
    --color-border: #d5dde5;
    --color-chat-user-bg: var(--color-accent);
    --color-chat-user-text: #ffffff;
    --color-chat-bot-bg: var(--color-surface);
    --color-chat-bot-text: var(--color-text-primary);
    min-height: 100vh;
    background: var(--color-bg-primary);
    color: var(--color-text-primary);
    font-family: system-ui, sans-serif;
}
.header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; border-bottom: 1px solid var(--color-border); }
.controls { display: flex; gap: 1rem; align-items: center; }
.clock { font-variant-numeric: tabular-nums; direction: ltr; }
.chat { max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
.chat-log { display: flex; flex-direction: column; gap: 0.5rem; max-height: 24rem; overflow-y: auto; padding: 1rem; border: 1px solid var(--color-border); background: var(--color-surface); }
.msg-user { align-self: flex-end; background: var(--color-chat-user-bg); color: var(--color-chat-user-text); padding: 0.4rem 0.8rem; border-radius: 0.8rem; }
.msg-bot { align-self: flex-start; background: var(--color-chat-bot-bg); color: var(--color-chat-bot-text); border: 1px solid var(--color-border); padding: 0.4rem 0.8rem; border-radius: 0.8rem; }
.chat-form { display: flex; gap: 0.5rem; margin-top: 0.5rem; }
.chat-form input { flex: 1; padding: 0.5rem; border: 1px solid var(--color-border); }
.footer { text-align: center; padding: 2rem; color: var(--color-border); }
"#;

const OCEAN_THEME: &str = r#"
.page[data-theme="ocean"] {
    --color-bg-primary: #eef6fb;
    --color-accent: #1f78b4;
    --color-border: #b9d6ea;
}
"#;

const SUNSET_THEME: &str = r#"
.page[data-theme="sunset"] {
    --color-bg-primary: #fff4ec;
    --color-accent: #e4572e;
    --color-border: #f3c4a8;
}
"#;

const FOREST_THEME: &str = r#"
.page[data-theme="forest"] {
    --color-bg-primary: #f1f7ef;
    --color-accent: #2e7d32;
    --color-border: #bfd9bb;
}
"#;

const MIDNIGHT_THEME: &str = r#"
.page[data-theme="midnight"] {
    --color-bg-primary: #e9e9f4;
    --color-accent: #3d3b8e;
    --color-border: #c3c2e0;
}
"#;

const DARK_MODE: &str = r#"
.page.dark {
    --color-bg-primary: #0d1117;
    --color-text-primary: #e6edf3;
    --color-surface: #161b22;
    --color-border: #30363d;
}
"#;
