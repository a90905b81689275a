pub mod chat;
pub mod settings;

pub use chat::ChatPanel;
pub use settings::PreferenceControls;
