//! Client-side enhancements for a personal portfolio page: persisted theme
//! and dark-mode preferences, a fixed-zone live clock, and a chat panel that
//! relays messages to a small HTTP backend.
//!
//! [`controller::PageController`] holds the page logic behind injected
//! storage, page, clock and network seams. The Dioxus shell in `ui` drives it
//! on a real page; the `relay` module is the chat backend it talks to.

pub mod chat;
pub mod clock;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod logging;
pub mod preference;
pub mod storage;
pub mod theme;
pub mod types;

#[cfg(not(target_arch = "wasm32"))]
pub mod relay;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
