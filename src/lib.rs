rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod feedback;
pub mod generator;
pub mod keyboard;
pub mod session;
pub mod timer;
pub mod ui;
