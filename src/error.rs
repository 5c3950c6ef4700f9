use thiserror::Error;

pub type Result<T> = std::result::Result<T, TutorError>;

/// Failures that need a fallback decision from the caller.
///
/// Characters missing from a layout and input past the end of the target
/// are not errors: the resolver returns `None` and the session rejects the
/// keystroke.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("keyboard layout not found: {0}")]
    LayoutNotFound(String),

    #[error("no keyboard layouts registered")]
    NoLayouts,

    #[error("word list for language `{0}` is empty or missing")]
    WordListEmpty(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value `{value}` for setting `{key}`")]
    InvalidSetting { key: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}
