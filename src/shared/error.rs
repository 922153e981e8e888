#[derive(thiserror::Error, Debug)]
pub enum PromptError {
    #[error("Terminal I/O error: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Prompt interrupted")]
    Interrupted,

    #[error("Injected value rejected: {0}")]
    InjectedValueRejected(String),

    #[error("internal error: failed to read value")]
    MissingValue,

    #[error("Suggestion store error for {key}: {source}")]
    Store {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid prompt options: {0}")]
    Config(#[source] serde_json::Error),

    #[error("Cannot read prompt options from {path}: {source}")]
    OptionsFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
