#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed event export: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Analysis(#[from] analysis::Error),
    #[error("cannot read {0:?}, demo support was not compiled in (enable the `demo` feature)")]
    UnsupportedInput(std::path::PathBuf),
    #[error("installing logger: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}
