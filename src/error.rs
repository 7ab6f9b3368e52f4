pub type DistortResult<T> = Result<T, DistortError>;

#[derive(thiserror::Error, Debug)]
pub enum DistortError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DistortError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
