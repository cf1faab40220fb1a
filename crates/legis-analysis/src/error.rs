use legis_common::anthropic::AnthropicClientError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pdf parse error: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
}

#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    #[error("ERROR: ANTHROPIC_API_KEY is not set.")]
    MissingApiKey,

    #[error(transparent)]
    Client(#[from] AnthropicClientError),

    #[error("model response has no text content")]
    EmptyResponse,

    #[error("model response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
