//! Domain error types.

/// Top-level error type for tradestat.
#[derive(Debug, thiserror::Error)]
pub enum TradestatError {
    #[error("invalid price data: {reason}")]
    InvalidInput { reason: String },

    #[error("no data found for {symbol}")]
    NoData { symbol: String },

    #[error("no data loaded, load a price series first")]
    NotLoaded,

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TradestatError {
    /// Process exit status used by the CLI for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            TradestatError::Io(_) => 1,
            TradestatError::ConfigParse { .. } | TradestatError::ConfigInvalid { .. } => 2,
            TradestatError::DataSource { .. } => 3,
            TradestatError::InvalidInput { .. } => 4,
            TradestatError::NoData { .. } => 5,
            TradestatError::NotLoaded => 6,
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        TradestatError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn data_source(reason: impl Into<String>) -> Self {
        TradestatError::DataSource {
            reason: reason.into(),
        }
    }
}

impl From<&TradestatError> for std::process::ExitCode {
    fn from(err: &TradestatError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
