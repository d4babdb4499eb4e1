use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input structure contains no atoms")]
    EmptyInput,

    #[error("Degenerate input geometry: {0}")]
    DegenerateInput(String),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Numeric failure in stage '{stage}': {reason}")]
    Numeric { stage: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_input_or_stage() {
        assert_eq!(
            EngineError::EmptyInput.to_string(),
            "Input structure contains no atoms"
        );
        assert_eq!(
            EngineError::DegenerateInput("flat box".into()).to_string(),
            "Degenerate input geometry: flat box"
        );
        assert_eq!(
            EngineError::Numeric {
                stage: "scoring",
                reason: "NaN center".into(),
            }
            .to_string(),
            "Numeric failure in stage 'scoring': NaN center"
        );
    }
}
