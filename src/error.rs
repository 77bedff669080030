use std::io;
use thiserror::Error;

/// Problems with values typed into the form or passed on the command line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}: '{value}' is not a valid amount")]
    InvalidAmount { field: String, value: String },
    #[error("{field}: amount must not be negative (got {value})")]
    NegativeAmount { field: String, value: String },
    #[error("{field}: '{value}' is larger than the maximum of 1,000,000,000,000,000")]
    AmountTooLarge { field: String, value: String },
    #[error("{given} variable costs given but only {allowed} allowed")]
    TooManyVariableCosts { given: usize, allowed: usize },
    #[error("variable cost {index} is outside the current count of {count}")]
    VariableIndexOutOfRange { index: usize, count: usize },
}

impl InputError {
    /// Re-label the error with the name of the field it came from
    pub fn for_field(self, field: &str) -> Self {
        match self {
            InputError::InvalidAmount { value, .. } => InputError::InvalidAmount {
                field: field.to_string(),
                value,
            },
            InputError::NegativeAmount { value, .. } => InputError::NegativeAmount {
                field: field.to_string(),
                value,
            },
            InputError::AmountTooLarge { value, .. } => InputError::AmountTooLarge {
                field: field.to_string(),
                value,
            },
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
    #[error("config file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
}

impl AppError {
    /// Process exit status: 2 for bad input, 1 for everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Input(_) => 2,
            AppError::Io(_) | AppError::Config(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let input = AppError::from(InputError::TooManyVariableCosts { given: 3, allowed: 1 });
        assert_eq!(input.exit_code(), 2);
        assert_eq!(input.to_string(), "3 variable costs given but only 1 allowed");

        assert_eq!(AppError::from(ConfigError::NoConfigDir).exit_code(), 1);
        assert_eq!(AppError::from(io::Error::other("boom")).exit_code(), 1);
    }
}
