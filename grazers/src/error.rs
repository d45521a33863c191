use thiserror::Error;

/// a config that would make the simulation meaningless (or divide by zero)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} has to be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("agent speed has to be finite and non-negative, got {0}")]
    Speed(f64),

    #[error("mutation standard deviation has to be finite and non-negative, got {0}")]
    MutationStdDev(f64),

    #[error("colour jitter has to be within 0..=255, got {0}")]
    ColorJitter(i16),
}
