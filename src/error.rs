use thiserror::Error;

#[derive(Debug, Error)]
pub enum CritterError {
    #[error("no pose has been stored; store_current_state must run before restore_state")]
    NoStoredPose,

    #[error("unknown critter part '{0}'")]
    UnknownPart(String),

    #[error("invalid animator config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("invalid animator config: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CritterError>;
