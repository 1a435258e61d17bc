use thiserror::Error;

use crate::core::types::{CityId, UnitId};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("City not found: {0:?}")]
    CityNotFound(CityId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid map: {0}")]
    InvalidMap(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
