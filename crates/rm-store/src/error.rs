use thiserror::Error;

use rm_core::{CoreError, RideId, RideStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ride not found: {0}")]
    RideNotFound(RideId),

    #[error("invalid ride: {0}")]
    InvalidRide(String),

    #[error("{id} has {available} free seats, {requested} requested")]
    InsufficientSeats { id: RideId, requested: u32, available: u32 },

    #[error("{id} is {status}, not active")]
    NotActive { id: RideId, status: RideStatus },

    #[error("ride CSV parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
