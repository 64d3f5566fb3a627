use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Domain validation errors
    #[error("Invalid room id: {0}")]
    InvalidRoomId(String),

    #[error("Unknown device kind: {0}")]
    UnknownDeviceKind(String),

    #[error("Invalid device state: {0}")]
    InvalidDeviceState(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Angle {degrees} out of range ({min}..={max})")]
    AngleOutOfRange { degrees: i16, min: i16, max: i16 },

    // Hardware errors
    #[error("Hardware fault: {0}")]
    Hardware(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration key: {0}")]
    MissingConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
