use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("timed out waiting for line to leave level {level}")]
    Timeout { level: u8 },
    #[error("incomplete frame: got {got} of 40 bits")]
    IncompleteFrame { got: usize },
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    Checksum { expected: u8, actual: u8 },
    #[error("gpio error: {0}")]
    Gpio(#[from] gpio_cdev::errors::Error),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to send data: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}
