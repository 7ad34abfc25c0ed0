use chrono::Local;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info};

use crate::domain::Reading;
use crate::error::SendError;

/// Where readings go once they are off the sensor.
#[allow(async_fn_in_trait)]
pub trait Uplink {
    async fn send(&self, reading: &Reading) -> Result<(), SendError>;
}

pub struct HttpUplink {
    client: Client,
    url: String,
}

impl HttpUplink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<HttpUplink, SendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpUplink {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, reading: &Reading) -> Result<(), SendError> {
        let response = self.client.post(&self.url).json(reading).send().await?;
        let status = response.status();

        // Anything but a plain 200 counts as rejected, other 2xx included.
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Status { status, body });
        }

        Ok(())
    }
}

impl Uplink for HttpUplink {
    async fn send(&self, reading: &Reading) -> Result<(), SendError> {
        let result = self.post(reading).await;

        match &result {
            Ok(()) => info!(
                "Sent: {}, {} at {}",
                reading.temperature,
                reading.humidity,
                Local::now().format("%H:%M:%S")
            ),
            Err(SendError::Status { status, body }) => {
                error!(status = status.as_u16(), %body, "uplink rejected reading")
            }
            Err(error) => error!(%error, "failed to send data"),
        }

        result
    }
}
