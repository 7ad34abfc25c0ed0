use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::reader::{Sensor, SensorReader};
use crate::sender::Uplink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Sent,
    SendFailed,
    Skipped,
}

pub struct Monitor<S, U> {
    reader: SensorReader<S>,
    uplink: U,
    interval: Duration,
}

impl<S: Sensor, U: Uplink> Monitor<S, U> {
    pub fn new(reader: SensorReader<S>, uplink: U, interval: Duration) -> Self {
        Monitor {
            reader,
            uplink,
            interval,
        }
    }

    pub async fn cycle(&mut self) -> Cycle {
        let reading = match self.reader.read().await {
            Some(reading) => reading,
            None => {
                info!("Skipping this cycle due to sensor error");
                return Cycle::Skipped;
            }
        };

        info!("Read: {}, {}", reading.temperature, reading.humidity);

        match self.uplink.send(&reading).await {
            Ok(()) => Cycle::Sent,
            Err(_) => Cycle::SendFailed,
        }
    }

    /// Polls until `shutdown` resolves, then releases the sensor. A cycle in
    /// flight when the signal arrives is abandoned.
    pub async fn run_until<F: Future>(mut self, shutdown: F) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.cycle_then_wait() => {}
            }
        }

        self.reader.release();
        info!("Temperature monitor stopped");
    }

    async fn cycle_then_wait(&mut self) {
        self.cycle().await;
        sleep(self.interval).await;
    }
}
