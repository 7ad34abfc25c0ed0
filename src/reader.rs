use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::{MAX_READ_ATTEMPTS, RETRY_DELAY};
use crate::domain::{Reading, Sample};
use crate::error::SensorError;

/// A temperature/humidity source. Any error from `measure` is treated as
/// transient by the reader.
pub trait Sensor {
    fn measure(&mut self) -> Result<Sample, SensorError>;

    /// Give the hardware back. Called once on shutdown.
    fn release(&mut self);
}

pub struct SensorReader<S> {
    sensor: S,
    location: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<S: Sensor> SensorReader<S> {
    pub fn new(sensor: S, location: impl Into<String>) -> Self {
        SensorReader {
            sensor,
            location: location.into(),
            max_attempts: MAX_READ_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay = retry_delay;
        self
    }

    /// Returns `None` once every attempt has failed; a missing field counts
    /// as a failed attempt just like a driver error.
    pub async fn read(&mut self) -> Option<Reading> {
        let max_attempts = self.max_attempts;

        for attempt in 1..=max_attempts {
            match self.sensor.measure() {
                Ok(Sample {
                    temperature: Some(temperature),
                    humidity: Some(humidity),
                }) => return Some(Reading::new(temperature, humidity, self.location.as_str())),
                Ok(_) => warn!(attempt, max_attempts, "sensor returned no value"),
                Err(error) => warn!(%error, attempt, max_attempts, "sensor error"),
            }

            if attempt < max_attempts {
                sleep(self.retry_delay).await;
            }
        }

        error!(max_attempts, "failed to read sensor after all retries");

        None
    }

    pub fn release(&mut self) {
        self.sensor.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{Humidity, Temperature};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use tokio::time::Instant;

    #[derive(Default)]
    pub(crate) struct Log {
        pub measured_at: Vec<Instant>,
        pub releases: u32,
    }

    /// Replays a script of outcomes, then keeps repeating the fallback.
    pub(crate) struct ScriptedSensor {
        script: VecDeque<Result<Sample, SensorError>>,
        fallback: fn() -> Result<Sample, SensorError>,
        pub log: Rc<RefCell<Log>>,
    }

    impl ScriptedSensor {
        pub fn new(
            script: Vec<Result<Sample, SensorError>>,
            fallback: fn() -> Result<Sample, SensorError>,
        ) -> Self {
            ScriptedSensor {
                script: script.into(),
                fallback,
                log: Rc::default(),
            }
        }
    }

    impl Sensor for ScriptedSensor {
        fn measure(&mut self) -> Result<Sample, SensorError> {
            self.log.borrow_mut().measured_at.push(Instant::now());
            self.script.pop_front().unwrap_or_else(self.fallback)
        }

        fn release(&mut self) {
            self.log.borrow_mut().releases += 1;
        }
    }

    pub(crate) fn fault() -> Result<Sample, SensorError> {
        Err(SensorError::Timeout { level: 1 })
    }

    pub(crate) fn valid() -> Result<Sample, SensorError> {
        Ok(Sample::new(Temperature(24.0), Humidity(55.0)))
    }

    fn empty() -> Result<Sample, SensorError> {
        Ok(Sample::default())
    }

    #[tokio::test(start_paused = true)]
    async fn valid_sample_is_returned_unchanged() {
        let sensor = ScriptedSensor::new(vec![], valid);
        let log = sensor.log.clone();
        let mut reader = SensorReader::new(sensor, "Cold Storage - Mumbai");
        let start = Instant::now();

        let reading = reader.read().await;

        assert_eq!(
            reading,
            Some(Reading::new(Temperature(24.0), Humidity(55.0), "Cold Storage - Mumbai"))
        );
        assert_eq!(log.borrow().measured_at.len(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn faults_on_every_attempt_give_nothing_after_two_waits() {
        let sensor = ScriptedSensor::new(vec![], fault);
        let log = sensor.log.clone();
        let mut reader = SensorReader::new(sensor, "Cold Storage - Mumbai");
        let start = Instant::now();

        let reading = reader.read().await;

        assert_eq!(reading, None);
        assert_eq!(log.borrow().measured_at.len(), 3);
        assert_eq!(start.elapsed(), RETRY_DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_attempt_k_stops_after_k_minus_one_waits() {
        for k in 1..=3u32 {
            let script = (1..k).map(|_| fault()).collect();
            let sensor = ScriptedSensor::new(script, valid);
            let log = sensor.log.clone();
            let mut reader = SensorReader::new(sensor, "Cold Storage - Mumbai");
            let start = Instant::now();

            let reading = reader.read().await;

            assert!(reading.is_some(), "attempt {}", k);
            assert_eq!(log.borrow().measured_at.len(), k as usize);
            assert_eq!(start.elapsed(), RETRY_DELAY * (k - 1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missing_values_share_the_retry_budget() {
        let script = vec![empty(), fault(), empty()];
        let sensor = ScriptedSensor::new(script, valid);
        let log = sensor.log.clone();
        let mut reader = SensorReader::new(sensor, "Cold Storage - Mumbai");
        let start = Instant::now();

        let reading = reader.read().await;

        assert_eq!(reading, None);
        assert_eq!(log.borrow().measured_at.len(), 3);
        assert_eq!(start.elapsed(), RETRY_DELAY * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn half_a_sample_is_not_a_reading() {
        let partial = Ok(Sample {
            temperature: Some(Temperature(21.0)),
            humidity: None,
        });
        let sensor = ScriptedSensor::new(vec![partial], valid);
        let mut reader = SensorReader::new(sensor, "Cold Storage - Mumbai");

        let reading = reader.read().await.unwrap();

        assert_eq!(reading.temperature, Temperature(24.0));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_policy_can_be_tuned() {
        let sensor = ScriptedSensor::new(vec![], fault);
        let log = sensor.log.clone();
        let mut reader =
            SensorReader::new(sensor, "Lab").with_retry(5, Duration::from_millis(100));
        let start = Instant::now();

        assert_eq!(reader.read().await, None);
        assert_eq!(log.borrow().measured_at.len(), 5);
        assert_eq!(start.elapsed(), Duration::from_millis(400));
    }

    #[test]
    fn release_reaches_the_sensor() {
        let sensor = ScriptedSensor::new(vec![], valid);
        let log = sensor.log.clone();
        let mut reader = SensorReader::new(sensor, "Lab");

        reader.release();

        assert_eq!(log.borrow().releases, 1);
    }
}
