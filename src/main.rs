use anyhow::Result;
use tokio::signal;
use tracing::info;

use coldtrack::config::{UplinkConfig, DEVICE, SENSOR_PIN};
use coldtrack::dht11::Dht11;
use coldtrack::logging;
use coldtrack::monitor::Monitor;
use coldtrack::reader::SensorReader;
use coldtrack::sender::HttpUplink;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let config = UplinkConfig::default();

    let sensor = Dht11::open(DEVICE, SENSOR_PIN)?;
    let reader = SensorReader::new(sensor, config.location.as_str())
        .with_retry(config.max_read_attempts, config.retry_delay);
    let uplink = HttpUplink::new(config.api_url.as_str(), config.send_timeout)?;

    info!("DHT11 Temperature Monitor Started");
    info!("Sensor: DHT11 on GPIO{}", SENSOR_PIN);
    info!("API URL: {}", uplink.url());
    info!("Update Interval: {} seconds", config.update_interval.as_secs());
    info!("Press Ctrl+C to stop");

    Monitor::new(reader, uplink, config.update_interval)
        .run_until(signal::ctrl_c())
        .await;

    Ok(())
}
