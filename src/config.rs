use std::net::SocketAddr;
use std::time::Duration;

pub const NAME: &str = "coldtrack";

pub const API_URL: &str = "https://hk-co.vercel.app/api/temperature";
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(60);
pub const LOCATION: &str = "Cold Storage - Mumbai";
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub const MAX_READ_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

pub const DEVICE: &str = "/dev/gpiochip0";
pub const SENSOR_PIN: u32 = 4;

pub const TEST_API_URL: &str = "http://localhost:3000/api/temperature";
pub const TEST_TEMPERATURE: f32 = 23.5;
pub const TEST_HUMIDITY: f32 = 65.0;
pub const TEST_LOCATION: &str = "Test Location";
pub const LIVE_PAGE_URL: &str = "http://localhost:3000/live-temp";

pub const API_LISTEN: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);

pub fn api_listen_addr() -> SocketAddr {
    SocketAddr::from(API_LISTEN)
}

/// Everything the uplink loop needs, gathered so tests can point it at a
/// local endpoint and shrink the timings.
#[derive(Debug, Clone)]
pub struct UplinkConfig {
    pub api_url: String,
    pub location: String,
    pub update_interval: Duration,
    pub send_timeout: Duration,
    pub max_read_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        UplinkConfig {
            api_url: API_URL.to_string(),
            location: LOCATION.to_string(),
            update_interval: UPDATE_INTERVAL,
            send_timeout: SEND_TIMEOUT,
            max_read_attempts: MAX_READ_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }
}
