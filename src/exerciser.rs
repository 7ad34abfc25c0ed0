//! One-shot smoke test for a temperature endpoint: post a fixed reading,
//! then read the latest one back. Output is meant for a person at a terminal.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::config::{LIVE_PAGE_URL, SEND_TIMEOUT, TEST_HUMIDITY, TEST_LOCATION, TEST_TEMPERATURE};
use crate::domain::{Humidity, LatestReading, Reading, Temperature};

#[derive(Debug, Deserialize)]
struct LatestEnvelope {
    data: LatestReading,
}

#[derive(Debug)]
pub struct Report {
    pub post: Result<StatusCode, reqwest::Error>,
    pub get: Result<Option<LatestReading>, reqwest::Error>,
}

pub struct Exerciser {
    client: Client,
    url: String,
}

pub fn test_reading() -> Reading {
    Reading::new(Temperature(TEST_TEMPERATURE), Humidity(TEST_HUMIDITY), TEST_LOCATION)
}

fn pretty(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("{}", title);
    println!("{}\n", "=".repeat(50));
}

impl Exerciser {
    pub fn new(url: impl Into<String>) -> Result<Exerciser, reqwest::Error> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;

        Ok(Exerciser {
            client,
            url: url.into(),
        })
    }

    pub async fn run(&self) -> Report {
        let post = self.send_test_reading().await;
        let get = self.fetch_latest().await;

        Report { post, get }
    }

    pub async fn send_test_reading(&self) -> Result<StatusCode, reqwest::Error> {
        println!("Testing Temperature API...");
        println!("API URL: {}\n", self.url);

        let result = self.post_reading(&test_reading()).await;

        match &result {
            Ok(status) if *status == StatusCode::OK => {
                println!("✓ SUCCESS! Temperature data sent successfully!");
                println!("\nNow visit {} to see the data!", LIVE_PAGE_URL);
            }
            Ok(_) => println!("✗ FAILED! Check the error message above."),
            Err(error) => {
                println!("✗ ERROR: {}", error);
                println!("\nMake sure:");
                println!("1. The temperature API is running (cargo run --bin temperature-api)");
                println!("2. The API URL is correct");
                println!("3. You have internet connection");
            }
        }

        result
    }

    async fn post_reading(&self, reading: &Reading) -> Result<StatusCode, reqwest::Error> {
        let payload = serde_json::to_string_pretty(reading).unwrap_or_default();
        println!("Sending: {}\n", payload);

        let response = self.client.post(&self.url).json(reading).send().await?;
        let status = response.status();
        let body = response.text().await?;

        println!("Status Code: {}", status.as_u16());
        println!("Response: {}\n", pretty(&body));

        Ok(status)
    }

    /// `Ok(None)` means the endpoint answered with something other than 200.
    pub async fn fetch_latest(&self) -> Result<Option<LatestReading>, reqwest::Error> {
        banner("Testing GET endpoint...");

        let result = self.get_latest().await;

        match &result {
            Ok(Some(data)) => {
                println!("✓ Current Temperature Data:");
                println!("  Temperature: {}", data.temperature);
                println!("  Humidity: {}", data.humidity);
                println!("  Location: {}", data.location);
                println!("  Last Updated: {}", data.timestamp);
            }
            Ok(None) => {}
            Err(error) => println!("✗ ERROR: {}", error),
        }

        result
    }

    async fn get_latest(&self) -> Result<Option<LatestReading>, reqwest::Error> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        println!("Status Code: {}", status.as_u16());
        println!("Response: {}\n", pretty(&body));

        if status != StatusCode::OK {
            return Ok(None);
        }

        match serde_json::from_str::<LatestEnvelope>(&body) {
            Ok(envelope) => Ok(Some(envelope.data)),
            Err(error) => {
                println!("✗ ERROR: unexpected response shape: {}", error);
                Ok(None)
            }
        }
    }
}
