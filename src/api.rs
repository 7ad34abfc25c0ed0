//! Local stand-in for the hosted temperature API: keeps the most recent
//! reading in memory and serves it back.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Reply};

use crate::domain::{Humidity, LatestReading, Temperature};

pub type Store = Arc<RwLock<LatestReading>>;

#[derive(Debug, Deserialize)]
struct ReadingUpdate {
    temperature: Option<Temperature>,
    humidity: Option<Humidity>,
    location: Option<String>,
}

#[derive(Debug, Serialize)]
struct DataReply<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    data: LatestReading,
}

#[derive(Debug, Serialize)]
struct ErrorReply<'a> {
    success: bool,
    error: &'a str,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn new_store() -> Store {
    Arc::new(RwLock::new(LatestReading {
        temperature: Temperature(25.0),
        humidity: Humidity(60.0),
        timestamp: now(),
        location: "Storage Facility".to_string(),
    }))
}

async fn latest(store: Store) -> Result<impl Reply, Infallible> {
    let data = store.read().await.clone();

    Ok(warp::reply::json(&DataReply {
        success: true,
        message: None,
        data,
    }))
}

async fn update(body: Bytes, store: Store) -> Result<warp::reply::Response, Infallible> {
    let update = match serde_json::from_slice::<ReadingUpdate>(&body) {
        Ok(update) => update,
        Err(error) => {
            warn!(%error, "rejecting temperature update");
            let reply = warp::reply::json(&ErrorReply {
                success: false,
                error: "Invalid request",
            });
            return Ok(warp::reply::with_status(reply, StatusCode::BAD_REQUEST).into_response());
        }
    };

    let data = {
        let mut latest = store.write().await;

        if let Some(temperature) = update.temperature {
            latest.temperature = temperature;
        }
        if let Some(humidity) = update.humidity {
            latest.humidity = humidity;
        }
        if let Some(location) = update.location {
            latest.location = location;
        }
        latest.timestamp = now();

        latest.clone()
    };

    info!(temperature = %data.temperature, humidity = %data.humidity, location = %data.location, "temperature updated");

    Ok(warp::reply::json(&DataReply {
        success: true,
        message: Some("Temperature updated successfully"),
        data,
    })
    .into_response())
}

fn with_store(store: Store) -> impl Filter<Extract = (Store,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

pub fn routes(
    store: Store,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let get_route = warp::get()
        .and(with_store(store.clone()))
        .and_then(latest);
    let post_route = warp::post()
        .and(warp::body::bytes())
        .and(with_store(store))
        .and_then(update);

    warp::path!("api" / "temperature").and(get_route.or(post_route))
}
