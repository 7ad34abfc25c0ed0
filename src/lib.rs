#[macro_use]
extern crate derive_more;

pub mod api;
pub mod config;
pub mod dht11;
pub mod domain;
pub mod error;
pub mod exerciser;
pub mod logging;
pub mod monitor;
pub mod reader;
pub mod sender;

// Linked only so the vendored build is selected when cross-compiling for the Pi.
use openssl as _;
