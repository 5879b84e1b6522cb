//! Build-time configuration for the inverter telemetry device.
//!
//! Values come from `cfg.toml` (or environment overrides) and are baked into
//! [`config::CONFIG`] by `build.rs`. The firmware reads them once at startup:
//!
//! - [`Config::network_credentials`]: Wi-Fi SSID and passphrase
//! - [`Config::broker_endpoint`]: MQTT broker host and port
//! - [`Config::topic`]: publish topic
//! - [`Config::device_id`]: identifier of this unit on the broker
//!
//! Nothing here mutates, blocks, or performs I/O.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod credentials;
pub mod endpoint;
pub mod topic;
pub mod validate;

pub use config::{Config, CONFIG};
pub use credentials::{NetworkCredentials, Passphrase};
pub use endpoint::{BrokerEndpoint, Host};
pub use validate::Error;
