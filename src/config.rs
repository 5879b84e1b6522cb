use core::num::NonZeroU16;

use heapless::String;

use crate::constants::DEVICE_TOPIC_MAX_LEN;
use crate::credentials::{NetworkCredentials, Passphrase};
use crate::endpoint::BrokerEndpoint;
use crate::topic;
use crate::validate::{self, Error};

pub struct Config {
    // Device ID (MQTT client id, DHCP hostname, last level of the device topic)
    pub device_id: &'static str,

    // MQTT broker hostname or IPv4 address
    pub mqtt_hostname: &'static str,

    // MQTT port (usually 1883, or 8883 for TLS)
    pub mqtt_port: NonZeroU16,

    // MQTT topic to publish inverter readings to
    pub mqtt_topic: &'static str,

    // Wi-Fi pre-shared key (password)
    pub wifi_psk: &'static str,

    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'static str,
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// Used by the generated `CONFIG`; a zero port fails const evaluation.
const fn port(value: u16) -> NonZeroU16 {
    match NonZeroU16::new(value) {
        Some(port) => port,
        None => panic!("mqtt_port must be in range 1-65535"),
    }
}

impl Config {
    /// SSID and passphrase exactly as configured.
    pub const fn network_credentials(&self) -> NetworkCredentials {
        NetworkCredentials {
            ssid: self.wifi_ssid,
            passphrase: Passphrase::new(self.wifi_psk),
        }
    }

    /// Broker host and port; the port is never zero.
    pub const fn broker_endpoint(&self) -> BrokerEndpoint {
        BrokerEndpoint {
            host: self.mqtt_hostname,
            port: self.mqtt_port,
        }
    }

    /// Publish target for readings.
    pub const fn topic(&self) -> &'static str {
        self.mqtt_topic
    }

    /// Identifier of this unit on the broker.
    pub const fn device_id(&self) -> &'static str {
        self.device_id
    }

    pub fn device_topic(&self) -> Result<String<DEVICE_TOPIC_MAX_LEN>, Error> {
        topic::device_topic(self.mqtt_topic, self.device_id)
    }

    /// Same checks `build.rs` applies to `cfg.toml`, for hand-built configs.
    pub fn validate(&self) -> Result<(), Error> {
        validate::ssid(self.wifi_ssid)?;
        validate::passphrase(self.wifi_psk)?;
        validate::host(self.mqtt_hostname)?;
        validate::port(self.mqtt_port.get())?;
        validate::topic(self.mqtt_topic)?;
        validate::device_id(self.device_id)?;
        validate::device_topic(self.mqtt_topic, self.device_id)?;
        Ok(())
    }

    /// Logs every field at `info`. The passphrase is printed redacted.
    pub fn log_summary(&self) {
        let credentials = self.network_credentials();
        log::info!("Device ID: {}", self.device_id);
        log::info!(
            "Wi-Fi SSID: {:?}, passphrase: {}",
            credentials.ssid,
            credentials.passphrase
        );
        log::info!("MQTT broker: {}", self.broker_endpoint());
        log::info!("MQTT topic: {}", self.mqtt_topic);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::constants::REDACTED;
    use crate::endpoint::Host;

    struct Recorder(Mutex<Vec<std::string::String>>);

    impl log::Log for Recorder {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static RECORDER: Recorder = Recorder(Mutex::new(Vec::new()));

    const FIXTURE: Config = Config {
        device_id: "inverter_001",
        mqtt_hostname: "35.209.78.195",
        mqtt_port: port(1883),
        mqtt_topic: "inverter/readings",
        wifi_psk: "aksesg31",
        wifi_ssid: "cslab",
    };

    #[test]
    fn test_accessors_return_configured_values() {
        let credentials = FIXTURE.network_credentials();
        assert_eq!(credentials.ssid, "cslab");
        assert_eq!(credentials.passphrase.expose(), "aksesg31");

        let broker = FIXTURE.broker_endpoint();
        assert_eq!(broker.host, "35.209.78.195");
        assert_eq!(broker.port.get(), 1883);

        assert_eq!(FIXTURE.topic(), "inverter/readings");
        assert_eq!(FIXTURE.device_id(), "inverter_001");
    }

    #[test]
    fn test_rereads_are_identical() {
        assert_eq!(FIXTURE.network_credentials(), FIXTURE.network_credentials());
        assert_eq!(FIXTURE.broker_endpoint(), FIXTURE.broker_endpoint());
        assert_eq!(FIXTURE.topic(), FIXTURE.topic());
        assert_eq!(FIXTURE.device_id(), FIXTURE.device_id());
    }

    #[test]
    fn test_derived_values() {
        let broker = FIXTURE.broker_endpoint();
        assert_eq!(broker.address().unwrap().as_str(), "35.209.78.195:1883");
        assert!(matches!(broker.host_kind(), Host::Ipv4(_)));
        assert_eq!(
            FIXTURE.device_topic().unwrap().as_str(),
            "inverter/readings/inverter_001"
        );
    }

    #[test]
    fn test_fixture_is_valid() {
        assert_eq!(FIXTURE.validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_bad_fields() {
        let wildcard = Config {
            mqtt_topic: "inverter/#",
            ..FIXTURE
        };
        assert_eq!(wildcard.validate(), Err(Error::Wildcard));

        let spaced = Config {
            device_id: " inverter_001",
            ..FIXTURE
        };
        assert_eq!(spaced.validate(), Err(Error::Whitespace));

        let no_ssid = Config {
            wifi_ssid: "",
            ..FIXTURE
        };
        assert_eq!(no_ssid.validate(), Err(Error::Empty));
    }

    // Only test in the crate that logs, so it owns the global logger.
    #[test]
    fn test_log_summary_redacts_passphrase() {
        log::set_logger(&RECORDER).unwrap();
        log::set_max_level(log::LevelFilter::Info);

        FIXTURE.log_summary();

        let lines = RECORDER.0.lock().unwrap().join("\n");
        assert!(lines.contains("cslab"));
        assert!(lines.contains(REDACTED));
        assert!(lines.contains("35.209.78.195:1883"));
        assert!(lines.contains("inverter/readings"));
        assert!(lines.contains("inverter_001"));
        assert!(!lines.contains("aksesg31"));
    }

    #[test]
    fn test_config_is_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<Config>();
        assert_sync::<NetworkCredentials>();
        assert_sync::<BrokerEndpoint>();
    }

    #[test]
    fn test_generated_config_is_valid() {
        assert_eq!(CONFIG.validate(), Ok(()));
        assert!(CONFIG.broker_endpoint().port.get() >= 1);

        let topic = CONFIG.topic();
        assert!(!topic.is_empty());
        assert_eq!(topic.trim(), topic);

        let device_id = CONFIG.device_id();
        assert!(!device_id.is_empty());
        assert_eq!(device_id.trim(), device_id);
    }
}
