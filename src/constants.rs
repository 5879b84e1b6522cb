/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Conventional unencrypted MQTT port, used when `cfg.toml` omits `mqtt_port`
pub const MQTT_DEFAULT_PORT: u16 = 1883;

/// MQTT topic level separator
pub const TOPIC_LEVEL_SEPARATOR: char = '/';

/// Capacity of a rendered `host:port` broker address
pub const BROKER_ADDRESS_MAX_LEN: usize = 260;

/// Capacity of a composed per-device topic
pub const DEVICE_TOPIC_MAX_LEN: usize = 128;

/// Text printed in place of secret values
pub const REDACTED: &str = "********";
