use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

#[allow(dead_code)]
#[path = "src/constants.rs"]
mod constants;
#[allow(dead_code)]
#[path = "src/validate.rs"]
mod validate;

use constants::MQTT_DEFAULT_PORT;

#[derive(Deserialize)]
struct RawConfig {
    wifi_ssid: String,
    wifi_psk: String,
    mqtt_hostname: String,
    #[serde(default = "default_port")]
    mqtt_port: u16,
    mqtt_topic: String,
    device_id: String,
}

fn default_port() -> u16 {
    MQTT_DEFAULT_PORT
}

// Environment variables named after a field (upper-cased) take precedence over
// cfg.toml, so credentials can be provisioned without committing them.
fn override_from_env(name: &str, value: &mut String) {
    let key = name.to_ascii_uppercase();
    println!("cargo:rerun-if-env-changed={}", key);
    if let Ok(v) = env::var(&key) {
        println!("cargo:warning={} overridden from environment", key);
        *value = v;
    }
}

fn check(field: &str, result: Result<(), validate::Error>) -> Result<(), Box<dyn Error>> {
    result.map_err(|e| format!("cfg.toml: `{}` {}", field, e).into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cfg_path = env::var("INVERTER_CFG").unwrap_or_else(|_| "cfg.toml".into());

    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed={}", cfg_path);
    println!("cargo:rerun-if-env-changed=INVERTER_CFG");

    // Read and parse
    let toml_str =
        fs::read_to_string(&cfg_path).map_err(|e| format!("reading {}: {}", cfg_path, e))?;
    let mut raw: RawConfig = toml::from_str(&toml_str)?;

    override_from_env("wifi_ssid", &mut raw.wifi_ssid);
    override_from_env("wifi_psk", &mut raw.wifi_psk);
    override_from_env("mqtt_hostname", &mut raw.mqtt_hostname);
    override_from_env("mqtt_topic", &mut raw.mqtt_topic);
    override_from_env("device_id", &mut raw.device_id);

    println!("cargo:rerun-if-env-changed=MQTT_PORT");
    if let Ok(v) = env::var("MQTT_PORT") {
        raw.mqtt_port = v
            .parse()
            .map_err(|e| format!("MQTT_PORT {:?}: {}", v, e))?;
    }

    check("wifi_ssid", validate::ssid(&raw.wifi_ssid))?;
    check("wifi_psk", validate::passphrase(&raw.wifi_psk))?;
    check("mqtt_hostname", validate::host(&raw.mqtt_hostname))?;
    check("mqtt_port", validate::port(raw.mqtt_port))?;
    check("mqtt_topic", validate::topic(&raw.mqtt_topic))?;
    check("device_id", validate::device_id(&raw.device_id))?;
    check(
        "mqtt_topic",
        validate::device_topic(&raw.mqtt_topic, &raw.device_id),
    )?;

    // Generate Rust code
    let code = format!(
        r#"
        pub const CONFIG: Config = Config {{
            device_id: {id:?},
            mqtt_hostname: {mh:?},
            mqtt_port: port({mp}),
            mqtt_topic: {mt:?},
            wifi_psk: {psk:?},
            wifi_ssid: {ssid:?},
        }};
    "#,
        id = raw.device_id,
        mh = raw.mqtt_hostname,
        mp = raw.mqtt_port,
        mt = raw.mqtt_topic,
        psk = raw.wifi_psk,
        ssid = raw.wifi_ssid,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, code)?;
    Ok(())
}
