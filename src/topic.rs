use core::fmt::Write;

use heapless::String;

use crate::constants::{DEVICE_TOPIC_MAX_LEN, TOPIC_LEVEL_SEPARATOR};
use crate::validate::{self, Error};

/// Appends the device id as a last level: `inverter/readings` + `inverter_001`
/// gives `inverter/readings/inverter_001`.
pub fn device_topic(topic: &str, device_id: &str) -> Result<String<DEVICE_TOPIC_MAX_LEN>, Error> {
    validate::device_topic(topic, device_id)?;

    let base = topic.strip_suffix(TOPIC_LEVEL_SEPARATOR).unwrap_or(topic);

    let mut composed = String::new();
    write!(composed, "{}{}{}", base, TOPIC_LEVEL_SEPARATOR, device_id)
        .map_err(|_| Error::BufferOverflow)?;
    Ok(composed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_topic() {
        let topic = device_topic("inverter/readings", "inverter_001").unwrap();
        assert_eq!(topic.as_str(), "inverter/readings/inverter_001");
    }

    #[test]
    fn test_trailing_separator_not_doubled() {
        let topic = device_topic("inverter/readings/", "inverter_001").unwrap();
        assert_eq!(topic.as_str(), "inverter/readings/inverter_001");
    }

    #[test]
    fn test_invalid_parts_rejected() {
        assert_eq!(device_topic("inverter/#", "inverter_001"), Err(Error::Wildcard));
        assert_eq!(device_topic("inverter/readings", ""), Err(Error::Empty));
    }

    #[test]
    fn test_long_topic_rejected() {
        let long = "a".repeat(200);
        assert_eq!(crate::validate::topic(&long), Ok(()));
        assert_eq!(device_topic(&long, "inverter_001"), Err(Error::TooLong));
    }

    #[test]
    fn test_longest_composed_topic_fits() {
        let base = "a".repeat(DEVICE_TOPIC_MAX_LEN - 1 - "inverter_001".len());
        let topic = device_topic(&base, "inverter_001").unwrap();
        assert_eq!(topic.len(), DEVICE_TOPIC_MAX_LEN);
    }
}
