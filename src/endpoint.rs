use core::fmt::{self, Write};
use core::net::Ipv4Addr;
use core::num::NonZeroU16;

use heapless::String;

use crate::constants::BROKER_ADDRESS_MAX_LEN;
use crate::validate::Error;

/// MQTT broker the device connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerEndpoint {
    pub host: &'static str,
    pub port: NonZeroU16,
}

/// How the consumer has to reach the broker host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Literal address, connect directly
    Ipv4(Ipv4Addr),
    /// Needs a DNS A query first
    Name(&'static str),
}

impl BrokerEndpoint {
    pub fn host_kind(&self) -> Host {
        match self.host.parse::<Ipv4Addr>() {
            Ok(addr) => Host::Ipv4(addr),
            Err(_) => Host::Name(self.host),
        }
    }

    /// Connection target rendered as `host:port`.
    pub fn address(&self) -> Result<String<BROKER_ADDRESS_MAX_LEN>, Error> {
        let mut address = String::new();
        write!(address, "{}", self).map_err(|_| Error::BufferOverflow)?;
        Ok(address)
    }
}

impl fmt::Display for BrokerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
