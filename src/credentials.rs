use core::fmt;

use crate::constants::REDACTED;

/// Wi-Fi pre-shared key. Formatting never prints the key itself.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Passphrase(&'static str);

impl Passphrase {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    /// Plaintext key, to hand to the Wi-Fi driver and nothing else.
    pub const fn expose(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Passphrase").field(&REDACTED).finish()
    }
}

impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// What the Wi-Fi driver needs to join the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkCredentials {
    pub ssid: &'static str,
    pub passphrase: Passphrase,
}
