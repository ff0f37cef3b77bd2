use std::time::Duration;

use crate::crypto::transform::MAX_PLAINTEXT_LEN;
use crate::types::ProtocolVersion;
use crate::Error;

/// Record layer configuration
#[derive(Debug, Clone)]
pub struct Config {
    version: ProtocolVersion,
    max_records: usize,
    max_plaintext_len: usize,
    epoch_grace_period: Duration,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            version: ProtocolVersion::DTLS1_2,
            max_records: 64,
            max_plaintext_len: MAX_PLAINTEXT_LEN,
            epoch_grace_period: Duration::from_secs(30),
        }
    }

    /// Protocol version written in outgoing record headers.
    #[inline(always)]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Max amount of records parsed from a single datagram.
    ///
    /// Unknown content types count as well, since they are parsed to be skipped.
    #[inline(always)]
    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Largest plaintext accepted for a single outgoing record.
    #[inline(always)]
    pub fn max_plaintext_len(&self) -> usize {
        self.max_plaintext_len
    }

    /// How long the read parameters of a superseded epoch stay usable.
    ///
    /// Counted from the moment the next epoch is installed. Late records of
    /// the previous epoch arriving after this are dropped.
    #[inline(always)]
    pub fn epoch_grace_period(&self) -> Duration {
        self.epoch_grace_period
    }
}

/// Builder for record layer configuration.
pub struct ConfigBuilder {
    version: ProtocolVersion,
    max_records: usize,
    max_plaintext_len: usize,
    epoch_grace_period: Duration,
}

impl ConfigBuilder {
    /// Set the protocol version written in outgoing record headers.
    ///
    /// Defaults to DTLS 1.2.
    pub fn version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the max amount of records parsed from a single datagram.
    ///
    /// Defaults to 64.
    pub fn max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Set the largest plaintext accepted for a single outgoing record.
    ///
    /// Defaults to 16384 (2^14), which is also the upper limit.
    pub fn max_plaintext_len(mut self, len: usize) -> Self {
        self.max_plaintext_len = len;
        self
    }

    /// Set how long a superseded read epoch stays usable.
    ///
    /// Defaults to 30 seconds.
    pub fn epoch_grace_period(mut self, period: Duration) -> Self {
        self.epoch_grace_period = period;
        self
    }

    /// Build the configuration.
    ///
    /// Returns `Error::ConfigError` if a value is out of range.
    pub fn build(self) -> Result<Config, Error> {
        if self.max_records == 0 {
            return Err(Error::ConfigError(
                "max_records must be at least 1".to_string(),
            ));
        }

        if self.max_plaintext_len == 0 || self.max_plaintext_len > MAX_PLAINTEXT_LEN {
            return Err(Error::ConfigError(format!(
                "max_plaintext_len must be in 1..={}, got {}",
                MAX_PLAINTEXT_LEN, self.max_plaintext_len
            )));
        }

        Ok(Config {
            version: self.version,
            max_records: self.max_records,
            max_plaintext_len: self.max_plaintext_len,
            epoch_grace_period: self.epoch_grace_period,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder()
            .build()
            .expect("Default config should always validate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.version(), ProtocolVersion::DTLS1_2);
        assert_eq!(c.max_records(), 64);
        assert_eq!(c.max_plaintext_len(), 16_384);
        assert_eq!(c.epoch_grace_period(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Config::builder().max_records(0).build().is_err());
        assert!(Config::builder().max_plaintext_len(0).build().is_err());
        assert!(Config::builder().max_plaintext_len(16_385).build().is_err());
        assert!(Config::builder().max_plaintext_len(1200).build().is_ok());
    }
}
