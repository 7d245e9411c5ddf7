//! Transmitter configuration loading.

use embassy_time::Duration;
use serde::Deserialize;
use std::path::Path;

use crate::signal_parameters::SignalParameters;

/// Relative tolerance for the sub-band span vs. total bandwidth check.
const BANDWIDTH_TOLERANCE: f64 = 1e-6;

/// Settings a transmitter uses to fill in the signals it sends.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransmitterConfig {
    /// Transmit power (W).
    pub tx_power: f64,
    /// Hz.
    pub center_frequency: f64,
    /// Hz.
    pub total_bandwidth: f64,
    pub sub_band_count: usize,
    /// Hz.
    pub sub_band_bandwidth: f64,
    #[serde(default)]
    pub sample_count: f64,
    /// Pulse length in nanoseconds. Must be a whole number of time ticks
    /// (1 us at the default tick rate); `validate` rejects anything else.
    pub pulse_duration_ns: u64,
    /// Symbol period over pulse duration.
    pub symbol_spacing_ratio: f64,
    /// Degrees.
    #[serde(default)]
    pub polarization_angle: f64,
}

impl TransmitterConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(TransmitterConfig)` if the file was read, parsed and validated
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no transmitter could use.
    ///
    /// A sub-band span that differs from `total_bandwidth` is accepted and
    /// only logged; keeping the two consistent is up to the config author.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tx_power >= 0.0) {
            return Err(format!("Invalid tx-power {}, must be non-negative", self.tx_power));
        }
        if !(self.center_frequency > 0.0) {
            return Err(format!("Invalid center-frequency {}, must be positive", self.center_frequency));
        }
        if !(self.total_bandwidth > 0.0) {
            return Err(format!("Invalid total-bandwidth {}, must be positive", self.total_bandwidth));
        }
        if self.sub_band_count == 0 {
            return Err("Invalid sub-band-count, must be positive".to_string());
        }
        if !(self.sub_band_bandwidth > 0.0) {
            return Err(format!("Invalid sub-band-bandwidth {}, must be positive", self.sub_band_bandwidth));
        }
        if self.pulse_duration_ns == 0 {
            return Err("Invalid pulse-duration-ns, must be positive".to_string());
        }
        if self.pulse_duration().as_nanos() != self.pulse_duration_ns {
            return Err(format!(
                "Invalid pulse-duration-ns {}, not a whole number of {} ns ticks",
                self.pulse_duration_ns,
                Duration::from_ticks(1).as_nanos()
            ));
        }
        if !(self.symbol_spacing_ratio >= 1.0) {
            return Err(format!("Invalid symbol-spacing-ratio {}, must be at least 1", self.symbol_spacing_ratio));
        }

        let span = self.sub_band_count as f64 * self.sub_band_bandwidth;
        if (span - self.total_bandwidth).abs() > self.total_bandwidth * BANDWIDTH_TOLERANCE {
            log::warn!(
                "Sub-band span {} Hz ({} x {} Hz) differs from total-bandwidth {} Hz",
                span,
                self.sub_band_count,
                self.sub_band_bandwidth,
                self.total_bandwidth
            );
        }

        Ok(())
    }

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_nanos(self.pulse_duration_ns)
    }

    /// Base parameters with the scalar fields filled in. References and the
    /// transmission duration are left for the transmitter to set.
    pub fn base_parameters(&self) -> SignalParameters {
        SignalParameters {
            tx_power: self.tx_power,
            sample_count: self.sample_count,
            sub_band_count: self.sub_band_count as f64,
            sub_band_bandwidth: self.sub_band_bandwidth,
            center_frequency: self.center_frequency,
            total_bandwidth: self.total_bandwidth,
            ..SignalParameters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
tx-power = 0.001
center-frequency = 1.0e12
total-bandwidth = 1.0e11
sub-band-count = 100
sub-band-bandwidth = 1.0e9
pulse-duration-ns = 1000
symbol-spacing-ratio = 100.0
polarization-angle = 45.0
"#;

    #[test]
    fn parses_kebab_case_keys() {
        let config = TransmitterConfig::from_toml_str(VALID).unwrap();
        assert_eq!(config.tx_power, 0.001);
        assert_eq!(config.sub_band_count, 100);
        assert_eq!(config.sample_count, 0.0);
        assert_eq!(config.polarization_angle, 45.0);
        assert_eq!(config.pulse_duration(), Duration::from_micros(1));
    }

    #[test]
    fn base_parameters_copy_scalars() {
        let base = TransmitterConfig::from_toml_str(VALID).unwrap().base_parameters();
        assert_eq!(base.center_frequency, 1.0e12);
        assert_eq!(base.sub_band_count, 100.0);
        assert!(base.bandwidth_mismatch() < 1.0);
        assert!(base.packet.is_none());
        assert!(base.tx_psd.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_bands = VALID.replace("sub-band-count = 100", "sub-band-count = 0");
        assert!(TransmitterConfig::from_toml_str(&zero_bands).is_err());

        let negative_power = VALID.replace("tx-power = 0.001", "tx-power = -1.0");
        assert!(TransmitterConfig::from_toml_str(&negative_power).is_err());

        let no_frequency = VALID.replace("center-frequency = 1.0e12", "center-frequency = 0.0");
        assert!(TransmitterConfig::from_toml_str(&no_frequency).is_err());
    }

    #[test]
    fn rejects_pulse_below_tick_resolution() {
        let too_short = VALID.replace("pulse-duration-ns = 1000", "pulse-duration-ns = 1");
        let err = TransmitterConfig::from_toml_str(&too_short).unwrap_err();
        assert!(err.starts_with("Invalid pulse-duration-ns 1,"));

        let zero = VALID.replace("pulse-duration-ns = 1000", "pulse-duration-ns = 0");
        assert!(TransmitterConfig::from_toml_str(&zero).is_err());
    }

    #[test]
    fn demo_config_pulse_duration_is_exact() {
        let config = TransmitterConfig::from_toml_str(include_str!("../demos/transmitter.toml")).unwrap();
        assert_eq!(config.pulse_duration().as_nanos(), config.pulse_duration_ns);
    }

    #[test]
    fn bandwidth_mismatch_is_not_an_error() {
        let mismatched = VALID.replace("sub-band-bandwidth = 1.0e9", "sub-band-bandwidth = 2.0e9");
        assert!(TransmitterConfig::from_toml_str(&mismatched).is_ok());
    }

    #[test]
    fn reports_missing_file() {
        let err = TransmitterConfig::load(Path::new("/nonexistent/transmitter.toml")).unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }
}
