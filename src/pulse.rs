//! Signal parameters for pulse-based THz nano communication.
//!
//! Nano devices transmit femtosecond-long pulses with time-spread on-off
//! keying: a logical one is a pulse, a zero is silence, and consecutive
//! symbols are separated by `symbol_spacing_ratio` pulse durations.

use embassy_time::Duration;

use crate::signal_parameters::{SignalParameters, SpectrumSignalParameters};

pub const PULSE_TECHNOLOGY: &str = "thz-pulse";

#[derive(Debug, Clone)]
pub struct PulseSignalParameters {
    pub base: SignalParameters,
    /// Length of a single pulse.
    pub pulse_duration: Duration,
    /// Symbol period divided by pulse duration (beta).
    pub symbol_spacing_ratio: f64,
    /// Antenna polarization angle (degrees).
    pub polarization_angle: f64,
}

impl PulseSignalParameters {
    pub fn new(base: SignalParameters) -> Self {
        Self {
            base,
            pulse_duration: Duration::from_ticks(0),
            symbol_spacing_ratio: 0.0,
            polarization_angle: 0.0,
        }
    }

    /// Time between the starts of two consecutive symbols.
    pub fn symbol_period(&self) -> Duration {
        let ticks = self.pulse_duration.as_ticks() as f64 * self.symbol_spacing_ratio;
        Duration::from_ticks(ticks.round() as u64)
    }
}

impl SpectrumSignalParameters for PulseSignalParameters {
    fn base(&self) -> &SignalParameters {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SignalParameters {
        &mut self.base
    }

    fn technology(&self) -> &'static str {
        PULSE_TECHNOLOGY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Packet;
    use crate::signal_parameters::SignalParametersHandle;
    use std::sync::Arc;

    fn sample() -> PulseSignalParameters {
        PulseSignalParameters {
            base: SignalParameters {
                tx_power: 1e-3,
                center_frequency: 1e12,
                total_bandwidth: 1e11,
                sub_band_count: 100.0,
                sub_band_bandwidth: 1e9,
                packet: Some(Arc::new(Packet::new(vec![7; 8]))),
                ..SignalParameters::default()
            },
            pulse_duration: Duration::from_micros(1),
            symbol_spacing_ratio: 100.0,
            polarization_angle: 45.0,
        }
    }

    #[test]
    fn copy_through_base_handle_keeps_pulse_fields() {
        let original = sample();
        let handle: SignalParametersHandle = original.clone().into_handle();

        let copy = handle.copy();
        assert_eq!(copy.technology(), PULSE_TECHNOLOGY);
        let pulse = copy.downcast_ref::<PulseSignalParameters>().unwrap();
        assert_eq!(pulse.pulse_duration, original.pulse_duration);
        assert_eq!(pulse.symbol_spacing_ratio, 100.0);
        assert_eq!(pulse.polarization_angle, 45.0);
        assert_eq!(pulse.base.tx_power, 1e-3);
        assert!(Arc::ptr_eq(
            pulse.base.packet.as_ref().unwrap(),
            handle.base().packet.as_ref().unwrap()
        ));
    }

    #[test]
    fn symbol_period_scales_pulse_duration() {
        let p = sample();
        assert_eq!(p.symbol_period(), Duration::from_micros(100));
        assert_eq!(PulseSignalParameters::new(SignalParameters::default()).symbol_period(), Duration::from_ticks(0));
    }
}
