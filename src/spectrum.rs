//! Minimal power spectral density representation.
//!
//! A `SpectrumModel` describes how the band is split into sub-bands and is
//! shared by every `SpectrumValue` built on it. A `SpectrumValue` holds one
//! density per sub-band in linear units (W/Hz for radio).
//!
//! Values are treated as immutable once shared: channels derive a new value
//! with `scaled` and replace the reference instead of editing in place.

use std::sync::Arc;

/// Sub-band layout of a transmission band.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumModel {
    /// Center of the whole band (Hz).
    pub center_frequency: f64,
    /// Width of a single sub-band (Hz).
    pub sub_band_bandwidth: f64,
    /// Number of sub-bands.
    pub sub_band_count: usize,
}

impl SpectrumModel {
    pub fn new(center_frequency: f64, sub_band_bandwidth: f64, sub_band_count: usize) -> Arc<Self> {
        Arc::new(Self {
            center_frequency,
            sub_band_bandwidth,
            sub_band_count,
        })
    }

    /// Total width covered by the sub-bands (Hz).
    pub fn total_bandwidth(&self) -> f64 {
        self.sub_band_bandwidth * self.sub_band_count as f64
    }

    /// Center frequency of each sub-band, lowest first.
    pub fn sub_band_centers(&self) -> Vec<f64> {
        let lowest_edge = self.center_frequency - self.total_bandwidth() / 2.0;
        (0..self.sub_band_count)
            .map(|i| lowest_edge + (i as f64 + 0.5) * self.sub_band_bandwidth)
            .collect()
    }
}

/// Power spectral density over a `SpectrumModel`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumValue {
    model: Arc<SpectrumModel>,
    values: Vec<f64>,
}

impl SpectrumValue {
    /// All-zero density over `model`.
    pub fn zeros(model: Arc<SpectrumModel>) -> Self {
        let values = vec![0.0; model.sub_band_count];
        Self { model, values }
    }

    /// Spread `total_power` (W) evenly across every sub-band of `model`.
    ///
    /// An empty model or a zero sub-band width yields an all-zero density.
    pub fn flat(model: Arc<SpectrumModel>, total_power: f64) -> Self {
        let bandwidth = model.total_bandwidth();
        if bandwidth <= 0.0 {
            return Self::zeros(model);
        }
        let density = total_power / bandwidth;
        let values = vec![density; model.sub_band_count];
        Self { model, values }
    }

    pub fn model(&self) -> &Arc<SpectrumModel> {
        &self.model
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Integrated power over the band (W).
    pub fn total_power(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.model.sub_band_bandwidth
    }

    /// A new density with every sub-band multiplied by a linear `gain`.
    pub fn scaled(&self, gain: f64) -> Self {
        Self {
            model: Arc::clone(&self.model),
            values: self.values.iter().map(|v| v * gain).collect(),
        }
    }
}

/// Convert a gain in dB to a linear factor.
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_band_centers_are_symmetric_around_band_center() {
        let model = SpectrumModel::new(1e12, 1e9, 4);
        let centers = model.sub_band_centers();
        assert_eq!(centers.len(), 4);
        assert!((centers[0] - (1e12 - 1.5e9)).abs() < 1.0);
        assert!((centers[3] - (1e12 + 1.5e9)).abs() < 1.0);
    }

    #[test]
    fn flat_density_integrates_back_to_total_power() {
        let model = SpectrumModel::new(1e11, 1e8, 10);
        let psd = SpectrumValue::flat(model, 1e-3);
        assert!((psd.total_power() - 1e-3).abs() < 1e-12);
        assert!(psd.values().iter().all(|v| (*v - 1e-12).abs() < 1e-24));
    }

    #[test]
    fn flat_over_empty_model_is_zero() {
        let psd = SpectrumValue::flat(SpectrumModel::new(1e11, 0.0, 3), 1.0);
        assert_eq!(psd.values(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn scaled_shares_model_and_leaves_source_untouched() {
        let psd = SpectrumValue::flat(SpectrumModel::new(1e11, 1e8, 2), 2e-3);
        let attenuated = psd.scaled(db_to_linear(-10.0));
        assert!(Arc::ptr_eq(psd.model(), attenuated.model()));
        assert!((attenuated.total_power() - 2e-4).abs() < 1e-12);
        assert!((psd.total_power() - 2e-3).abs() < 1e-12);
    }
}
