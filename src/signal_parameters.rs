//! Generic signal representation shared by every transmission technology.
//!
//! `SignalParameters` is the minimum parameter set a channel needs for
//! interference and reception calculations. A technology adds its own fields
//! by defining a struct that embeds `SignalParameters` and implements
//! `SpectrumSignalParameters`. Receivers check whether a signal belongs to
//! their technology with `is` / `downcast_ref`.
//!
//! ## Copy semantics
//!
//! Copying a record copies the value fields and shares the references:
//! - `tx_psd`: only the `Arc` is cloned. Channels replace the PSD on every
//!   copy they make, so duplicating the density would be wasted work.
//! - `packet`: shared with the original.
//! - `tx_phy`: weak back-reference, shared; never keeps the endpoint alive.
//!
//! Extension fields follow the same rule unless their domain needs a deep copy.
//!
//! ## Polymorphic copy
//!
//! A copy made through a `dyn SpectrumSignalParameters` is always of the
//! concrete variant behind it. The clone hook is provided by `dyn-clone` from
//! the variant's own `Clone` impl, so a variant cannot forget to provide it:
//! the trait cannot be implemented without `Clone`.
//!
//! ## Sharing
//!
//! Records travel as `SignalParametersHandle`. Fields may be changed only by
//! the holder of a fresh copy (see `copy_boxed` and `copy_with_psd`); a PSD
//! that is already shared must be replaced, not edited.

use dyn_clone::DynClone;
use embassy_time::{Duration, Instant};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::packet::Packet;
use crate::phy::{PhyEndpoint, PhyHandle};
use crate::spectrum::SpectrumValue;

/// Shared handle through which records are passed around.
pub type SignalParametersHandle = Arc<dyn SpectrumSignalParameters>;

/// Base signal parameters common to all technologies.
#[derive(Debug, Clone)]
pub struct SignalParameters {
    /// Power spectral density of the waveform in linear units (W/Hz for
    /// radio, Pa for acoustic media). Assumed constant for `tx_duration`.
    pub tx_psd: Option<Arc<SpectrumValue>>,
    /// Duration of the transmission. Waveforms have a rect shape in time.
    pub tx_duration: Duration,
    /// The endpoint making the transmission.
    pub tx_phy: Option<PhyHandle>,
    /// The data packet transmitted with this signal.
    pub packet: Option<Arc<Packet>>,
    /// Transmit power (W).
    pub tx_power: f64,
    pub sample_count: f64,
    pub sub_band_count: f64,
    /// Width of one sub-band (Hz).
    pub sub_band_bandwidth: f64,
    /// Hz.
    pub center_frequency: f64,
    /// Hz. Callers keep this equal to `sub_band_count * sub_band_bandwidth`;
    /// the record does not check it.
    pub total_bandwidth: f64,
}

impl Default for SignalParameters {
    fn default() -> Self {
        Self {
            tx_psd: None,
            tx_duration: Duration::from_ticks(0),
            tx_phy: None,
            packet: None,
            tx_power: 0.0,
            sample_count: 0.0,
            sub_band_count: 0.0,
            sub_band_bandwidth: 0.0,
            center_frequency: 0.0,
            total_bandwidth: 0.0,
        }
    }
}

impl SignalParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upgrade the back-reference to the transmitting endpoint.
    /// `None` if no endpoint was attached or it has been dropped since.
    pub fn tx_phy(&self) -> Option<Arc<dyn PhyEndpoint>> {
        self.tx_phy.as_ref().and_then(|phy| phy.upgrade())
    }

    /// Time the transmission ends if it started at `start`.
    pub fn end_time(&self, start: Instant) -> Instant {
        start + self.tx_duration
    }

    /// Bandwidth covered by the sub-bands (Hz).
    pub fn sub_band_span(&self) -> f64 {
        self.sub_band_count * self.sub_band_bandwidth
    }

    /// Absolute difference between `total_bandwidth` and the sub-band span.
    pub fn bandwidth_mismatch(&self) -> f64 {
        (self.total_bandwidth - self.sub_band_span()).abs()
    }
}

/// Type inspection helpers, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Capability interface of the signal parameter family.
///
/// Implementors embed a `SignalParameters` and expose it through `base` /
/// `base_mut` without changing the meaning of its fields. They must be
/// `Clone`; that clone is what every copy through a base handle runs.
pub trait SpectrumSignalParameters: AsAny + DynClone + fmt::Debug + Send + Sync {
    fn base(&self) -> &SignalParameters;

    fn base_mut(&mut self) -> &mut SignalParameters;

    /// Name of the technology, used in logs.
    fn technology(&self) -> &'static str {
        "generic"
    }

    /// Move the record behind a shared handle.
    fn into_handle(self) -> SignalParametersHandle
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

dyn_clone::clone_trait_object!(SpectrumSignalParameters);

impl SpectrumSignalParameters for SignalParameters {
    fn base(&self) -> &SignalParameters {
        self
    }

    fn base_mut(&mut self) -> &mut SignalParameters {
        self
    }
}

impl dyn SpectrumSignalParameters {
    /// Copy into a uniquely owned box, keeping the concrete variant.
    /// Use this when fields need changing before the copy is shared.
    pub fn copy_boxed(&self) -> Box<dyn SpectrumSignalParameters> {
        dyn_clone::clone_box(self)
    }

    /// Copy into a new shared handle, keeping the concrete variant.
    pub fn copy(&self) -> SignalParametersHandle {
        Arc::from(self.copy_boxed())
    }

    /// Copy and replace the PSD of the copy. The original keeps its PSD.
    pub fn copy_with_psd(&self, psd: Arc<SpectrumValue>) -> SignalParametersHandle {
        let mut copy = self.copy_boxed();
        copy.base_mut().tx_psd = Some(psd);
        Arc::from(copy)
    }

    /// Whether the concrete variant is `T`.
    pub fn is<T: SpectrumSignalParameters>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    pub fn downcast_ref<T: SpectrumSignalParameters>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: SpectrumSignalParameters>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

/// Get a typed handle to the same record. If the concrete variant is not
/// `T` the untouched handle is given back.
pub fn downcast_handle<T: SpectrumSignalParameters>(handle: SignalParametersHandle) -> Result<Arc<T>, SignalParametersHandle> {
    match AsAny::into_any_arc(Arc::clone(&handle)).downcast::<T>() {
        Ok(typed) => Ok(typed),
        Err(_) => Err(handle),
    }
}
