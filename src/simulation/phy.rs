//! Demo physical-layer endpoints.
//!
//! `PulseTransmitter` builds pulse-based THz signals from a
//! `TransmitterConfig`. `RecordingPhy` accepts a single signal variant and
//! records what it receives; signals of other technologies are ignored.

use embassy_time::Duration;
use std::any::TypeId;
use std::sync::{Arc, Mutex};

use crate::config::TransmitterConfig;
use crate::packet::Packet;
use crate::phy::{PhyEndpoint, PhyHandle};
use crate::pulse::{PULSE_TECHNOLOGY, PulseSignalParameters};
use crate::signal_parameters::{AsAny, SignalParametersHandle, SpectrumSignalParameters};
use crate::spectrum::{SpectrumModel, SpectrumValue};

/// Half-duplex pulse transmitter.
#[derive(Debug)]
pub struct PulseTransmitter {
    node_id: u32,
    config: TransmitterConfig,
}

impl PulseTransmitter {
    pub fn new(node_id: u32, config: TransmitterConfig) -> Arc<Self> {
        Arc::new(Self { node_id, config })
    }

    /// Build the signal for `packet`. One bit per symbol period; the duration
    /// saturates at `u64::MAX` ticks.
    pub fn build_signal(self: &Arc<Self>, packet: Arc<Packet>) -> SignalParametersHandle {
        let model = SpectrumModel::new(self.config.center_frequency, self.config.sub_band_bandwidth, self.config.sub_band_count);
        let tx_phy: PhyHandle = Arc::downgrade(self) as PhyHandle;
        let bits = (packet.size() * 8) as u64;

        let mut base = self.config.base_parameters();
        base.tx_psd = Some(Arc::new(SpectrumValue::flat(model, self.config.tx_power)));
        base.tx_phy = Some(tx_phy);
        base.packet = Some(packet);

        let mut params = PulseSignalParameters {
            base,
            pulse_duration: self.config.pulse_duration(),
            symbol_spacing_ratio: self.config.symbol_spacing_ratio,
            polarization_angle: self.config.polarization_angle,
        };
        params.base.tx_duration = Duration::from_ticks(params.symbol_period().as_ticks().saturating_mul(bits));

        log::debug!(
            "Node {} built {} signal: {} bits over {} us",
            self.node_id,
            PULSE_TECHNOLOGY,
            bits,
            params.base.tx_duration.as_micros()
        );
        params.into_handle()
    }
}

impl PhyEndpoint for PulseTransmitter {
    fn node_id(&self) -> u32 {
        self.node_id
    }

    fn technology(&self) -> &'static str {
        PULSE_TECHNOLOGY
    }

    fn start_rx(&self, params: SignalParametersHandle) {
        log::debug!("Node {} is transmit-only, dropping {} signal", self.node_id, params.technology());
    }
}

/// One accepted signal.
#[derive(Debug, Clone)]
pub struct Reception {
    pub from_node: Option<u32>,
    pub packet_uid: Option<u64>,
    /// Integrated received PSD (W), or `tx_power` when no PSD is attached.
    pub rx_power: f64,
    pub duration: Duration,
}

#[derive(Debug, Default)]
struct RecordingState {
    receptions: Vec<Reception>,
    ignored: u64,
}

/// Receiver accepting exactly one signal variant.
#[derive(Debug)]
pub struct RecordingPhy {
    node_id: u32,
    technology: &'static str,
    accepted: TypeId,
    state: Mutex<RecordingState>,
}

impl RecordingPhy {
    /// Receiver for signals whose concrete variant is `T`.
    pub fn accepting<T: SpectrumSignalParameters>(node_id: u32, technology: &'static str) -> Arc<Self> {
        Arc::new(Self {
            node_id,
            technology,
            accepted: TypeId::of::<T>(),
            state: Mutex::new(RecordingState::default()),
        })
    }

    pub fn receptions(&self) -> Vec<Reception> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).receptions.clone()
    }

    /// Number of signals rejected because of their variant.
    pub fn ignored(&self) -> u64 {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).ignored
    }
}

impl PhyEndpoint for RecordingPhy {
    fn node_id(&self) -> u32 {
        self.node_id
    }

    fn technology(&self) -> &'static str {
        self.technology
    }

    fn start_rx(&self, params: SignalParametersHandle) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if AsAny::as_any(&*params).type_id() != self.accepted {
            log::debug!("Node {} ({}) ignoring {} signal", self.node_id, self.technology, params.technology());
            state.ignored += 1;
            return;
        }

        let base = params.base();
        let reception = Reception {
            from_node: base.tx_phy().map(|phy| phy.node_id()),
            packet_uid: base.packet.as_ref().map(|p| p.uid),
            rx_power: base.tx_psd.as_ref().map_or(base.tx_power, |psd| psd.total_power()),
            duration: base.tx_duration,
        };
        log::info!(
            "Node {} received packet {:?} from {:?} at {:.3e} W",
            self.node_id,
            reception.packet_uid,
            reception.from_node,
            reception.rx_power
        );
        state.receptions.push(reception);
    }
}
