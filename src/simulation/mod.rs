//! Demo broadcast simulation.
//!
//! Wires a `PulseTransmitter` and a set of receivers from a scene onto a
//! `BroadcastChannel`, sends one packet, and reports what each receiver
//! accepted. It shows the signal parameter hand-off end to end:
//! transmitter builds, channel copies per receiver, receivers inspect.
//!
//! ## Module Organization
//!
//! - `scene`: JSON scene loading and validation
//! - `channel`: per-receiver copy and PSD replacement
//! - `phy`: transmitter and recording receiver endpoints

pub mod channel;
pub mod phy;
pub mod scene;

use std::sync::Arc;

use crate::config::TransmitterConfig;
use crate::packet::Packet;
use crate::phy::PhyEndpoint;
use crate::pulse::{PULSE_TECHNOLOGY, PulseSignalParameters};
use crate::signal_parameters::SignalParameters;

pub use channel::BroadcastChannel;
pub use phy::{PulseTransmitter, Reception, RecordingPhy};
pub use scene::{Scene, load_scene};

/// Outcome for one receiver.
#[derive(Debug)]
pub struct ReceiverReport {
    pub node_id: u32,
    pub technology: &'static str,
    pub receptions: Vec<Reception>,
    pub ignored: u64,
}

/// Send `payload` once from the scene's transmitter and collect what every
/// receiver accepted.
///
/// Receivers declared with the pulse technology accept the transmitted
/// signal; any other technology gets a base-variant receiver and ignores it.
pub fn run_broadcast(config: &TransmitterConfig, scene: &Scene, payload: Vec<u8>) -> Vec<ReceiverReport> {
    let transmitter = PulseTransmitter::new(scene.transmitter, config.clone());
    let mut channel = BroadcastChannel::new();

    let receivers: Vec<Arc<RecordingPhy>> = scene
        .receivers
        .iter()
        .map(|node| {
            let rx = if node.technology == PULSE_TECHNOLOGY {
                RecordingPhy::accepting::<PulseSignalParameters>(node.node_id, PULSE_TECHNOLOGY)
            } else {
                log::warn!(
                    "Node {} uses technology {:?}, it will not accept {} signals",
                    node.node_id,
                    node.technology,
                    PULSE_TECHNOLOGY
                );
                RecordingPhy::accepting::<SignalParameters>(node.node_id, "generic")
            };
            let endpoint: Arc<dyn PhyEndpoint> = rx.clone();
            channel.add_receiver(&endpoint, node.link_gain_db);
            rx
        })
        .collect();

    let params = transmitter.build_signal(Arc::new(Packet::new(payload)));
    let delivered = channel.start_tx(&params);
    log::info!("Node {} reached {} of {} receivers", scene.transmitter, delivered, channel.receiver_count());

    receivers
        .iter()
        .map(|rx| ReceiverReport {
            node_id: rx.node_id(),
            technology: rx.technology(),
            receptions: rx.receptions(),
            ignored: rx.ignored(),
        })
        .collect()
}
