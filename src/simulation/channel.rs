//! Broadcast channel delivering one copy of every signal to each receiver.
//!
//! Per transmission and receiver:
//! 1) Copy the parameters through the base handle (variant preserved).
//! 2) Replace the PSD with one scaled by the link gain and scale `tx_power`.
//! 3) Hand the copy to the receiver's `start_rx`.
//!
//! Link gains are fixed per receiver; there is no propagation model here.

use std::sync::Arc;

use crate::phy::{PhyEndpoint, PhyHandle};
use crate::signal_parameters::SignalParametersHandle;
use crate::spectrum::db_to_linear;

struct Link {
    node_id: u32,
    phy: PhyHandle,
    /// Linear power gain.
    gain: f64,
}

#[derive(Default)]
pub struct BroadcastChannel {
    links: Vec<Link>,
    total_deliveries: u64,
}

impl BroadcastChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a receiver. The channel only keeps a weak reference.
    pub fn add_receiver(&mut self, phy: &Arc<dyn PhyEndpoint>, link_gain_db: f64) {
        log::debug!("Node {} attached ({} dB, {})", phy.node_id(), link_gain_db, phy.technology());
        self.links.push(Link {
            node_id: phy.node_id(),
            phy: Arc::downgrade(phy),
            gain: db_to_linear(link_gain_db),
        });
    }

    pub fn receiver_count(&self) -> usize {
        self.links.len()
    }

    pub fn total_deliveries(&self) -> u64 {
        self.total_deliveries
    }

    /// Deliver `params` to every attached receiver except the transmitter.
    /// Returns the number of receivers reached.
    pub fn start_tx(&mut self, params: &SignalParametersHandle) -> usize {
        self.links.retain(|link| {
            let alive = link.phy.strong_count() > 0;
            if !alive {
                log::debug!("Node {} dropped, detaching from channel", link.node_id);
            }
            alive
        });

        let sender_id = params.base().tx_phy().map(|phy| phy.node_id());
        let mut delivered = 0;

        for link in &self.links {
            if Some(link.node_id) == sender_id {
                continue;
            }
            let Some(rx_phy) = link.phy.upgrade() else {
                continue;
            };

            let mut copy = params.copy_boxed();
            let base = copy.base_mut();
            base.tx_psd = base.tx_psd.as_ref().map(|psd| Arc::new(psd.scaled(link.gain)));
            base.tx_power *= link.gain;

            log::debug!(
                "Delivering {} signal from {:?} to node {} (rx power {:.3e} W)",
                copy.technology(),
                sender_id,
                link.node_id,
                copy.base().tx_power
            );
            rx_phy.start_rx(Arc::from(copy));
            delivered += 1;
        }

        self.total_deliveries += delivered as u64;
        delivered
    }
}
