//! Physical-layer endpoint interface.
//!
//! Endpoints own themselves through `Arc`; signals only keep a `PhyHandle`
//! back to their transmitter so a finished transmission never keeps a node
//! alive.

use std::fmt;
use std::sync::Weak;

use crate::signal_parameters::SignalParametersHandle;

/// A transmitter/receiver attached to a channel.
pub trait PhyEndpoint: fmt::Debug + Send + Sync {
    /// Identifier of the node this endpoint belongs to.
    fn node_id(&self) -> u32;

    /// Short name of the transmission technology, used in logs.
    fn technology(&self) -> &'static str;

    /// Called by the channel once per delivered signal. The handle is this
    /// receiver's own copy; other receivers hold different ones.
    fn start_rx(&self, params: SignalParametersHandle);
}

/// Non-owning reference to an endpoint.
pub type PhyHandle = Weak<dyn PhyEndpoint>;
