//! Transmission parameter records for THz network simulation.
//!
//! A transmitter describes every signal it sends with a record built on
//! `SignalParameters`: PSD, duration, transmitting endpoint, packet, and the
//! scalar power/frequency/bandwidth attributes. Channels copy the record once
//! per receiver and replace the PSD; receivers read it for reception and
//! interference decisions.
//!
//! Technologies extend the record with their own fields (see `pulse`) and
//! the extension survives copies made through the shared base handle.

pub mod config;
pub mod packet;
pub mod phy;
pub mod pulse;
pub mod signal_parameters;
pub mod simulation;
pub mod spectrum;

pub use config::TransmitterConfig;
pub use packet::Packet;
pub use phy::{PhyEndpoint, PhyHandle};
pub use pulse::PulseSignalParameters;
pub use signal_parameters::{SignalParameters, SignalParametersHandle, SpectrumSignalParameters, downcast_handle};
pub use spectrum::{SpectrumModel, SpectrumValue};
