//! Data packet carried by a signal.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PACKET_UID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, PartialEq, Eq)]
pub struct Packet {
    /// Process-wide unique identifier, assigned at creation.
    pub uid: u64,
    pub payload: Vec<u8>,
}

impl Packet {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            uid: NEXT_PACKET_UID.fetch_add(1, Ordering::Relaxed),
            payload,
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}
