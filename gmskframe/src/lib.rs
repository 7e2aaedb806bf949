//! GMSK framing: a generator that packs a header and a protected payload into
//! a continuous-phase GMSK burst, and a streaming synchronizer that finds,
//! demodulates and decodes such bursts from arbitrary sample blocks.

/// common helper functions
pub mod helper;

/// define [`traits::FrameHandler`] and [`traits::PreambleGen`] traits.
pub mod traits;

/// error type shared by every fallible API.
pub mod error;
pub use error::{Error, Result};

/// modulation parameters, synchronizer tuning and protocol constants.
pub mod config;
pub use config::{GmskParams, SyncConfig, HEADER_LEN, MAX_PAYLOAD_LEN, PREAMBLE_LEN, PROTOCOL_VERSION};

/// checksums, forward error correction and the packetizer combining them.
pub mod codec;
pub use codec::{CrcScheme, FecScheme, Packetizer};

/// GMSK pulse shaping, modulation and frequency discrimination.
pub mod modem;

/// frame layout, preamble and header block.
pub mod frame;

mod framegen;
pub use framegen::{Blocks, FrameGen};

pub mod framesync;
pub use framesync::{FrameReport, FrameSync, SyncState};

mod stats;
pub use stats::{FrameDataStats, FrameSyncStats};

pub use num_complex::Complex32;
