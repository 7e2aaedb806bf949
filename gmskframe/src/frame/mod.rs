//! Frame structure shared by the generator and the synchronizer.
//!
//! In symbols a frame is laid out as
//! `ramp-up (m) | preamble (63) | header (256) | payload (8 * encoded) | flush (m + 1) | ramp-down (m)`
//! and every symbol occupies `k` samples.

mod header;
pub use header::{DecodedHeader, FrameHeader, HEADER_BLOCK_LEN, HEADER_ENCODED_LEN, HEADER_SYMBOLS};

mod preamble;
pub use preamble::{alternating, MSequence63, PreambleReference};

use crate::{config::GmskParams, traits::PreambleGen};

/// Symbol and sample counts of the frame sections for one set of parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLayout {
  pub samples_per_symbol: usize,
  pub ramp_symbols: usize,
  pub preamble_symbols: usize,
  pub header_symbols: usize,
  pub flush_symbols: usize,
}

impl FrameLayout {
  pub fn new(params: &GmskParams) -> Self {
    Self {
      samples_per_symbol: params.samples_per_symbol,
      ramp_symbols: params.filter_semi_length,
      preamble_symbols: MSequence63::PREAMBLE_LEN,
      header_symbols: HEADER_SYMBOLS,
      flush_symbols: params.filter_semi_length + 1,
    }
  }

  /// index of the first preamble sample
  pub fn preamble_start(&self) -> usize {
    self.ramp_symbols * self.samples_per_symbol
  }

  /// index of the first header symbol
  pub fn header_start_symbol(&self) -> usize {
    self.ramp_symbols + self.preamble_symbols
  }

  /// index of the first payload symbol
  pub fn payload_start_symbol(&self) -> usize {
    self.header_start_symbol() + self.header_symbols
  }

  pub fn total_symbols(&self, payload_encoded_len: usize) -> usize {
    self.payload_start_symbol() + 8 * payload_encoded_len + self.flush_symbols + self.ramp_symbols
  }
}
