//! Frame synchronizer: preamble detection, symbol tracking and decoding.
//!
//! Samples flow through a [`PreambleDetector`] while in [`SyncState::Detect`].
//! A detection seeds the [`SymbolTracker`], whose hard decisions fill the
//! header and then the payload bit buffers. Each completed payload is
//! reported to a [`FrameHandler`].

use bitvec::prelude::*;
use log::debug;
use num_complex::Complex32;

use crate::{
  config::{GmskParams, SyncConfig, HEADER_LEN},
  error::Result,
  frame::{DecodedHeader, FrameHeader, PreambleReference, HEADER_SYMBOLS},
  helper::bits_to_bytes,
  modem::discriminate,
  stats::{FrameDataStats, FrameSyncStats},
  traits::FrameHandler,
};

mod detect;
pub use detect::{Detection, PreambleDetector};

mod demod;
pub use demod::SymbolTracker;

mod state;
pub use state::{next_state, SyncEvent, SyncState};


/// One decoded frame, as seen by a [`FrameHandler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport<'a> {
  pub header: &'a [u8; HEADER_LEN],
  pub header_valid: bool,
  pub payload: &'a [u8],
  pub payload_valid: bool,
  pub stats: FrameSyncStats,
}

/// handler used by [`FrameSync::execute`]
struct Discard;

impl FrameHandler for Discard {
  fn on_frame(&mut self, _: &FrameReport<'_>) {}
}

/// Streaming receiver for frames produced by a [`crate::FrameGen`] with the same parameters.
#[derive(Clone, Debug)]
pub struct FrameSync {
  params: GmskParams,
  state: SyncState,
  prev_sample: Complex32,
  detector: PreambleDetector,
  tracker: SymbolTracker,
  header_bits: BitVec<u8, Msb0>,
  header: Option<DecodedHeader>,
  payload_bits: BitVec<u8, Msb0>,
  /// number of payload bits announced by the header
  payload_bit_len: usize,
  stats: FrameDataStats,
}

impl FrameSync {
  pub fn new(samples_per_symbol: usize, filter_semi_length: usize, bt: f32) -> Result<Self> {
    Self::with_config(
      GmskParams::new(samples_per_symbol, filter_semi_length, bt)?,
      SyncConfig::default(),
    )
  }

  pub fn with_config(params: GmskParams, config: SyncConfig) -> Result<Self> {
    params.validate()?;
    config.validate()?;
    Ok(Self::build(params, config))
  }

  fn build(params: GmskParams, config: SyncConfig) -> Self {
    let reference = PreambleReference::new(&params);
    let tracker = SymbolTracker::new(params.samples_per_symbol, reference.symbol_amplitude, config);
    Self {
      params,
      state: SyncState::Detect,
      prev_sample: Complex32::new(0.0, 0.0),
      detector: PreambleDetector::new(reference, config.detect_threshold),
      tracker,
      header_bits: BitVec::with_capacity(HEADER_SYMBOLS),
      header: None,
      payload_bits: BitVec::new(),
      payload_bit_len: 0,
      stats: FrameDataStats::default(),
    }
  }

  pub fn params(&self) -> &GmskParams {
    &self.params
  }

  pub fn state(&self) -> SyncState {
    self.state
  }

  pub fn framedatastats(&self) -> FrameDataStats {
    self.stats
  }

  pub fn reset_framedatastats(&mut self) {
    self.stats = FrameDataStats::default();
  }

  /// Abandon any partially received frame and go back to searching.  
  /// Statistics are kept.
  pub fn reset(&mut self) {
    self.transition(SyncEvent::Reset);
    self.header_bits.clear();
    self.payload_bits.clear();
    self.header = None;
    self.detector.reset();
  }

  /// Process a block of samples, dropping the decoded frames.
  /// Only the statistics record them.
  pub fn execute(&mut self, samples: &[Complex32]) {
    self.execute_with(samples, &mut Discard);
  }

  /// Process a block of samples of any length.
  /// `handler` is invoked once for every frame completed within the block.
  pub fn execute_with<H: FrameHandler + ?Sized>(&mut self, samples: &[Complex32], handler: &mut H) {
    for &sample in samples {
      self.step(sample, handler);
    }
  }

  fn transition(&mut self, event: SyncEvent) {
    let next = next_state(self.state, event);
    if next != self.state {
      debug!("{:?} --{:?}--> {:?}", self.state, event, next);
    }
    self.state = next;
  }

  fn step<H: FrameHandler + ?Sized>(&mut self, sample: Complex32, handler: &mut H) {
    let phase_step = discriminate(sample, self.prev_sample);
    self.prev_sample = sample;
    self.detector.push(sample, phase_step);

    match self.state {
      SyncState::Detect => {
        if let Some(detection) = self.detector.search() {
          self.on_detection(&detection);
        }
      }
      SyncState::Header => {
        if let Some(soft) = self.tracker.push(phase_step) {
          self.header_bits.push(soft > 0.0);
          if self.header_bits.len() == HEADER_SYMBOLS {
            self.on_header(handler);
          }
        }
      }
      SyncState::Payload => {
        if let Some(soft) = self.tracker.push(phase_step) {
          self.payload_bits.push(soft > 0.0);
          if self.payload_bits.len() >= self.payload_bit_len {
            self.on_payload(handler);
          }
        }
      }
    }
  }

  fn on_detection(&mut self, detection: &Detection) {
    self.stats.num_frames_detected += 1;
    debug!(
      "frame detected: metric {:.3}, timing {:+.3}, cfo {:+.5}, phase {:+.3}",
      detection.metric, detection.timing_offset, detection.cfo, detection.phase_offset
    );
    // the first header symbol peaks m symbols after the end of the preamble
    let delay = self.params.filter_semi_length * self.params.samples_per_symbol + 1;
    self.tracker.acquire(detection, delay);
    self.header_bits.clear();
    self.header = None;
    self.transition(SyncEvent::FrameDetected);
  }

  fn on_header<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) {
    let decoded = FrameHeader::decode(&bits_to_bytes(&self.header_bits));
    self.header_bits.clear();
    if decoded.valid {
      self.stats.num_headers_valid += 1;
    }
    debug!(
      "header decoded: valid {}, accepted {}, {} payload bytes",
      decoded.valid, decoded.accepted, decoded.header.payload_len
    );

    self.transition(SyncEvent::HeaderDecoded {
      accepted: decoded.accepted,
    });
    if !decoded.accepted {
      self.detector.reset();
      return;
    }

    self.payload_bit_len = 8 * decoded.header.payload_packetizer().encoded_len();
    self.payload_bits.clear();
    self.header = Some(decoded);
    if self.payload_bit_len == 0 {
      self.on_payload(handler);
    }
  }

  fn on_payload<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) {
    if let Some(decoded) = self.header.take() {
      let (payload, payload_valid) = decoded.header.payload_packetizer().decode(&bits_to_bytes(&self.payload_bits));
      if payload_valid {
        self.stats.num_payloads_valid += 1;
      }
      self.stats.num_bytes_received += payload.len();

      let report = FrameReport {
        header: &decoded.header.user,
        header_valid: decoded.valid,
        payload: &payload,
        payload_valid,
        stats: self.tracker.stats(),
      };
      debug!(
        "payload decoded: valid {}, {} bytes, {}",
        payload_valid,
        payload.len(),
        report.stats
      );
      handler.on_frame(&report);
    }
    self.payload_bits.clear();
    self.transition(SyncEvent::PayloadDecoded);
    self.detector.reset();
  }
}

impl Default for FrameSync {
  fn default() -> Self {
    Self::build(GmskParams::default(), SyncConfig::default())
  }
}
