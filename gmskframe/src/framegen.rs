//! Frame assembly and modulation.

use log::debug;
use num_complex::Complex32;
use std::f32::consts::PI;

use crate::{
  codec::{CrcScheme, FecScheme},
  config::{GmskParams, HEADER_LEN, MAX_PAYLOAD_LEN},
  error::{Error, Result},
  frame::{alternating, FrameHeader, FrameLayout, MSequence63},
  helper::bytes_to_symbols,
  modem::GmskModulator,
  traits::PreambleGen,
};

/// Turns a header and a payload into one GMSK frame, emitted in caller-sized blocks.
///
/// ```
/// use gmskframe::{FrameGen, FrameSync};
///
/// let mut gen = FrameGen::default();
/// let mut sync = FrameSync::default();
/// gen.assemble_default(16).unwrap();
/// for block in gen.blocks(64) {
///   sync.execute(&block);
/// }
/// assert_eq!(sync.framedatastats().num_payloads_valid, 1);
/// ```
#[derive(Clone, Debug)]
pub struct FrameGen {
  params: GmskParams,
  layout: FrameLayout,
  modulator: GmskModulator,
  /// NRZ symbols of the whole frame
  symbols: Vec<f32>,
  /// index of the next sample to emit
  cursor: usize,
  assembled: bool,
}

impl FrameGen {
  pub fn new(samples_per_symbol: usize, filter_semi_length: usize, bt: f32) -> Result<Self> {
    Ok(Self::with_params(GmskParams::new(samples_per_symbol, filter_semi_length, bt)?))
  }

  pub fn with_params(params: GmskParams) -> Self {
    Self {
      params,
      layout: FrameLayout::new(&params),
      modulator: GmskModulator::new(&params),
      symbols: Vec::new(),
      cursor: 0,
      assembled: false,
    }
  }

  pub fn params(&self) -> &GmskParams {
    &self.params
  }

  pub fn is_assembled(&self) -> bool {
    self.assembled
  }

  /// Number of samples of the assembled frame, zero when nothing is assembled.
  pub fn frame_len(&self) -> usize {
    if self.assembled {
      self.symbols.len() * self.params.samples_per_symbol
    } else {
      0
    }
  }

  /// Build the symbol sequence of a new frame.  
  /// Fails while a previous frame has not been written out completely.
  pub fn assemble(
    &mut self,
    header: &[u8; HEADER_LEN],
    payload: &[u8],
    crc: CrcScheme,
    fec_inner: FecScheme,
    fec_outer: FecScheme,
  ) -> Result<()> {
    if self.assembled {
      return Err(Error::State("assemble() called while a frame is in progress"));
    }
    if payload.len() > MAX_PAYLOAD_LEN {
      return Err(Error::PayloadTooLong {
        len: payload.len(),
        max: MAX_PAYLOAD_LEN,
      });
    }

    let header = FrameHeader {
      user: *header,
      payload_len: payload.len(),
      crc,
      fec_inner,
      fec_outer,
    };
    let header_block = header.encode()?;
    let payload_block = header.payload_packetizer().encode(payload)?;

    let mut symbols = Vec::with_capacity(self.layout.total_symbols(payload_block.len()));
    symbols.extend(alternating(self.layout.ramp_symbols));
    symbols.extend(MSequence63::generate());
    symbols.extend(bytes_to_symbols(&header_block));
    symbols.extend(bytes_to_symbols(&payload_block));
    symbols.extend(alternating(self.layout.flush_symbols));
    symbols.extend(alternating(self.layout.ramp_symbols));

    debug!(
      "assembled frame: {} payload bytes, {} encoded, {} symbols, crc {}, fec {}/{}",
      payload.len(),
      payload_block.len(),
      symbols.len(),
      crc,
      fec_inner,
      fec_outer
    );
    self.symbols = symbols;
    self.modulator.reset();
    self.cursor = 0;
    self.assembled = true;
    Ok(())
  }

  /// Assemble a test frame: header byte `i` is `i`, payload byte `i` is `i mod 256`, no CRC and no FEC.
  pub fn assemble_default(&mut self, payload_len: usize) -> Result<()> {
    let mut header = [0; HEADER_LEN];
    header.iter_mut().enumerate().for_each(|(i, x)| *x = i as u8);
    let payload: Vec<u8> = (0..payload_len).map(|i| i as u8).collect();
    self.assemble(&header, &payload, CrcScheme::None, FecScheme::None, FecScheme::None)
  }

  /// raised-cosine amplitude envelope over the first and last `m` symbols
  fn envelope(&self, n: usize, frame_len: usize) -> f32 {
    let ramp_len = self.layout.preamble_start();
    let edge = n.min(frame_len - 1 - n);
    if edge >= ramp_len {
      1.0
    } else {
      0.5 * (1.0 - (PI * (edge + 1) as f32 / (ramp_len + 1) as f32).cos())
    }
  }

  /// Fill `buf` with the next samples of the frame.
  ///
  /// Samples past the end of the frame are zero. Return `true` from the call
  /// that emits the last frame sample, after which a new frame may be assembled.
  pub fn write(&mut self, buf: &mut [Complex32]) -> Result<bool> {
    if !self.assembled {
      return Err(Error::State("write() called before assemble()"));
    }
    let k = self.params.samples_per_symbol;
    let frame_len = self.frame_len();
    for out in buf.iter_mut() {
      *out = if self.cursor < frame_len {
        let n = self.cursor;
        let impulse = if n % k == 0 { self.symbols[n / k] } else { 0.0 };
        self.cursor += 1;
        self.modulator.step(impulse) * self.envelope(n, frame_len)
      } else {
        Complex32::new(0.0, 0.0)
      };
    }

    let complete = self.cursor >= frame_len;
    if complete {
      debug!("frame complete after {} samples", frame_len);
      self.assembled = false;
    }
    Ok(complete)
  }

  /// abandon the frame in progress
  pub fn reset(&mut self) {
    self.assembled = false;
    self.cursor = 0;
    self.symbols.clear();
    self.modulator.reset();
  }

  /// Iterate over owned blocks of `block_len` samples until the frame completes.
  /// Yields nothing when no frame is assembled.
  pub fn blocks(&mut self, block_len: usize) -> Blocks<'_> {
    Blocks {
      gen: self,
      block_len: block_len.max(1),
    }
  }
}

impl Default for FrameGen {
  fn default() -> Self {
    Self::with_params(GmskParams::default())
  }
}

pub struct Blocks<'a> {
  gen: &'a mut FrameGen,
  block_len: usize,
}

impl Iterator for Blocks<'_> {
  type Item = Vec<Complex32>;

  fn next(&mut self) -> Option<Self::Item> {
    let mut block = vec![Complex32::new(0.0, 0.0); self.block_len];
    self.gen.write(&mut block).ok()?;
    Some(block)
  }
}
