use num_complex::Complex32;

use crate::{
  config::{GmskParams, PREAMBLE_LEN},
  helper::{energy, msequence},
  modem::{discriminate, symbol_scale, GmskModulator},
  traits::PreambleGen,
};

/// the 63-symbol maximal-length sequence every frame starts with
pub struct MSequence63;

impl PreambleGen for MSequence63 {
  const PREAMBLE_LEN: usize = PREAMBLE_LEN;

  fn generate() -> Vec<f32> {
    msequence(Self::PREAMBLE_LEN)
      .into_iter()
      .map(|bit| if bit { 1.0 } else { -1.0 })
      .collect()
  }
}

/// `+1, -1, +1, ...` used for the ramps and the flush
pub fn alternating(len: usize) -> impl Iterator<Item = f32> {
  (0..len).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
}

/// The preamble exactly as a generator emits it, at the sample rate.
///
/// The modulator starts from rest, so the ramp-up symbols run through it first
/// and only the samples of the preamble symbol periods are kept.
#[derive(Clone, Debug)]
pub struct PreambleReference {
  pub samples: Vec<Complex32>,
  pub energy: f32,
  /// sum of the phase advances between consecutive reference samples
  pub phase_advance: f32,
  /// mean magnitude of the discriminator output at preamble symbol centers, in symbol units
  pub symbol_amplitude: f32,
}

impl PreambleReference {
  pub fn new(params: &GmskParams) -> Self {
    let k = params.samples_per_symbol;
    let m = params.filter_semi_length;
    let preamble = MSequence63::generate();
    let symbols: Vec<f32> = alternating(m).chain(preamble.iter().copied()).collect();

    let mut modulator = GmskModulator::new(params);
    let samples = modulator.modulate(&symbols, k).split_off(m * k);
    let energy = energy(samples.iter());
    let steps: Vec<f32> = samples.windows(2).map(|w| discriminate(w[1], w[0])).collect();
    let phase_advance = steps.iter().sum();

    // symbol j of the prefix peaks at sample j*k + m*k, offset by m*k into the reference
    let scale = symbol_scale(k);
    let centers: Vec<f32> = (0..symbols.len())
      .map(|j| j * k)
      .filter(|&n| n >= 1 && n < samples.len())
      .map(|n| steps[n - 1].abs() * scale)
      .collect();
    let symbol_amplitude = if centers.is_empty() {
      1.0
    } else {
      centers.iter().sum::<f32>() / centers.len() as f32
    };

    Self {
      samples,
      energy,
      phase_advance,
      symbol_amplitude,
    }
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn preamble_symbols() {
    let preamble = MSequence63::generate();
    assert_eq!(preamble.len(), MSequence63::PREAMBLE_LEN);
    assert_eq!(&preamble[..7], &[1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0]);
  }

  #[test]
  fn reference_shape() {
    for (k, m, bt) in [(2, 3, 0.5), (2, 12, 0.3), (4, 1, 1.0)] {
      let params = GmskParams::new(k, m, bt).unwrap();
      let reference = PreambleReference::new(&params);
      assert_eq!(reference.len(), 63 * k);
      assert!((reference.energy - (63 * k) as f32).abs() < 1e-2);
      assert!(reference.symbol_amplitude > 0.5 && reference.symbol_amplitude < 1.05);
    }
  }
}
