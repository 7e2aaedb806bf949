//! Continuous-phase GMSK with modulation index 1/2.
//!
//! Every NRZ symbol enters the Gaussian frequency filter as an impulse on the
//! first sample of its period. The filter taps sum to one, so each symbol
//! advances the carrier phase by exactly `±pi/2` once its pulse has passed.

use num_complex::Complex32;
use std::{collections::VecDeque, f32::consts::FRAC_PI_2, f64::consts::PI};

use crate::{config::GmskParams, helper::wrap_phase};

/// Complementary error function, Abramowitz and Stegun 7.1.26 (|error| < 1.5e-7).
fn erfc(x: f64) -> f64 {
  if x < 0.0 {
    return 2.0 - erfc(-x);
  }
  let t = 1.0 / (1.0 + 0.3275911 * x);
  let poly = t * (0.254829592 + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
  poly * (-x * x).exp()
}

/// Gaussian tail probability.
fn q_function(x: f64) -> f64 {
  0.5 * erfc(x / std::f64::consts::SQRT_2)
}

/// Gaussian frequency pulse: a one-symbol rectangle smoothed by a Gaussian of
/// bandwidth `bt`, spanning `2m` symbols with `k` samples per symbol.
/// The `2km + 1` taps are normalized to sum to one, the peak is tap `km`.
pub fn gaussian_pulse(params: &GmskParams) -> Vec<f32> {
  let k = params.samples_per_symbol;
  let m = params.filter_semi_length;
  let scale = 2.0 * PI * params.bt as f64 / 2f64.ln().sqrt();

  let pulse: Vec<f64> = (0..=2 * k * m)
    .map(|i| {
      let t = (i as f64 - (k * m) as f64) / k as f64;
      q_function(scale * (t - 0.5)) - q_function(scale * (t + 0.5))
    })
    .collect();
  let sum: f64 = pulse.iter().sum();
  pulse.into_iter().map(|tap| (tap / sum) as f32).collect()
}

/// Factor turning a per-sample phase advance into symbol units:
/// a long run of identical symbols maps to `±1`.
pub fn symbol_scale(samples_per_symbol: usize) -> f32 {
  samples_per_symbol as f32 / FRAC_PI_2
}

/// Instantaneous phase advance between two consecutive samples, in radians.
pub fn discriminate(sample: Complex32, prev: Complex32) -> f32 {
  (sample * prev.conj()).arg()
}

/// Streaming GMSK modulator, one output sample per call of [`GmskModulator::step`].
#[derive(Clone, Debug)]
pub struct GmskModulator {
  taps: Vec<f32>,
  /// upsampled symbol impulses, newest first
  delay: VecDeque<f32>,
  phase: f32,
}

impl GmskModulator {
  pub fn new(params: &GmskParams) -> Self {
    let taps = gaussian_pulse(params);
    let delay = std::iter::repeat(0.0).take(taps.len()).collect();
    Self { taps, delay, phase: 0.0 }
  }

  /// clear filter memory and phase
  pub fn reset(&mut self) {
    self.delay.iter_mut().for_each(|x| *x = 0.0);
    self.phase = 0.0;
  }

  /// Produce one unit-magnitude sample.  
  /// `impulse` is the NRZ symbol on the first sample of a symbol period and zero otherwise.
  pub fn step(&mut self, impulse: f32) -> Complex32 {
    self.delay.pop_back();
    self.delay.push_front(impulse);
    let freq = self.delay.iter().zip(self.taps.iter()).fold(0.0, |sum, (u, g)| sum + u * g);
    self.phase = wrap_phase(self.phase + FRAC_PI_2 * freq);
    Complex32::from_polar(1.0, self.phase)
  }

  /// Modulate a whole symbol sequence, `k` samples per symbol.
  pub fn modulate(&mut self, symbols: &[f32], samples_per_symbol: usize) -> Vec<Complex32> {
    symbols
      .iter()
      .flat_map(|&s| std::iter::once(s).chain(std::iter::repeat(0.0).take(samples_per_symbol - 1)))
      .map(|impulse| self.step(impulse))
      .collect()
  }
}
