use log::trace;
use num_complex::Complex32;
use std::collections::VecDeque;

use crate::{
  frame::PreambleReference,
  helper::{correlate, energy},
};

/// Acquisition results handed from the detector to the symbol tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
  /// normalized correlation at the peak
  pub metric: f32,
  /// fractional peak position relative to the peak sample, in [-0.5, 0.5]
  pub timing_offset: f32,
  /// carrier phase at the peak, radians
  pub phase_offset: f32,
  /// carrier frequency offset, radians per sample
  pub cfo: f32,
  /// mean power of the preamble window
  pub power: f32,
}

/// Sliding normalized correlation against the preamble reference.
///
/// Once the metric crosses the threshold the detector keeps going until the
/// metric drops, so a detection is reported one sample after the peak.
#[derive(Clone, Debug)]
pub struct PreambleDetector {
  reference: PreambleReference,
  threshold: f32,
  window: VecDeque<Complex32>,
  /// discriminator output of each window sample
  phase_steps: VecDeque<f32>,
  seeking: bool,
  /// metrics of the two previous windows, older first
  metrics: [f32; 2],
  prev_correlation: Complex32,
  prev_energy: f32,
}

impl PreambleDetector {
  pub fn new(reference: PreambleReference, threshold: f32) -> Self {
    let len = reference.len();
    Self {
      reference,
      threshold,
      window: std::iter::repeat(Complex32::new(0.0, 0.0)).take(len).collect(),
      phase_steps: std::iter::repeat(0.0).take(len).collect(),
      seeking: false,
      metrics: [0.0; 2],
      prev_correlation: Complex32::new(0.0, 0.0),
      prev_energy: 0.0,
    }
  }

  /// Shift a sample and its phase step into the window.
  /// Must be fed every sample, in every state, to keep the window contiguous.
  pub fn push(&mut self, sample: Complex32, phase_step: f32) {
    self.window.pop_front();
    self.window.push_back(sample);
    self.phase_steps.pop_front();
    self.phase_steps.push_back(phase_step);
  }

  /// Evaluate the window ending at the latest sample.
  pub fn search(&mut self) -> Option<Detection> {
    let correlation = correlate(self.window.iter(), self.reference.samples.iter());
    let energy = energy(self.window.iter());
    // also zero for NaN energy
    let metric = if energy > f32::MIN_POSITIVE {
      correlation.norm() / (energy * self.reference.energy).sqrt()
    } else {
      0.0
    };

    let detection = if self.seeking && metric < self.metrics[1] {
      self.seeking = false;
      Some(self.acquire(metric))
    } else {
      if !self.seeking && metric > self.threshold {
        trace!("preamble metric {:.3} above threshold", metric);
        self.seeking = true;
      }
      None
    };

    self.metrics = [self.metrics[1], metric];
    self.prev_correlation = correlation;
    self.prev_energy = energy;
    detection
  }

  /// measurements of the previous window, which holds the peak
  fn acquire(&self, next_metric: f32) -> Detection {
    let [before, peak] = self.metrics;
    // parabola through the metric around the peak
    let curvature = before - 2.0 * peak + next_metric;
    let timing_offset = if curvature < 0.0 {
      (0.5 * (before - next_metric) / curvature).clamp(-0.5, 0.5)
    } else {
      0.0
    };

    // the newest phase step belongs to the sample after the peak window
    let len = self.phase_steps.len();
    let advance: f32 = self.phase_steps.iter().take(len - 1).sum();
    let cfo = (advance - self.reference.phase_advance) / (len - 1) as f32;

    let detection = Detection {
      metric: peak,
      timing_offset,
      phase_offset: self.prev_correlation.arg(),
      cfo,
      power: self.prev_energy / len as f32,
    };
    trace!("preamble peak {:?}", detection);
    detection
  }

  /// drop any partial peak search, the window is kept
  pub fn reset(&mut self) {
    self.seeking = false;
    self.metrics = [0.0; 2];
  }
}
