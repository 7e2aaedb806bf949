use crate::{
  config::SyncConfig,
  helper::wrap_phase,
  modem::symbol_scale,
  stats::FrameSyncStats,
};

use super::detect::Detection;

/// Symbol decisions from the discriminator output, with timing, carrier
/// frequency and amplitude tracking.
///
/// Timing is held as a fractional offset `mu` in samples around the nominal
/// decision sample. The soft symbol is linearly interpolated between the
/// nominal sample and its neighbor on the side of `mu`.
#[derive(Clone, Debug)]
pub struct SymbolTracker {
  samples_per_symbol: usize,
  scale: f32,
  config: SyncConfig,
  /// amplitude the tracker starts from after acquisition
  nominal_amplitude: f32,
  /// discriminator output in symbol units, newest first
  history: [f32; 3],
  /// samples until the next decision
  countdown: usize,
  mu: f32,
  cfo: f32,
  phase: f32,
  amplitude: f32,
  error_energy: f32,
  num_symbols: usize,
  rssi_db: f32,
}

impl SymbolTracker {
  pub fn new(samples_per_symbol: usize, nominal_amplitude: f32, config: SyncConfig) -> Self {
    Self {
      samples_per_symbol,
      scale: symbol_scale(samples_per_symbol),
      config,
      nominal_amplitude,
      history: [0.0; 3],
      countdown: 1,
      mu: 0.0,
      cfo: 0.0,
      phase: 0.0,
      amplitude: nominal_amplitude,
      error_energy: 0.0,
      num_symbols: 0,
      rssi_db: 0.0,
    }
  }

  /// Start tracking a new frame.  
  /// The first decision is taken `delay` samples after the detection sample.
  pub fn acquire(&mut self, detection: &Detection, delay: usize) {
    self.countdown = delay.max(1);
    self.mu = detection.timing_offset;
    self.cfo = detection.cfo;
    self.phase = detection.phase_offset;
    self.amplitude = self.nominal_amplitude;
    self.error_energy = 0.0;
    self.num_symbols = 0;
    self.rssi_db = 10.0 * detection.power.log10();
  }

  /// Feed the phase step of one sample.  
  /// Return the soft symbol when a decision instant has passed.
  pub fn push(&mut self, phase_step: f32) -> Option<f32> {
    let y = (phase_step - self.cfo) * self.scale;
    self.history = [y, self.history[0], self.history[1]];
    self.phase = wrap_phase(self.phase + self.cfo);

    self.countdown -= 1;
    if self.countdown > 0 {
      return None;
    }
    self.countdown = self.samples_per_symbol;

    let [late, center, early] = self.history;
    // linear interpolation over [-1, 1] samples around the nominal decision sample
    let interpolate = |t: f32| {
      if t >= 0.0 {
        center + t * (late - center)
      } else {
        center + t * (center - early)
      }
    };
    let soft = interpolate(self.mu);
    let decision = if soft >= 0.0 { 1.0 } else { -1.0 };

    let error = soft - decision * self.amplitude;
    self.error_energy += error * error;
    self.num_symbols += 1;

    self.amplitude += self.config.amplitude_gain * (soft.abs() - self.amplitude);
    self.cfo += self.config.frequency_gain * error / self.scale;
    // early-late, half a sample either side of the current decision point
    let timing_error = decision * (interpolate(self.mu + 0.5) - interpolate(self.mu - 0.5));
    self.mu = (self.mu + self.config.timing_gain * timing_error).clamp(-0.5, 0.5);
    Some(soft)
  }

  pub fn stats(&self) -> FrameSyncStats {
    let evm_db = if self.num_symbols > 0 && self.amplitude > 0.0 {
      let rms = (self.error_energy / self.num_symbols as f32).sqrt();
      20.0 * (rms / self.amplitude).log10()
    } else {
      0.0
    };
    FrameSyncStats {
      evm_db,
      rssi_db: self.rssi_db,
      cfo: self.cfo,
      phase_offset: self.phase,
      timing_offset: self.mu,
      num_symbols: self.num_symbols,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn detection(timing_offset: f32, cfo: f32) -> Detection {
    Detection {
      metric: 1.0,
      timing_offset,
      phase_offset: 0.0,
      cfo,
      power: 1.0,
    }
  }

  #[test]
  fn decision_schedule() {
    let mut tracker = SymbolTracker::new(4, 1.0, SyncConfig::default());
    tracker.acquire(&detection(0.0, 0.0), 3);
    let decisions: Vec<usize> = (0..20)
      .filter_map(|i| tracker.push(0.1).map(|_| i))
      .collect();
    assert_eq!(decisions, vec![2, 6, 10, 14, 18]);
    assert_eq!(tracker.stats().num_symbols, 5);
  }

  #[test]
  fn tracks_frequency_offset() {
    let k = 2;
    let scale = symbol_scale(k);
    let offset = 0.05;
    let symbols = [1.0, 1.0, -1.0, 1.0, -1.0, -1.0, 1.0, -1.0];

    let mut tracker = SymbolTracker::new(k, 1.0, SyncConfig::default());
    tracker.acquire(&detection(0.0, 0.0), 2);
    // symbol peaks on even samples, each decision fires one sample later
    let mut decided = Vec::new();
    for i in 0..2 * 4000 {
      let y = if i % 2 == 0 { symbols[(i / 2) % symbols.len()] } else { 0.0 };
      if let Some(v) = tracker.push(y / scale + offset) {
        decided.push(v);
      }
    }
    assert_eq!(decided.len(), 4000);
    for (j, v) in decided.iter().enumerate() {
      assert_eq!(*v > 0.0, symbols[j % symbols.len()] > 0.0);
    }
    assert!((tracker.stats().cfo - offset).abs() < 0.005);
    assert!(tracker.stats().evm_db < -20.0);
  }

  #[test]
  fn timing_is_bounded() {
    let mut tracker = SymbolTracker::new(2, 1.0, SyncConfig {
      timing_gain: 0.5,
      ..Default::default()
    });
    tracker.acquire(&detection(0.5, 0.0), 1);
    for i in 0..100 {
      tracker.push(if i % 3 == 0 { 1.0 } else { -1.0 });
      assert!(tracker.stats().timing_offset.abs() <= 0.5);
    }
  }

  #[test]
  fn nan_input_does_not_panic() {
    let mut tracker = SymbolTracker::new(2, 1.0, SyncConfig::default());
    tracker.acquire(&detection(0.0, 0.0), 1);
    for _ in 0..10 {
      tracker.push(f32::NAN);
    }
    assert_eq!(tracker.stats().num_symbols, 5);
  }
}
