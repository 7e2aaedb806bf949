use crate::error::{Error, Result};

/// number of user header bytes carried by every frame
pub const HEADER_LEN: usize = 8;
/// largest payload a frame may carry, also the bound checked on decoded length fields
pub const MAX_PAYLOAD_LEN: usize = 4096;
/// symbols in the maximal-length preamble sequence
pub const PREAMBLE_LEN: usize = 63;
/// version byte embedded in the protected header block
pub const PROTOCOL_VERSION: u8 = 1;

pub struct DefaultConfig;
impl DefaultConfig {
  pub const SAMPLES_PER_SYMBOL: usize = 2;
  pub const FILTER_SEMI_LENGTH: usize = 3;
  pub const BT: f32 = 0.5;

  pub const DETECT_THRESHOLD: f32 = 0.5;
  pub const TIMING_GAIN: f32 = 0.01;
  pub const FREQUENCY_GAIN: f32 = 0.002;
  pub const AMPLITUDE_GAIN: f32 = 0.02;

  pub fn new<T>() -> T
  where
    Self: Into<T>,
  {
    DefaultConfig.into()
  }
}

/// Modulation parameters shared by a generator and the synchronizer receiving it.
/// They are fixed for the lifetime of either object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GmskParams {
  /// oversampling ratio `k`, at least 2
  pub samples_per_symbol: usize,
  /// Gaussian pulse semi-length `m` in symbols, at least 1
  pub filter_semi_length: usize,
  /// bandwidth-time product, in (0, 1]
  pub bt: f32,
}

impl GmskParams {
  /// validated constructor
  pub fn new(samples_per_symbol: usize, filter_semi_length: usize, bt: f32) -> Result<Self> {
    let params = Self {
      samples_per_symbol,
      filter_semi_length,
      bt,
    };
    params.validate()?;
    Ok(params)
  }

  pub fn validate(&self) -> Result<()> {
    if self.samples_per_symbol < 2 {
      return Err(Error::Config(format!(
        "samples per symbol must be at least 2, got {}",
        self.samples_per_symbol
      )));
    }
    if self.filter_semi_length < 1 {
      return Err(Error::Config("filter semi-length must be at least 1".into()));
    }
    // written so that NaN is rejected as well
    if !(self.bt > 0.0 && self.bt <= 1.0) {
      return Err(Error::Config(format!(
        "bandwidth-time product must be in (0,1], got {}",
        self.bt
      )));
    }
    Ok(())
  }
}

impl Default for GmskParams {
  fn default() -> Self {
    DefaultConfig::new()
  }
}

impl From<DefaultConfig> for GmskParams {
  fn from(_: DefaultConfig) -> Self {
    Self {
      samples_per_symbol: DefaultConfig::SAMPLES_PER_SYMBOL,
      filter_semi_length: DefaultConfig::FILTER_SEMI_LENGTH,
      bt: DefaultConfig::BT,
    }
  }
}

/// Tuning knobs of the synchronizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncConfig {
  /// normalized preamble correlation needed to start peak search, in (0, 1)
  pub detect_threshold: f32,
  /// gain of the symbol timing loop
  pub timing_gain: f32,
  /// gain of the decision-directed carrier frequency loop
  pub frequency_gain: f32,
  /// gain of the symbol amplitude tracker
  pub amplitude_gain: f32,
}

impl SyncConfig {
  pub fn validate(&self) -> Result<()> {
    if !(self.detect_threshold > 0.0 && self.detect_threshold < 1.0) {
      return Err(Error::Config(format!(
        "detection threshold must be in (0,1), got {}",
        self.detect_threshold
      )));
    }
    let gains = [self.timing_gain, self.frequency_gain, self.amplitude_gain];
    if !gains.iter().all(|g| (0.0..1.0).contains(g)) {
      return Err(Error::Config(format!("loop gains must be in [0,1), got {:?}", gains)));
    }
    Ok(())
  }
}

impl Default for SyncConfig {
  fn default() -> Self {
    DefaultConfig::new()
  }
}

impl From<DefaultConfig> for SyncConfig {
  fn from(_: DefaultConfig) -> Self {
    Self {
      detect_threshold: DefaultConfig::DETECT_THRESHOLD,
      timing_gain: DefaultConfig::TIMING_GAIN,
      frequency_gain: DefaultConfig::FREQUENCY_GAIN,
      amplitude_gain: DefaultConfig::AMPLITUDE_GAIN,
    }
  }
}
