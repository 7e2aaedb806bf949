use std::fmt;

/// Cumulative counters of a synchronizer, kept until explicitly reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameDataStats {
  pub num_frames_detected: usize,
  pub num_headers_valid: usize,
  pub num_payloads_valid: usize,
  /// payload bytes of every completed frame, valid or not
  pub num_bytes_received: usize,
}

impl fmt::Display for FrameDataStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "frames detected   : {}", self.num_frames_detected)?;
    writeln!(f, "headers valid     : {}", self.num_headers_valid)?;
    writeln!(f, "payloads valid    : {}", self.num_payloads_valid)?;
    write!(f, "bytes received    : {}", self.num_bytes_received)
  }
}

/// Signal measurements of one decoded frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSyncStats {
  /// error vector magnitude of the symbol decisions, dB
  pub evm_db: f32,
  /// mean power of the preamble window, dB
  pub rssi_db: f32,
  /// carrier frequency offset at the end of the frame, radians per sample
  pub cfo: f32,
  /// carrier phase at the end of the frame, radians
  pub phase_offset: f32,
  /// fractional symbol timing at the end of the frame, in samples
  pub timing_offset: f32,
  /// number of demodulated header and payload symbols
  pub num_symbols: usize,
}

impl fmt::Display for FrameSyncStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "EVM {:6.2} dB, RSSI {:6.2} dB, CFO {:+.5} rad/sample, phase {:+.3}, timing {:+.3}, {} symbols",
      self.evm_db, self.rssi_db, self.cfo, self.phase_offset, self.timing_offset, self.num_symbols
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn data_stats_report() {
    let stats = FrameDataStats {
      num_frames_detected: 3,
      num_headers_valid: 2,
      num_payloads_valid: 1,
      num_bytes_received: 80,
    };
    let text = stats.to_string();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().last().unwrap().ends_with("80"));
    assert_eq!(FrameDataStats::default().num_frames_detected, 0);
  }
}
