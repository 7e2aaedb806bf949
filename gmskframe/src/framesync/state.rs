/// Where the synchronizer is within a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncState {
  /// searching the sample stream for a preamble
  #[default]
  Detect,
  /// collecting header symbols
  Header,
  /// collecting payload symbols
  Payload,
}

/// Inputs of the state machine, produced by the signal processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncEvent {
  FrameDetected,
  /// `accepted` is false when the payload length or a scheme identifier is unusable
  HeaderDecoded { accepted: bool },
  PayloadDecoded,
  Reset,
}

/// The transition function. Events that make no sense in a state leave it unchanged.
pub fn next_state(state: SyncState, event: SyncEvent) -> SyncState {
  use SyncEvent::*;
  use SyncState::*;
  match (state, event) {
    (_, Reset) => Detect,
    (Detect, FrameDetected) => Header,
    (Header, HeaderDecoded { accepted: true }) => Payload,
    (Header, HeaderDecoded { accepted: false }) => Detect,
    (Payload, PayloadDecoded) => Detect,
    (state, _) => state,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const STATES: [SyncState; 3] = [SyncState::Detect, SyncState::Header, SyncState::Payload];

  #[test]
  fn frame_cycle() {
    let mut state = SyncState::default();
    assert_eq!(state, SyncState::Detect);
    for (event, expected) in [
      (SyncEvent::FrameDetected, SyncState::Header),
      (SyncEvent::HeaderDecoded { accepted: true }, SyncState::Payload),
      (SyncEvent::PayloadDecoded, SyncState::Detect),
    ] {
      state = next_state(state, event);
      assert_eq!(state, expected);
    }
  }

  #[test]
  fn rejected_header() {
    let state = next_state(SyncState::Header, SyncEvent::HeaderDecoded { accepted: false });
    assert_eq!(state, SyncState::Detect);
  }

  #[test]
  fn reset_from_anywhere() {
    for state in STATES {
      assert_eq!(next_state(state, SyncEvent::Reset), SyncState::Detect);
    }
  }

  #[test]
  fn unexpected_events_ignored() {
    assert_eq!(next_state(SyncState::Header, SyncEvent::FrameDetected), SyncState::Header);
    assert_eq!(next_state(SyncState::Payload, SyncEvent::FrameDetected), SyncState::Payload);
    assert_eq!(next_state(SyncState::Detect, SyncEvent::PayloadDecoded), SyncState::Detect);
    assert_eq!(
      next_state(SyncState::Payload, SyncEvent::HeaderDecoded { accepted: true }),
      SyncState::Payload
    );
    assert_eq!(
      next_state(SyncState::Detect, SyncEvent::HeaderDecoded { accepted: false }),
      SyncState::Detect
    );
  }
}
