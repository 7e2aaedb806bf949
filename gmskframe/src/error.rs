/// Errors surfaced by the frame generator and synchronizer APIs.
///
/// Impaired or malformed input samples are never reported here,
/// they only show up as validity flags on the decoded frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
  /// invalid construction parameters
  #[error("invalid configuration: {0}")]
  Config(String),

  /// API called in the wrong order
  #[error("invalid state: {0}")]
  State(&'static str),

  #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
  PayloadTooLong { len: usize, max: usize },

  /// a codec could not be set up for the requested message length
  #[error("codec error: {0}")]
  Codec(String),

  /// a CRC or FEC identifier with no matching scheme
  #[error("unknown codec scheme identifier {0}")]
  UnknownScheme(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
