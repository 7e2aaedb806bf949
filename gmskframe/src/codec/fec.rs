use super::{FecScheme, Hamming74, Hamming84, ReedSolomonFec};
use crate::error::Result;

/// A forward error correction code over byte messages.
pub trait Fec {
  /// number of encoded bytes for a message of `msg_len` bytes
  fn encoded_len(&self, msg_len: usize) -> usize;

  /// Add redundancy to `msg`.  
  /// The returned data has exactly [`Fec::encoded_len`] bytes.
  fn encode(&self, msg: &[u8]) -> Result<Vec<u8>>;

  /// Recover a message of `msg_len` bytes.  
  /// Return the best-effort message and whether the code reported success.
  fn decode(&self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool);
}

/// the identity code
pub struct NoFec;

impl Fec for NoFec {
  fn encoded_len(&self, msg_len: usize) -> usize {
    msg_len
  }

  fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
    Ok(msg.to_vec())
  }

  fn decode(&self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool) {
    (encoded[..msg_len].to_vec(), true)
  }
}

/// The message is sent `N` times, each bit is decided by majority vote.  
/// `N` should be odd.
pub struct Repetition<const N: usize>;

impl<const N: usize> Repetition<N> {
  fn majority(copies: impl Iterator<Item = u8> + Clone) -> u8 {
    (0..8).fold(0, |acc, bit| {
      let ones = copies.clone().filter(|c| (c >> bit) & 1 == 1).count();
      if 2 * ones > N {
        acc | (1 << bit)
      } else {
        acc
      }
    })
  }
}

impl<const N: usize> Fec for Repetition<N> {
  fn encoded_len(&self, msg_len: usize) -> usize {
    N * msg_len
  }

  fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
    Ok(msg.repeat(N))
  }

  fn decode(&self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool) {
    let msg = (0..msg_len)
      .map(|i| Self::majority((0..N).map(|copy| encoded[copy * msg_len + i])))
      .collect();
    (msg, true)
  }
}

impl FecScheme {
  fn code(self) -> &'static dyn Fec {
    match self {
      FecScheme::None => &NoFec,
      FecScheme::Repeat3 => &Repetition::<3>,
      FecScheme::Repeat5 => &Repetition::<5>,
      FecScheme::Hamming74 => &Hamming74,
      FecScheme::Hamming84 => &Hamming84,
      FecScheme::ReedSolomon => &ReedSolomonFec,
    }
  }

  pub fn encoded_len(self, msg_len: usize) -> usize {
    self.code().encoded_len(msg_len)
  }

  pub fn encode(self, msg: &[u8]) -> Result<Vec<u8>> {
    self.code().encode(msg)
  }

  /// Decode `encoded` back into `msg_len` bytes.
  /// A length mismatch is reported as a failed decode.
  pub fn decode(self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool) {
    if encoded.len() != self.encoded_len(msg_len) {
      return (vec![0; msg_len], false);
    }
    self.code().decode(encoded, msg_len)
  }
}
