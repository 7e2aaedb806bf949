use super::{CrcScheme, FecScheme};
use crate::error::{Error, Result};

/// Message protection pipeline: `fec_outer(fec_inner(msg ‖ crc(msg)))`.
///
/// Encoder and decoder agree on the layout through the message length and
/// the three scheme selectors, nothing else is transmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packetizer {
  msg_len: usize,
  crc: CrcScheme,
  fec_inner: FecScheme,
  fec_outer: FecScheme,
}

impl Packetizer {
  pub fn new(msg_len: usize, crc: CrcScheme, fec_inner: FecScheme, fec_outer: FecScheme) -> Self {
    Self {
      msg_len,
      crc,
      fec_inner,
      fec_outer,
    }
  }

  pub fn msg_len(&self) -> usize {
    self.msg_len
  }

  fn checked_len(&self) -> usize {
    self.msg_len + self.crc.len()
  }

  fn inner_len(&self) -> usize {
    self.fec_inner.encoded_len(self.checked_len())
  }

  /// number of bytes produced by [`Packetizer::encode`]
  pub fn encoded_len(&self) -> usize {
    self.fec_outer.encoded_len(self.inner_len())
  }

  pub fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
    if msg.len() != self.msg_len {
      return Err(Error::Codec(format!(
        "packetizer expects {} bytes, got {}",
        self.msg_len,
        msg.len()
      )));
    }
    let mut checked = msg.to_vec();
    checked.extend(self.crc.checksum(msg));
    let inner = self.fec_inner.encode(&checked)?;
    self.fec_outer.encode(&inner)
  }

  /// Recover the message.  
  /// Valid only when both codes decode and the checksum matches.
  pub fn decode(&self, encoded: &[u8]) -> (Vec<u8>, bool) {
    let (inner, outer_ok) = self.fec_outer.decode(encoded, self.inner_len());
    let (mut checked, inner_ok) = self.fec_inner.decode(&inner, self.checked_len());
    let check = checked.split_off(self.msg_len);
    let crc_ok = self.crc.verify(&checked, &check);
    (checked, outer_ok && inner_ok && crc_ok)
  }
}
