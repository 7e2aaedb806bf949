use crate::{
  codec::{CrcScheme, FecScheme, Packetizer},
  config::{HEADER_LEN, MAX_PAYLOAD_LEN, PROTOCOL_VERSION},
  error::{Error, Result},
};

/// user bytes, version, payload length (u16 big-endian) and three scheme identifiers
pub const HEADER_BLOCK_LEN: usize = HEADER_LEN + 6;
/// header block after CRC-16 and Hamming(8,4)
pub const HEADER_ENCODED_LEN: usize = 2 * (HEADER_BLOCK_LEN + 2);
pub const HEADER_SYMBOLS: usize = 8 * HEADER_ENCODED_LEN;

const HEADER_CRC: CrcScheme = CrcScheme::Crc16;
const HEADER_FEC: FecScheme = FecScheme::Hamming84;

fn header_packetizer() -> Packetizer {
  Packetizer::new(HEADER_BLOCK_LEN, HEADER_CRC, HEADER_FEC, FecScheme::None)
}

/// Everything a receiver needs to know about a frame before its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
  pub user: [u8; HEADER_LEN],
  pub payload_len: usize,
  pub crc: CrcScheme,
  pub fec_inner: FecScheme,
  pub fec_outer: FecScheme,
}

/// A header recovered from the air.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedHeader {
  /// Fields as received.  
  /// Unknown scheme identifiers are replaced by `None` and flagged through `accepted`.
  pub header: FrameHeader,
  /// checksum matched and the version is ours
  pub valid: bool,
  /// the payload description can be acted on: length in range and schemes known
  pub accepted: bool,
}

impl FrameHeader {
  /// the codec chain protecting this frame's payload
  pub fn payload_packetizer(&self) -> Packetizer {
    Packetizer::new(self.payload_len, self.crc, self.fec_inner, self.fec_outer)
  }

  /// Serialize and protect the header, [`HEADER_ENCODED_LEN`] bytes.
  pub fn encode(&self) -> Result<Vec<u8>> {
    if self.payload_len > MAX_PAYLOAD_LEN {
      return Err(Error::PayloadTooLong {
        len: self.payload_len,
        max: MAX_PAYLOAD_LEN,
      });
    }
    let mut block = Vec::with_capacity(HEADER_BLOCK_LEN);
    block.extend_from_slice(&self.user);
    block.push(PROTOCOL_VERSION);
    block.extend_from_slice(&(self.payload_len as u16).to_be_bytes());
    block.push(self.crc as u8);
    block.push(self.fec_inner as u8);
    block.push(self.fec_outer as u8);
    header_packetizer().encode(&block)
  }

  /// Undo [`FrameHeader::encode`], `encoded` must hold [`HEADER_ENCODED_LEN`] bytes.
  pub fn decode(encoded: &[u8]) -> DecodedHeader {
    let (block, crc_ok) = header_packetizer().decode(encoded);

    let mut user = [0; HEADER_LEN];
    user.copy_from_slice(&block[..HEADER_LEN]);
    let version = block[HEADER_LEN];
    let payload_len = u16::from_be_bytes([block[HEADER_LEN + 1], block[HEADER_LEN + 2]]) as usize;
    let crc = CrcScheme::try_from(block[HEADER_LEN + 3]);
    let fec_inner = FecScheme::try_from(block[HEADER_LEN + 4]);
    let fec_outer = FecScheme::try_from(block[HEADER_LEN + 5]);

    let accepted = payload_len <= MAX_PAYLOAD_LEN && crc.is_ok() && fec_inner.is_ok() && fec_outer.is_ok();
    DecodedHeader {
      header: FrameHeader {
        user,
        payload_len,
        crc: crc.unwrap_or_default(),
        fec_inner: fec_inner.unwrap_or_default(),
        fec_outer: fec_outer.unwrap_or_default(),
      },
      valid: crc_ok && version == PROTOCOL_VERSION,
      accepted,
    }
  }
}
