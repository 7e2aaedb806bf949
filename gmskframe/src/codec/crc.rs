use crc::{Crc, CRC_16_IBM_3740, CRC_24_OPENPGP, CRC_32_ISO_HDLC, CRC_8_GSM_A};

use super::CrcScheme;

const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_GSM_A);
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);
const CRC24: Crc<u32> = Crc::<u32>::new(&CRC_24_OPENPGP);
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

impl CrcScheme {
  /// number of check bytes appended to a message
  pub const fn len(self) -> usize {
    match self {
      CrcScheme::None => 0,
      CrcScheme::Checksum8 | CrcScheme::Crc8 => 1,
      CrcScheme::Crc16 => 2,
      CrcScheme::Crc24 => 3,
      CrcScheme::Crc32 => 4,
    }
  }

  pub const fn is_none(self) -> bool {
    matches!(self, CrcScheme::None)
  }

  /// compute the check bytes of `data`, big-endian
  pub fn checksum(self, data: &[u8]) -> Vec<u8> {
    match self {
      CrcScheme::None => Vec::new(),
      CrcScheme::Checksum8 => {
        let sum = data.iter().fold(0u8, |s, &b| s.wrapping_add(b));
        vec![!sum]
      }
      CrcScheme::Crc8 => vec![CRC8.checksum(data)],
      CrcScheme::Crc16 => CRC16.checksum(data).to_be_bytes().to_vec(),
      CrcScheme::Crc24 => CRC24.checksum(data).to_be_bytes()[1..].to_vec(),
      CrcScheme::Crc32 => CRC32.checksum(data).to_be_bytes().to_vec(),
    }
  }

  /// check `data` against previously computed check bytes
  pub fn verify(self, data: &[u8], check: &[u8]) -> bool {
    check.len() == self.len() && self.checksum(data) == check
  }
}

/// CRC-8 tag of a single shard, shared with the erasure coder
pub(super) fn shard_tag(data: &[u8]) -> u8 {
  CRC8.checksum(data)
}
