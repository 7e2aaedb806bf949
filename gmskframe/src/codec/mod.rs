//! Checksums and forward error correction, selected by enumerated identifiers.
//!
//! Both axes have an identity `None` scheme. Identifiers are the bytes carried
//! in the frame header, so their numeric values are part of the wire format.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

mod crc;

mod fec;
pub use fec::{Fec, NoFec, Repetition};

mod hamming;
pub use hamming::{Hamming74, Hamming84};

mod reed_solomon;
pub use reed_solomon::ReedSolomonFec;

mod packetizer;
pub use packetizer::Packetizer;


/// error-detection scheme appended to a message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CrcScheme {
  #[default]
  None = 0,
  /// 8-bit additive checksum
  Checksum8 = 1,
  Crc8 = 2,
  Crc16 = 3,
  Crc24 = 4,
  Crc32 = 5,
}

/// forward error correction scheme applied before modulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FecScheme {
  #[default]
  None = 0,
  /// every bit sent three times, majority vote
  Repeat3 = 1,
  /// every bit sent five times, majority vote
  Repeat5 = 2,
  /// Hamming(7,4), single error correction
  Hamming74 = 3,
  /// extended Hamming(8,4), single error correction and double error detection
  Hamming84 = 4,
  /// CRC-8 tagged shards with Reed-Solomon erasure parity
  ReedSolomon = 5,
}

impl CrcScheme {
  pub const ALL: [CrcScheme; 6] = [
    CrcScheme::None,
    CrcScheme::Checksum8,
    CrcScheme::Crc8,
    CrcScheme::Crc16,
    CrcScheme::Crc24,
    CrcScheme::Crc32,
  ];

  pub fn name(self) -> &'static str {
    match self {
      CrcScheme::None => "none",
      CrcScheme::Checksum8 => "checksum",
      CrcScheme::Crc8 => "crc8",
      CrcScheme::Crc16 => "crc16",
      CrcScheme::Crc24 => "crc24",
      CrcScheme::Crc32 => "crc32",
    }
  }
}

impl FecScheme {
  pub const ALL: [FecScheme; 6] = [
    FecScheme::None,
    FecScheme::Repeat3,
    FecScheme::Repeat5,
    FecScheme::Hamming74,
    FecScheme::Hamming84,
    FecScheme::ReedSolomon,
  ];

  pub fn name(self) -> &'static str {
    match self {
      FecScheme::None => "none",
      FecScheme::Repeat3 => "rep3",
      FecScheme::Repeat5 => "rep5",
      FecScheme::Hamming74 => "h74",
      FecScheme::Hamming84 => "h84",
      FecScheme::ReedSolomon => "rs8",
    }
  }
}

impl TryFrom<u8> for CrcScheme {
  type Error = Error;

  fn try_from(id: u8) -> Result<Self> {
    CrcScheme::ALL
      .into_iter()
      .find(|s| *s as u8 == id)
      .ok_or(Error::UnknownScheme(id))
  }
}

impl TryFrom<u8> for FecScheme {
  type Error = Error;

  fn try_from(id: u8) -> Result<Self> {
    FecScheme::ALL
      .into_iter()
      .find(|s| *s as u8 == id)
      .ok_or(Error::UnknownScheme(id))
  }
}

impl fmt::Display for CrcScheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl fmt::Display for FecScheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for CrcScheme {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    CrcScheme::ALL
      .into_iter()
      .find(|scheme| scheme.name() == s)
      .ok_or_else(|| Error::Config(format!("unknown crc scheme '{s}'")))
  }
}

impl FromStr for FecScheme {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    FecScheme::ALL
      .into_iter()
      .find(|scheme| scheme.name() == s)
      .ok_or_else(|| Error::Config(format!("unknown fec scheme '{s}'")))
  }
}
