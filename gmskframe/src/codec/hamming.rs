use bitvec::prelude::*;

use super::Fec;
use crate::error::Result;

/// Hamming(7,4) codeword of a data nibble, transmitted as bits 6..0:
/// `p1 p2 d1 p3 d2 d3 d4`
const fn codeword74(nibble: u8) -> u8 {
  let d1 = (nibble >> 3) & 1;
  let d2 = (nibble >> 2) & 1;
  let d3 = (nibble >> 1) & 1;
  let d4 = nibble & 1;
  let p1 = d1 ^ d2 ^ d4;
  let p2 = d1 ^ d3 ^ d4;
  let p3 = d2 ^ d3 ^ d4;
  (p1 << 6) | (p2 << 5) | (d1 << 4) | (p3 << 3) | (d2 << 2) | (d3 << 1) | d4
}

/// extended codeword: the (7,4) codeword followed by an overall parity bit
const fn codeword84(nibble: u8) -> u8 {
  let c = codeword74(nibble);
  (c << 1) | (c.count_ones() & 1) as u8
}

const fn table(extended: bool) -> [u8; 16] {
  let mut t = [0; 16];
  let mut i = 0;
  while i < 16 {
    t[i] = if extended { codeword84(i as u8) } else { codeword74(i as u8) };
    i += 1;
  }
  t
}

const CODEWORDS_74: [u8; 16] = table(false);
const CODEWORDS_84: [u8; 16] = table(true);

/// Nearest codeword search.
/// Return the data nibble and its Hamming distance to `received`.
fn nearest(codewords: &[u8; 16], received: u8) -> (u8, u32) {
  codewords
    .iter()
    .enumerate()
    .map(|(nibble, cw)| (nibble as u8, (cw ^ received).count_ones()))
    .min_by_key(|&(_, dist)| dist)
    .unwrap_or((0, u32::MAX))
}

fn nibbles(msg: &[u8]) -> impl Iterator<Item = u8> + '_ {
  msg.iter().flat_map(|b| [b >> 4, b & 0x0f])
}

fn join_nibbles(nibbles: &[u8]) -> Vec<u8> {
  nibbles.chunks_exact(2).map(|p| (p[0] << 4) | p[1]).collect()
}

/// Hamming(7,4): corrects one bit error per 7-bit codeword, codewords are packed back to back.
pub struct Hamming74;

impl Fec for Hamming74 {
  fn encoded_len(&self, msg_len: usize) -> usize {
    (msg_len * 14 + 7) / 8
  }

  fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(msg.len() * 14);
    for nibble in nibbles(msg) {
      let cw = [CODEWORDS_74[nibble as usize]];
      bits.extend_from_bitslice(&cw.view_bits::<Msb0>()[1..]);
    }
    // zero the padding of the last byte
    bits.set_uninitialized(false);
    Ok(bits.into_vec())
  }

  fn decode(&self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool) {
    let bits = &encoded.view_bits::<Msb0>()[..msg_len * 14];
    let decoded: Vec<u8> = bits
      .chunks_exact(7)
      .map(|cw| nearest(&CODEWORDS_74, cw.iter().fold(0, |acc, bit| (acc << 1) | *bit as u8)).0)
      .collect();
    (join_nibbles(&decoded), true)
  }
}

/// Extended Hamming(8,4): one codeword per byte,
/// corrects single bit errors and detects double bit errors.
pub struct Hamming84;

impl Fec for Hamming84 {
  fn encoded_len(&self, msg_len: usize) -> usize {
    msg_len * 2
  }

  fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
    Ok(nibbles(msg).map(|n| CODEWORDS_84[n as usize]).collect())
  }

  fn decode(&self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool) {
    let mut ok = true;
    let decoded: Vec<u8> = encoded[..msg_len * 2]
      .iter()
      .map(|&cw| {
        let (nibble, dist) = nearest(&CODEWORDS_84, cw);
        ok &= dist <= 1;
        nibble
      })
      .collect();
    (join_nibbles(&decoded), ok)
  }
}
