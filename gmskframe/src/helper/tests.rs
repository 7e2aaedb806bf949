use bitvec::prelude::*;
use num_complex::Complex32;
use rand::{distributions::Standard, Rng};

use super::{bits_to_bytes, bytes_to_symbols, correlate, energy, mix, msequence, wrap_phase};

const TESTS: usize = 100;

#[test]
fn symbols_bytes() {
  for _ in 0..TESTS {
    let len = rand::thread_rng().gen_range(1..64);
    let bytes: Vec<u8> = rand::thread_rng().sample_iter(Standard).take(len).collect();
    let bits: BitVec<u8, Msb0> = bytes_to_symbols(&bytes).map(|x| x > 0.0).collect();
    assert_eq!(bits.len(), len * 8);
    assert_eq!(bits_to_bytes(&bits), bytes);
  }
}

#[test]
fn msb_first() {
  let symbols: Vec<f32> = bytes_to_symbols(&[0b1000_0001]).collect();
  assert_eq!(symbols, vec![1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0]);
}

#[test]
fn partial_byte_padding() {
  let bits = bits![u8, Msb0; 1, 0, 1];
  assert_eq!(bits_to_bytes(bits), vec![0b1010_0000]);
}

#[test]
fn msequence_balance_and_period() {
  let seq = msequence(126);
  let ones = seq[..63].iter().filter(|&&b| b).count();
  assert_eq!(ones, 32);
  assert_eq!(&seq[..63], &seq[63..]);
  // every cyclic shift differs from the sequence itself
  for p in 1..63 {
    assert!((0..63).any(|i| seq[i] != seq[(i + p) % 63]), "period {}", p);
  }
}

#[test]
fn correlation_and_energy() {
  let x: Vec<Complex32> = (0..16).map(|i| Complex32::from_polar(1.0, 0.3 * i as f32)).collect();
  let c = correlate(x.iter(), x.iter());
  assert!((c.re - 16.0).abs() < 1e-4);
  assert!(c.im.abs() < 1e-4);
  assert!((energy(x.iter()) - 16.0).abs() < 1e-4);

  let rotated: Vec<Complex32> = x.iter().map(|s| s * Complex32::from_polar(1.0, 1.0)).collect();
  let c = correlate(rotated.iter(), x.iter());
  assert!((c.arg() - 1.0).abs() < 1e-4);
}

#[test]
fn phase_wrapping() {
  use std::f32::consts::PI;
  assert!((wrap_phase(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
  assert!((wrap_phase(0.5) - 0.5).abs() < 1e-6);
  assert!((wrap_phase(-0.5 - 2.0 * PI) + 0.5).abs() < 1e-5);
}

#[test]
fn carrier_mixing() {
  let step = 0.3f32;
  let mut phase = 0.0;
  let mut samples = vec![Complex32::new(1.0, 0.0); 1_000_000];
  for block in samples.chunks_mut(777) {
    mix(block, &mut phase, step);
  }
  assert!((-std::f32::consts::PI..=std::f32::consts::PI).contains(&phase));
  assert!(samples.iter().all(|x| (x.norm() - 1.0).abs() < 1e-4));
  // every step advances by the same angle, also at the end of a long run
  for pair in samples.windows(2).skip(samples.len() - 1000) {
    let advance = (pair[1] * pair[0].conj()).arg();
    assert!((advance - step).abs() < 1e-4, "advance {}", advance);
  }
}
