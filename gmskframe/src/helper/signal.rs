use num_complex::Complex32;
use std::f32::consts::{PI, TAU};

/// Correlate a window of samples against a reference: `sum(x[i] * conj(p[i]))`.  
/// Panic if the two given sequences have unequal lengths.
pub fn correlate<'a, 'b, Ia, Ib>(window: Ia, reference: Ib) -> Complex32
where
  Ia: ExactSizeIterator<Item = &'a Complex32>,
  Ib: ExactSizeIterator<Item = &'b Complex32>,
{
  assert_eq!(window.len(), reference.len());
  window
    .zip(reference)
    .fold(Complex32::new(0.0, 0.0), |sum, (x, p)| sum + x * p.conj())
}

/// Sum of squared magnitudes.
pub fn energy<'a, I>(seq: I) -> f32
where
  I: Iterator<Item = &'a Complex32>,
{
  seq.fold(0.0, |sum, x| sum + x.norm_sqr())
}

/// Map a phase onto [-pi, pi).
pub fn wrap_phase(phase: f32) -> f32 {
  (phase + PI).rem_euclid(TAU) - PI
}

/// Rotate `samples` by a carrier offset of `step` radians per sample.  
/// `phase` carries the rotation across consecutive blocks and stays wrapped.
pub fn mix(samples: &mut [Complex32], phase: &mut f32, step: f32) {
  for x in samples.iter_mut() {
    *x *= Complex32::from_polar(1.0, *phase);
    *phase = wrap_phase(*phase + step);
  }
}

/// Copy samples from `src` to fill `dest`.  
/// Return the number of copied samples.
pub fn copy<'a, T, D, S>(dest: D, src: S) -> usize
where
  T: 'a + Clone,
  D: Iterator<Item = &'a mut T>,
  S: Iterator<Item = T>,
{
  dest.zip(src).fold(0, |n, (x, y)| {
    *x = y;
    n + 1
  })
}
