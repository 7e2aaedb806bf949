mod bytes_bits;
pub use bytes_bits::{bits_to_bytes, bytes_to_symbols};

mod signal;
pub use signal::{copy, correlate, energy, mix, wrap_phase};

mod msequence;
pub use msequence::msequence;

#[cfg(test)]
mod tests;
