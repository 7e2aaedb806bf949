/// types that can generate a preamble symbol sequence
pub trait PreambleGen {
  /// number of symbols in the preamble sequence
  const PREAMBLE_LEN: usize;

  /// generate the NRZ preamble symbols, should contain exactly [`Self::PREAMBLE_LEN`] symbols.
  fn generate() -> Vec<f32>;
}
