/// Maximal-length binary sequence of period 63,
/// generated by the recurrence `s[n] = s[n-1] ^ s[n-6]` (polynomial x^6 + x^5 + 1).
/// The sequence repeats when `len` exceeds the period.
pub fn msequence(len: usize) -> Vec<bool> {
  let mut seq = vec![true, false, false, false, false, false];
  while seq.len() < len {
    let n = seq.len();
    seq.push(seq[n - 1] ^ seq[n - 6]);
  }
  seq.truncate(len);
  seq
}
