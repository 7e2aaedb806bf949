use bitvec::prelude::*;

/// bytes to NRZ symbols, most significant bit first: 1 -> +1.0, 0 -> -1.0
pub fn bytes_to_symbols(bytes: &[u8]) -> impl Iterator<Item = f32> + '_ {
  bytes
    .view_bits::<Msb0>()
    .iter()
    .map(|bit| if *bit { 1.0 } else { -1.0 })
}

/// the reverse process of [`bytes_to_symbols`] after slicing.
/// A trailing partial byte is zero padded.
pub fn bits_to_bytes(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
  let mut bytes = vec![0; (bits.len() + 7) / 8];
  bytes.view_bits_mut::<Msb0>()[..bits.len()].copy_from_bitslice(bits);
  bytes
}
