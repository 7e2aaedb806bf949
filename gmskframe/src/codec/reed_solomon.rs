use reed_solomon_erasure::{galois_8::Field, ReedSolomon};

use super::{crc::shard_tag, Fec};
use crate::{
  error::{Error, Result},
  helper::copy,
};

/// smallest number of data bytes in a shard
const MIN_SHARD_SIZE: usize = 16;
/// keeps data + parity shards within the 256 symbols of GF(2^8)
const MAX_DATA_SHARDS: usize = 192;

/// shard geometry derived from the message length alone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
  data_shards: usize,
  parity_shards: usize,
  shard_size: usize,
}

impl Layout {
  fn new(msg_len: usize) -> Self {
    let shard_size = MIN_SHARD_SIZE.max((msg_len + MAX_DATA_SHARDS - 1) / MAX_DATA_SHARDS);
    let data_shards = ((msg_len + shard_size - 1) / shard_size).max(1);
    let parity_shards = (data_shards * 5 / 16).max(1);
    Self {
      data_shards,
      parity_shards,
      shard_size,
    }
  }

  fn total_shards(&self) -> usize {
    self.data_shards + self.parity_shards
  }

  /// shard bytes plus the CRC-8 tag
  fn tagged_size(&self) -> usize {
    self.shard_size + 1
  }

  fn codec(&self) -> Result<ReedSolomon<Field>> {
    ReedSolomon::new(self.data_shards, self.parity_shards).map_err(|e| Error::Codec(format!("{e:?}")))
  }
}

/// Reed-Solomon erasure code over CRC-8 tagged shards.
///
/// The message is split into equal shards and parity shards are appended.
/// Every shard carries a CRC-8 tag, shards whose tag fails are treated as
/// erasures and rebuilt from the remaining ones.
pub struct ReedSolomonFec;

impl Fec for ReedSolomonFec {
  fn encoded_len(&self, msg_len: usize) -> usize {
    let layout = Layout::new(msg_len);
    layout.total_shards() * layout.tagged_size()
  }

  fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
    let layout = Layout::new(msg.len());
    let rs = layout.codec()?;

    let mut shards = vec![vec![0; layout.shard_size]; layout.total_shards()];
    msg.chunks(layout.shard_size).zip(shards.iter_mut()).for_each(|(x, y)| {
      copy(y.iter_mut(), x.iter().cloned());
    });
    rs.encode(&mut shards).map_err(|e| Error::Codec(format!("{e:?}")))?;

    let mut encoded = Vec::with_capacity(self.encoded_len(msg.len()));
    for shard in shards {
      let tag = shard_tag(&shard);
      encoded.extend(shard);
      encoded.push(tag);
    }
    Ok(encoded)
  }

  fn decode(&self, encoded: &[u8], msg_len: usize) -> (Vec<u8>, bool) {
    let layout = Layout::new(msg_len);
    let mut shards: Vec<Option<Vec<u8>>> = encoded
      .chunks_exact(layout.tagged_size())
      .map(|tagged| {
        let (shard, tag) = tagged.split_at(layout.shard_size);
        (shard_tag(shard) == tag[0]).then(|| shard.to_vec())
      })
      .collect();

    let ok = match layout.codec() {
      Ok(rs) => rs.reconstruct_data(&mut shards).is_ok(),
      Err(_) => false,
    };

    let mut msg = vec![0; msg_len];
    let data = shards
      .into_iter()
      .take(layout.data_shards)
      .flat_map(|shard| shard.unwrap_or_else(|| vec![0; layout.shard_size]));
    copy(msg.iter_mut(), data);
    (msg, ok)
  }
}
