use gmskframe::{Complex32, CrcScheme, FecScheme, FrameDataStats, FrameGen, FrameReport, FrameSync, SyncState};
use rand::{distributions::Standard, Rng};

/// everything a handler sees, owned
#[derive(Clone, Debug, PartialEq)]
struct Received {
  header: [u8; 8],
  header_valid: bool,
  payload: Vec<u8>,
  payload_valid: bool,
}

impl From<&FrameReport<'_>> for Received {
  fn from(report: &FrameReport<'_>) -> Self {
    Self {
      header: *report.header,
      header_valid: report.header_valid,
      payload: report.payload.to_vec(),
      payload_valid: report.payload_valid,
    }
  }
}

fn zero() -> Complex32 {
  Complex32::new(0.0, 0.0)
}

/// push `samples` through `sync` in blocks of the given lengths, cycling through them
fn run(sync: &mut FrameSync, samples: &[Complex32], block_lens: &[usize]) -> Vec<Received> {
  let mut received = Vec::new();
  let mut handler = |report: &FrameReport<'_>| received.push(Received::from(report));
  let mut offset = 0;
  for &len in block_lens.iter().cycle() {
    if offset >= samples.len() {
      break;
    }
    let end = (offset + len).min(samples.len());
    sync.execute_with(&samples[offset..end], &mut handler);
    offset = end;
  }
  received
}

#[test]
fn single_frame() {
  let (k, m, bt) = (2, 12, 0.3);
  let mut gen = FrameGen::new(k, m, bt).unwrap();
  let mut sync = FrameSync::new(k, m, bt).unwrap();

  let header: [u8; 8] = std::array::from_fn(|i| i as u8);
  let payload: Vec<u8> = (0..40).collect();
  gen
    .assemble(&header, &payload, CrcScheme::Crc32, FecScheme::None, FecScheme::None)
    .unwrap();

  let mut received = Vec::new();
  let mut buf = [zero(); 53];
  let mut done = false;
  while !done {
    done = gen.write(&mut buf).unwrap();
    sync.execute_with(&buf, &mut |report: &FrameReport<'_>| received.push(Received::from(report)));
  }

  assert_eq!(
    received,
    vec![Received {
      header,
      header_valid: true,
      payload,
      payload_valid: true,
    }]
  );
  let stats = sync.framedatastats();
  assert_eq!(
    stats,
    FrameDataStats {
      num_frames_detected: 1,
      num_headers_valid: 1,
      num_payloads_valid: 1,
      num_bytes_received: 40,
    }
  );
}

#[test]
fn many_frames() {
  const FRAMES: usize = 80;
  const PAYLOAD_LEN: usize = 200;
  let mut gen = FrameGen::default();
  let mut sync = FrameSync::default();

  let mut received = Vec::new();
  for _ in 0..FRAMES {
    gen.assemble_default(PAYLOAD_LEN).unwrap();
    for block in gen.blocks(200) {
      sync.execute_with(&block, &mut |report: &FrameReport<'_>| received.push(Received::from(report)));
    }
  }

  assert_eq!(received.len(), FRAMES);
  for frame in received.iter() {
    assert!(frame.header_valid && frame.payload_valid);
    assert!(frame.header.iter().enumerate().all(|(i, &x)| x == i as u8));
    assert!(frame.payload.iter().enumerate().all(|(i, &x)| x == (i & 0xff) as u8));
  }
  let stats = sync.framedatastats();
  assert_eq!(stats.num_frames_detected, FRAMES);
  assert_eq!(stats.num_headers_valid, FRAMES);
  assert_eq!(stats.num_payloads_valid, FRAMES);
  assert_eq!(stats.num_bytes_received, FRAMES * PAYLOAD_LEN);
}

#[test]
fn block_size_independent() {
  let mut gen = FrameGen::default();
  let mut rng = rand::thread_rng();
  let mut stream = vec![zero(); 100];
  for len in [0, 17, 64, 300] {
    let payload: Vec<u8> = (&mut rng).sample_iter(Standard).take(len).collect();
    let header: [u8; 8] = rng.gen();
    gen
      .assemble(&header, &payload, CrcScheme::Crc16, FecScheme::Hamming74, FecScheme::None)
      .unwrap();
    let start = stream.len();
    stream.resize(start + gen.frame_len() + 37, zero());
    gen.write(&mut stream[start..]).unwrap();
  }

  let random_lens: Vec<usize> = (0..64).map(|_| rng.gen_range(1..500)).collect();
  let mut results = Vec::new();
  for block_lens in [vec![53], vec![200], vec![1], vec![stream.len()], random_lens] {
    let mut sync = FrameSync::default();
    let received = run(&mut sync, &stream, &block_lens);
    results.push((received, sync.framedatastats()));
  }

  assert_eq!(results[0].0.len(), 4);
  assert!(results[0].0.iter().all(|r| r.header_valid && r.payload_valid));
  assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn reset_mid_frame() {
  let mut gen = FrameGen::default();
  let mut sync = FrameSync::default();
  gen.assemble_default(64).unwrap();
  let mut frame = vec![zero(); gen.frame_len()];
  gen.write(&mut frame).unwrap();

  // a complete frame, then half a frame
  sync.execute(&frame);
  sync.execute(&frame[..frame.len() / 2]);
  assert_ne!(sync.state(), SyncState::Detect);
  sync.reset();
  assert_eq!(sync.state(), SyncState::Detect);
  sync.reset();

  let received = run(&mut sync, &frame, &[97]);
  assert_eq!(received.len(), 1);
  assert!(received[0].payload_valid);
  let stats = sync.framedatastats();
  assert_eq!(stats.num_frames_detected, 3);
  assert_eq!(stats.num_payloads_valid, 2);
}

#[test]
fn generator_completion() {
  let mut gen = FrameGen::default();
  gen.assemble_default(10).unwrap();
  let frame_len = gen.frame_len();

  let mut buf = vec![zero(); frame_len - 1];
  assert!(!gen.write(&mut buf).unwrap());
  assert!(gen.is_assembled());
  let mut last = [zero(); 4];
  assert!(gen.write(&mut last).unwrap());
  assert!(!gen.is_assembled());
  assert!(last[1..].iter().all(|x| *x == zero()));
  assert!(gen.write(&mut last).is_err());

  // exactly one frame worth of samples
  gen.assemble_default(10).unwrap();
  let mut buf = vec![zero(); frame_len];
  assert!(gen.write(&mut buf).unwrap());
  assert!(!gen.is_assembled());
}

#[test]
fn parameter_sets() {
  for (k, m, bt) in [(2, 1, 1.0), (2, 3, 0.25), (3, 2, 0.5), (4, 4, 0.3), (8, 3, 0.5)] {
    let mut gen = FrameGen::new(k, m, bt).unwrap();
    let mut sync = FrameSync::new(k, m, bt).unwrap();
    let mut received = Vec::new();
    for len in [5, 50] {
      gen.assemble_default(len).unwrap();
      for block in gen.blocks(128) {
        sync.execute_with(&block, &mut |report: &FrameReport<'_>| received.push(Received::from(report)));
      }
    }
    assert_eq!(received.len(), 2, "k {} m {} bt {}", k, m, bt);
    assert!(received.iter().all(|r| r.header_valid && r.payload_valid), "k {} m {} bt {}", k, m, bt);
  }
}

#[test]
fn every_codec_over_the_air() {
  let mut gen = FrameGen::default();
  let mut sync = FrameSync::default();
  let mut rng = rand::thread_rng();
  let header = [0x5a; 8];
  let fecs = [FecScheme::None, FecScheme::Repeat3, FecScheme::Hamming84, FecScheme::ReedSolomon];

  let mut sent = Vec::new();
  let mut received = Vec::new();
  for crc in CrcScheme::ALL {
    for fec_inner in fecs {
      for fec_outer in fecs {
        let payload: Vec<u8> = (&mut rng).sample_iter(Standard).take(24).collect();
        gen.assemble(&header, &payload, crc, fec_inner, fec_outer).unwrap();
        for block in gen.blocks(512) {
          sync.execute_with(&block, &mut |report: &FrameReport<'_>| received.push(Received::from(report)));
        }
        sent.push(payload);
      }
    }
  }

  assert_eq!(received.len(), sent.len());
  for (frame, payload) in received.iter().zip(sent.iter()) {
    assert!(frame.header_valid);
    assert!(frame.payload_valid);
    assert_eq!(&frame.payload, payload);
  }
}

#[test]
fn largest_payload() {
  let mut gen = FrameGen::default();
  let mut sync = FrameSync::default();
  let payload: Vec<u8> = rand::thread_rng()
    .sample_iter(Standard)
    .take(gmskframe::MAX_PAYLOAD_LEN)
    .collect();
  gen
    .assemble(&[0; 8], &payload, CrcScheme::Crc32, FecScheme::None, FecScheme::None)
    .unwrap();

  let mut received = Vec::new();
  for block in gen.blocks(4096) {
    sync.execute_with(&block, &mut |report: &FrameReport<'_>| received.push(Received::from(report)));
  }
  assert_eq!(received.len(), 1);
  assert!(received[0].payload_valid);
  assert_eq!(received[0].payload, payload);
}
