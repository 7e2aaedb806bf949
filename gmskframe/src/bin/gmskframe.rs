use clap::Parser;
use gmskframe::{helper::mix, Complex32, CrcScheme, FecScheme, FrameGen, FrameReport, FrameSync, GmskParams, Result};
use log::info;

/// Generate GMSK frames and decode them again with a frame synchronizer
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  #[arg(short, long, default_value_t = 2)]
  /// samples per symbol
  k: usize,

  #[arg(short, long, default_value_t = 3)]
  /// Gaussian filter semi-length, in symbols
  m: usize,

  #[arg(long, default_value_t = 0.5)]
  /// bandwidth-time product
  bt: f32,

  #[arg(short = 'n', long, default_value_t = 40)]
  /// payload length in bytes
  payload_len: usize,

  #[arg(short, long, default_value_t = 4)]
  /// number of frames
  frames: usize,

  #[arg(short, long, default_value_t = 53)]
  /// samples per block handed to the generator and the synchronizer
  block_len: usize,

  #[arg(long, default_value_t = CrcScheme::Crc32)]
  /// payload check: none, checksum, crc8, crc16, crc24, crc32
  crc: CrcScheme,

  #[arg(long, default_value_t = FecScheme::None)]
  /// inner code: none, rep3, rep5, h74, h84, rs8
  fec0: FecScheme,

  #[arg(long, default_value_t = FecScheme::None)]
  /// outer code, same choices as the inner one
  fec1: FecScheme,

  #[arg(long, default_value_t = 0.0)]
  /// carrier frequency offset applied to the samples, radians per sample
  cfo: f32,
}

fn print_report(report: &FrameReport<'_>) {
  println!(
    "header {:02x?} ({}), {} payload bytes ({})",
    report.header,
    if report.header_valid { "valid" } else { "INVALID" },
    report.payload.len(),
    if report.payload_valid { "valid" } else { "INVALID" },
  );
  println!("  {}", report.stats);
}

fn main() -> Result<()> {
  env_logger::init();
  let args = Args::parse();
  info!("{:?}", args);

  let params = GmskParams::new(args.k, args.m, args.bt)?;
  let mut gen = FrameGen::with_params(params);
  let mut sync = FrameSync::with_config(params, Default::default())?;
  let mut handler = print_report;

  let mut buf = vec![Complex32::new(0.0, 0.0); args.block_len.max(1)];
  let mut phase = 0.0f32;
  for frame in 0..args.frames {
    let header = (frame as u64).to_be_bytes();
    let payload: Vec<u8> = (0..args.payload_len).map(|i| (i + frame) as u8).collect();
    gen.assemble(&header, &payload, args.crc, args.fec0, args.fec1)?;
    info!("frame {}: {} samples", frame, gen.frame_len());

    let mut done = false;
    while !done {
      done = gen.write(&mut buf)?;
      mix(&mut buf, &mut phase, args.cfo);
      sync.execute_with(&buf, &mut handler);
    }
  }

  println!("{}", sync.framedatastats());
  Ok(())
}
