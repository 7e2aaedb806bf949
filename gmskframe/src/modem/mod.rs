/// Gaussian pulse design, the streaming modulator and the frequency discriminator.
mod gmsk;
pub use gmsk::{discriminate, gaussian_pulse, symbol_scale, GmskModulator};
