mod handler;
mod preamble;
pub use handler::FrameHandler;
pub use preamble::PreambleGen;
