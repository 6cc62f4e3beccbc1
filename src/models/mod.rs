pub mod sequence;

pub use sequence::{ControlMode, SequenceRequest, SequenceResult};
