pub mod prompts;
pub mod sequence;

pub use sequence::{SequenceGenerator, SequenceOutcome};
