pub mod catalog;

pub use catalog::{AnimationCatalog, AnimationCategory, IDLE};
