pub mod copy_engine;

pub use copy_engine::{CopyEngine, CopyOutcome, EngineStats};
