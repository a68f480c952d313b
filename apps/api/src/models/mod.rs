pub mod analysis;

pub use analysis::{AnalysisMode, AnalysisSession};
