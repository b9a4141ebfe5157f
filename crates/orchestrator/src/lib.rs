pub mod pipeline;

pub use pipeline::{run_once, run_pipeline, run_pipeline_at, RunReport, Stage, CONTENT_FALLBACK};
