mod error;
mod llm;
pub mod parser;
mod processor;
pub mod server;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::Error;
pub use llm::gemini;
pub use llm::{
    generator::SummaryGenerator,
    summarizer::{SummaryResult, Summarizer},
};
pub use parser::VideoId;
pub use processor::{builder::SummaryPipelineBuilder, SummaryPipeline};
