// crates/mht-core/src/lib.rs
pub mod guideline;
pub mod decision;
pub mod catalog;
pub mod library;
pub mod display;

pub use guideline::*;
pub use decision::*;
pub use catalog::*;
pub use library::*;

#[derive(Debug, thiserror::Error)]
pub enum MhtError {
    #[error("Invalid guideline dataset: {0}")]
    InvalidDataset(#[from] serde_json::Error),

    #[error("Duplicate guideline id: {0}")]
    DuplicateGuideline(String),

    #[error("Duplicate decision node '{node}' in tree '{tree}'")]
    DuplicateNode { tree: String, node: String },

    #[error("Guideline '{guideline}' points at missing tree entry {tree}/{root}")]
    MissingTreeEntry {
        guideline: String,
        tree: String,
        root: String,
    },
}

pub type Result<T> = std::result::Result<T, MhtError>;
