//! Filename transformation: change records, stages and the per-file pipeline.

mod change;
mod pipeline;
mod stages;

pub use change::FilenameChange;
pub use pipeline::{FileTrace, FileTransformPipeline};
pub use stages::{
    append_category, category_of, clean_name, relocate, stem_of, strip_id, TransformError,
    CATEGORY_SEPARATOR, ID_SEPARATOR,
};
