mod detection;
mod import;
mod storage;
mod track;

pub use detection::{ClassifyRequest, DetectionResult};
pub use import::{ImportFile, ImportOutcome};
pub use storage::{ImportDraft, ImportableItem, ParsedName, StorageFile};
pub use track::Track;
