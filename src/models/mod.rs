pub mod candidate;
pub mod cell;
pub mod loaders;
pub mod result_view;
pub mod scheme;
pub mod tally;

pub use candidate::{CandidateInfo, CandidateRecord};
pub use cell::CellValue;
pub use loaders::{load_batch_manifest, load_marking_scheme, BatchManifest, ManifestEntry};
pub use result_view::{OverallSummary, ResultView, StatValue, SubjectView, MISSING_MARKER};
pub use scheme::MarkingScheme;
pub use tally::{ScoreSheet, SectionScore, SectionStats, SectionTally};
