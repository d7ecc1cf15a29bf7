pub mod manifest_loader;
pub mod scheme_loader;

pub use manifest_loader::{load_batch_manifest, BatchManifest, ManifestEntry};
pub use scheme_loader::load_marking_scheme;
