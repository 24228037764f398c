// Application layer: session-level workflows built on the core algorithms.

pub mod browse;
pub mod draft;
pub mod session;

pub use browse::{browse, BrowseOutcome};
pub use draft::{ApplyReport, CompatibilityDraft};
pub use session::{CatalogSession, CatalogState};
