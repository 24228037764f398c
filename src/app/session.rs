use crate::core::catalog::CompatibilityCatalog;
use crate::domain::ports::CatalogProvider;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The outcome of the one catalog fetch a session performs.
#[derive(Debug, Clone)]
pub enum CatalogState {
    Loaded {
        catalog: Arc<CompatibilityCatalog>,
        loaded_at: DateTime<Utc>,
    },
    Unavailable {
        reason: String,
    },
}

impl CatalogState {
    pub fn is_available(&self) -> bool {
        matches!(self, CatalogState::Loaded { .. })
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match self {
            CatalogState::Loaded { loaded_at, .. } => Some(*loaded_at),
            CatalogState::Unavailable { .. } => None,
        }
    }
}

/// Holds the catalog for an editing or browsing session. A failed fetch leaves the
/// session usable with an empty catalog.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    state: CatalogState,
    empty: Arc<CompatibilityCatalog>,
}

impl CatalogSession {
    pub async fn load<P: CatalogProvider + ?Sized>(provider: &P) -> Self {
        let source = provider.describe();
        tracing::info!("Loading vehicle catalog from {}", source);

        let state = match provider.fetch_catalog().await {
            Ok(raw) => {
                let catalog = CompatibilityCatalog::from_raw(&raw);
                tracing::info!(
                    "Catalog loaded: {} makes, {} models",
                    catalog.make_count(),
                    catalog.model_count()
                );
                CatalogState::Loaded {
                    catalog: Arc::new(catalog),
                    loaded_at: Utc::now(),
                }
            }
            Err(e) => {
                tracing::warn!("Catalog unavailable from {}: {}", source, e);
                tracing::warn!("{}", e.recovery_suggestion());
                CatalogState::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        Self::from_state(state)
    }

    pub fn from_catalog(catalog: CompatibilityCatalog) -> Self {
        Self::from_state(CatalogState::Loaded {
            catalog: Arc::new(catalog),
            loaded_at: Utc::now(),
        })
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::from_state(CatalogState::Unavailable {
            reason: reason.into(),
        })
    }

    fn from_state(state: CatalogState) -> Self {
        Self {
            state,
            empty: Arc::new(CompatibilityCatalog::empty()),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// The loaded catalog, or an empty one when the fetch failed.
    pub fn catalog(&self) -> &CompatibilityCatalog {
        match &self.state {
            CatalogState::Loaded { catalog, .. } => catalog.as_ref(),
            CatalogState::Unavailable { .. } => self.empty.as_ref(),
        }
    }

    pub fn shared_catalog(&self) -> Arc<CompatibilityCatalog> {
        match &self.state {
            CatalogState::Loaded { catalog, .. } => Arc::clone(catalog),
            CatalogState::Unavailable { .. } => Arc::clone(&self.empty),
        }
    }
}
