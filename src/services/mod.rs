// Service exports
pub mod enrichment;
pub mod provider;
pub mod store;

pub use enrichment::{EnrichmentError, NarrativeEnricher, SummaryEnricher};
pub use provider::{DatasetProvider, InMemoryProvider, JsonDirectoryProvider, ProviderError};
pub use store::{Catalogued, DataStore, Snapshot, StoreCounts};
