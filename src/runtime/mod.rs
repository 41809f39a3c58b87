//! Drivers and request surface for presentation collaborators.

pub mod api;
pub mod scenarios;
pub mod spawn;
#[cfg(feature = "tokio-runtime")]
pub mod ticker;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use api::{shared, ConfigUpdate, SharedEngine, TransactionResponse};
pub use scenarios::Scenario;
pub use spawn::Spawn;
#[cfg(feature = "tokio-runtime")]
pub use ticker::SlotTicker;
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
