// src/presentation/mod.rs
pub mod registry;
pub mod scene;
pub mod sync;

pub use registry::{Placed, Registry};
pub use scene::{Layout, LedgerScene, Placement, TileTable, WorldPosition};
pub use sync::{SyncProgress, SyncState, SyncStats, Synchronizer};
