// Service exports
pub mod loader;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod weights;

pub use loader::{load_properties_from_file, open_store};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{PropertyStore, StoreError};
pub use weights::{load_weights_from_file, load_weights_or_default, WeightsError};
