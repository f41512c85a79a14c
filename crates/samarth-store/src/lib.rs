//! Data access for the catalog: the canonical defaults, the persisted
//! working list, and the key/value backends it is stored in.

pub mod defaults;
pub mod error;
pub mod storage;
pub mod store;

pub use defaults::DefaultsFetcher;
pub use error::StoreError;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::ProductStore;
