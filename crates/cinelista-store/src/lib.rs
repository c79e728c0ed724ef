pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use error::{StorageError, StoreError};
pub use store::{AddOutcome, Clock, Collection, Membership, RemoveOutcome, SavedContentStore, SystemClock};
