mod record;
mod storage;
mod store;


/// XDG prefix shared by storage and log file placement.
pub const APP_NAME: &str = "cringe";

pub use crate::record::{DATE_FORMAT, Record};
pub use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use crate::store::{RECORDS_KEY, RecordStore};
