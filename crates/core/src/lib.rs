mod error;
mod observer;
mod stamp;
mod store;
mod sweeper;

pub use error::{StampError, SweepError};
pub use observer::{ErrorScope, NullObserver, RecordingObserver, SweepObserver};
pub use stamp::StampKeeper;
pub use store::{AttributeStore, MemoryStore, XattrStore};
pub use sweeper::{SweepOptions, Sweeper};
