pub mod dispatcher;
pub mod events;

pub use dispatcher::{DispatcherState, WatchDispatcher, WatchError};
pub use events::FileEvent;
