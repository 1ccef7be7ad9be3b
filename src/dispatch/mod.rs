pub mod capability;
pub mod dispatcher;
pub mod outcome;

pub use capability::{CapabilityError, ClearCapability, RemovalOptions};
pub use dispatcher::{DispatchError, DispatchState, Dispatcher, NoProgress, Progress, ProgressSink};
pub use outcome::{Outcome, ResultsSummary};
