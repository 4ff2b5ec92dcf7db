pub mod command;
pub mod matcher;
pub mod monitor;
pub mod notified;
pub mod scheduler;

pub use command::CommandHandler;
pub use matcher::KeywordMatcher;
pub use monitor::{ChannelMonitor, CycleOutcome, CycleReport};
pub use notified::{NotifiedSet, NotifiedStore};
pub use scheduler::PollLoop;
