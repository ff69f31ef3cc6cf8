pub mod clock;
pub mod event_bus;
pub mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event_bus::{EventBus, ListenerId};
pub use timers::{poll_timeout, Timers};
