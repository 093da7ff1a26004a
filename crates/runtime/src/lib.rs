pub mod event_bus;
pub mod frame;
pub mod metrics;
pub mod scheduler;

pub use event_bus::*;
pub use frame::*;
pub use metrics::*;
pub use scheduler::*;
