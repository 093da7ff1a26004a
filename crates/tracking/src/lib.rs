//! Synthetic tracking-event feed: generation, a bounded newest-first feed,
//! single selection shared across views, status filtering and summary
//! statistics, driven by periodic ticks from a [`runtime::Scheduler`].

pub mod catalog;
pub mod error;
pub mod event;
pub mod feed;
pub mod filter;
pub mod generator;
pub mod selection;
pub mod simulation;
pub mod statistics;

pub use catalog::*;
pub use error::*;
pub use event::*;
pub use feed::*;
pub use filter::*;
pub use generator::*;
pub use selection::*;
pub use simulation::*;
pub use statistics::*;
