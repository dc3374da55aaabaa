//! Remote sync: orchestration, scheduling and status.

mod scheduler;
mod service;
mod status;

pub use scheduler::*;
pub use service::*;
pub use status::*;
