//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod dispatcher;
pub mod motion;
pub mod scan;

pub use dispatcher::dispatcher_task;
pub use motion::motion_task;
pub use scan::scan_task;
