pub mod config;
pub mod forms;
pub mod log;
pub mod project;
pub mod task;

pub use config::*;
pub use forms::*;
pub use log::*;
pub use project::*;
pub use task::*;
