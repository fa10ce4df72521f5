pub mod controller;
pub mod dialog;
pub mod error;
pub mod visual_index;

pub use controller::{
    DeleteAction, DetailTab, LogDetailMode, LogFocus, SessionController, SessionOptions, Signal,
    TaskDetailMode, ViewState,
};
pub use dialog::{ConfirmDialog, DialogChoice, DialogKey, DialogKind, DialogOutcome};
pub use error::{ErrorKind, SessionError};
pub use visual_index::VisualTasks;
