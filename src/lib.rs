pub mod config;
pub mod dialogs;
pub mod error;
pub mod events;
pub mod item_filter;
pub mod list_manager;
pub mod storage;
pub mod ui;
pub mod utils;
pub mod view_model;

pub use dialogs::{Dialogs, ScriptedDialogs};
pub use error::{ListError, StorageError};
pub use events::UiEvent;
pub use list_manager::ListManager;
pub use view_model::{ItemRow, ListModel, SubmitMode};
