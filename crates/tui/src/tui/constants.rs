use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);

pub(crate) const STATUS_ENTER_ADD: &str = "Enter a task description (Esc to close)";
pub(crate) const STATUS_EMPTY_DRAFT: &str = "Task cannot be empty!";
pub(crate) const STATUS_REFRESHING: &str = "Reloading from the task service…";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion — arrows choose, Enter confirms, Esc cancels";
