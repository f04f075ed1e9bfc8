pub(super) mod logs;
pub(super) mod machines;
pub(super) mod queue;

pub(in crate::tui_shell) use logs::LogsView;
pub(in crate::tui_shell) use machines::MachinesView;
pub(in crate::tui_shell) use queue::QueueView;
