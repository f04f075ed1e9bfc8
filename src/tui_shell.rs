use anyhow::Result;

mod app;
mod input;
mod modal;
mod view;
mod views;

use app::App;
use view::{View, render_view_chrome};

pub(crate) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
