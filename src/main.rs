//! tablegrid desktop host
//!
//! Opens a window, binds the sample (or a blank) table and executes the
//! grid's draw ops on a softbuffer surface.

mod runtime;
mod view;

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use tablegrid::cli::CliArgs;
use tablegrid::theme::load_theme_or_default;
use tablegrid::{DataGrid, GridStyle};

use runtime::App;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    tablegrid::tracing::init();

    let startup = args.into_startup().map_err(anyhow::Error::msg)?;
    let config = startup.load_config();
    let theme = load_theme_or_default(&config.theme);
    let style = GridStyle::from_config(&config, theme);
    let grid = DataGrid::with_table(style, startup.build_table());

    let event_loop = EventLoop::new()?;
    let mut app = App::new(grid, config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
