use clap::Parser;
use dials::config;
use dials::gui::app::AppModel;
use dials::gui::canvas;
use dials::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dials", version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the user config (or the bundled demo)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the initial state as PNG and exit instead of opening a window
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let widget = config::load(args.config.as_deref())?.build()?;

    if let Some(path) = &args.snapshot {
        return canvas::write_png(&widget, path);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config::watched_path(args.config.as_deref()));

    // clap already consumed the command line
    let app = RelmApp::new("org.dials.dials").with_args(Vec::new());

    app.run::<AppModel>((widget, args.config, rx));
    Ok(())
}
