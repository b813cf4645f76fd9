use clap::{Parser, Subcommand};
use dialkit::config::{self, WidgetConfig};
use dialkit::geometry::Point;
use dialkit::render::RenderAdapter;
use dialkit::svg::SvgRenderer;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dialkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the user config (or the bundled demo)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the dials in their initial state as SVG
    Render {
        /// Write the SVG here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Replay a press, optional drags and a release, printing every legend update
    Simulate {
        /// Pointer-down position as `x,y` in drawing-surface coordinates
        #[arg(long, allow_hyphen_values = true)]
        press: Point,

        /// Pointer-move positions, in order
        #[arg(long, allow_hyphen_values = true)]
        drag: Vec<Point>,

        /// Write the final SVG here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Write the default config file if none exists and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { output } => {
            let config = load(cli.config.as_deref())?;
            render(&config, output.as_deref())
        }
        Commands::Simulate {
            press,
            drag,
            output,
        } => {
            let config = load(cli.config.as_deref())?;
            simulate(&config, press, &drag, output.as_deref())
        }
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load(path: Option<&Path>) -> anyhow::Result<WidgetConfig> {
    match path {
        Some(path) => Ok(config::load_config_from(path)?),
        None => Ok(config::load_or_default()),
    }
}

fn render(config: &WidgetConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let widget = config.build()?;
    let mut renderer = SvgRenderer::new();
    renderer.build(&widget.scene())?;

    for line in renderer.legend_lines()? {
        eprintln!("{}", line);
    }
    write_svg(&renderer, output)
}

fn simulate(
    config: &WidgetConfig,
    press: Point,
    drag: &[Point],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut widget = config.build()?;
    let mut renderer = SvgRenderer::new();
    renderer.build(&widget.scene())?;

    let updates = std::iter::once(widget.pointer_down(press))
        .chain(drag.iter().map(|&p| widget.pointer_move(p)))
        .collect::<Vec<_>>();
    widget.pointer_up();

    if updates.iter().all(Option::is_none) {
        anyhow::bail!("No dials configured, nothing to drag.");
    }

    for update in updates.into_iter().flatten() {
        renderer.apply(&update)?;
        if let Some(dial) = widget.registry().get(update.dial) {
            eprintln!("{}: {}", dial.display_name, update.legend_text);
        }
    }
    write_svg(&renderer, output)
}

fn write_svg(renderer: &SvgRenderer, output: Option<&Path>) -> anyhow::Result<()> {
    let svg = renderer.to_svg()?;
    match output {
        Some(path) => fs_err::write(path, svg)?,
        None => print!("{}", svg),
    }
    Ok(())
}
