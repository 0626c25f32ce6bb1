use clap::{Parser, Subcommand};
use mandelserve::render::{Frame, render_png};
use mandelserve::{config, serve};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mandelserve")]
#[command(about = "Serve Mandelbrot set renders as PNG over HTTP")]
#[command(long_about = "\
Serve Mandelbrot set renders as PNG over HTTP

The server renders one fixed 800x800 frame of the set, freshly computed
for every request. Any path serves the image; the exact path
/interactive serves a viewer page whose pan/zoom controls are tracked
but not yet applied to the render.

Run 'mandelserve gen-config' to generate a documented mandelserve.toml.")]
#[command(version)]
struct Cli {
    /// Path to the service config file
    #[arg(long, default_value = "mandelserve.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Listen address, overriding the configured one
        #[arg(long)]
        bind: Option<String>,
    },
    /// Render the fixed frame once and write the PNG to a file
    Render {
        /// Output path for the encoded image
        #[arg(long, default_value = "mandelbrot.png")]
        output: PathBuf,
    },
    /// Print a stock mandelserve.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let bind = bind.unwrap_or(config.server.bind);
            serve::serve(&bind, config.server.request_threads)?;
        }
        Command::Render { output } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let frame = Frame::default();
            let png = render_png(&frame)?;
            std::fs::write(&output, &png)?;
            println!(
                "Rendered {}x{} frame to {}",
                frame.width,
                frame.height,
                output.display()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain the
/// pool down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
