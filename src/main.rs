use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod actions;
mod config;
mod ui;

use actions::ActionError;
use config::Config;

#[derive(Parser)]
#[command(name = "buttonkit", about = "Render and exercise custom-drawn buttons")]
struct Cli {
    /// Scene file describing the buttons
    #[arg(short, long, default_value = "buttons.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every button in every interaction state to PNG files
    Render {
        /// Output directory
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
        /// Display scale factor, overrides the scene file
        #[arg(short, long)]
        scale: Option<f32>,
    },
    /// Feed each button's input script through it and print the outcome
    Replay,
    /// Print the built-in style and type presets
    Styles,
}

fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ActionError> {
    match cli.command {
        Commands::Render { out, scale } => {
            let mut config = Config::load(&cli.config)?;
            if let Some(scale) = scale {
                config.render.scale = scale;
            }
            let written = actions::cmd_render(&config, &out)?;
            println!("Wrote {} image(s) to {}", written.len(), out.display());
        }
        Commands::Replay => {
            let config = Config::load(&cli.config)?;
            for line in actions::cmd_replay(&config)? {
                println!("{}", line);
            }
        }
        Commands::Styles => print!("{}", actions::cmd_styles()?),
    }
    Ok(())
}
