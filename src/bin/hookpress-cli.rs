use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hookpress::config::loader::load_or_default;
use hookpress::markdown;
use hookpress::theme::{ThemeCatalog, ThemeMetadataCache};

#[derive(Parser)]
#[command(name = "hookpress-cli")]
#[command(about = "Inspect themes and render Markdown offline", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, default_value = "hookpress.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file to HTML on stdout
    Render { file: PathBuf },
    /// List available themes with their name and version
    Themes,
    /// Look up a theme metadata value
    Meta {
        key: String,
        /// Theme to read; defaults to the configured theme
        #[arg(short, long)]
        theme: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { file } => {
            let text = fs::read_to_string(&file)?;
            print!("{}", markdown::render(&text));
        }
        Commands::Themes => {
            let config = load_or_default(&cli.config)?;
            let catalog = ThemeCatalog::new(&config.paths.themes_dir);
            let mut cache = ThemeMetadataCache::new();

            for theme in catalog.available_themes() {
                let name = cache.lookup(&catalog, &theme, "name");
                let version = cache.lookup(&catalog, &theme, "version");
                let marker = if theme == config.site.theme { "*" } else { " " };
                println!("{marker} {theme:<20} {name:<30} {version}");
            }
        }
        Commands::Meta { key, theme } => {
            let config = load_or_default(&cli.config)?;
            let catalog = ThemeCatalog::new(&config.paths.themes_dir);
            let theme = theme.unwrap_or_else(|| config.site.theme.clone());

            let value = ThemeMetadataCache::new().lookup(&catalog, &theme, &key);
            println!("{value}");
        }
    }

    Ok(())
}
