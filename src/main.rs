use anyhow::Result;
use clap::{Parser, Subcommand};
use pwa_icons::config::Config;
use pwa_icons::constants::paths;
use pwa_icons::generator::{format_summary_line, summarize, IconGenerator};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pwa-icons")]
#[command(about = "Generate PWA icons from favicon.svg", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Asset directory holding favicon.svg (defaults to ../public next to this tool)
    #[arg(long, global = true)]
    public_dir: Option<PathBuf>,

    /// Source SVG, overrides the manifest's `source`
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Where to write the icons (defaults to the asset directory)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// YAML manifest overriding the built-in icon table
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest and parse the SVG without writing anything
    Check,
    /// Write the built-in icon table as a YAML manifest
    InitConfig {
        /// Where to write the manifest
        #[arg(default_value = paths::CONFIG_FILE)]
        path: PathBuf,
    },
}

/// Input and output locations after applying CLI > manifest > defaults
struct Paths {
    source: PathBuf,
    out_dir: PathBuf,
}

impl Paths {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let public_dir = cli
            .public_dir
            .clone()
            .unwrap_or_else(Config::default_public_dir);
        let source = cli
            .source
            .clone()
            .unwrap_or_else(|| public_dir.join(&config.source));
        let out_dir = cli.out_dir.clone().unwrap_or(public_dir);

        Paths { source, out_dir }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::InitConfig { path }) => init_config_command(path),
        Some(Commands::Check) => {
            let config = Config::load(cli.config.as_deref())?;
            check_command(&Paths::resolve(&cli, &config), &config, cli.quiet)
        }
        None => {
            let config = Config::load(cli.config.as_deref())?;
            generate_command(&Paths::resolve(&cli, &config), &config, cli.quiet)
        }
    }
}

fn generate_command(paths: &Paths, config: &Config, quiet: bool) -> Result<()> {
    if !quiet {
        println!("🎨 Generating PWA icons from {}...", paths.source.display());
    }

    let generator = IconGenerator::from_config(config, &paths.source, &paths.out_dir)?
        .quiet(quiet);
    let generated = generator.generate_all(&config.icons)?;

    if !quiet {
        println!("\n✨ All icons generated successfully!");
        println!("\n📋 Generated files:");
        for (name, bytes) in summarize(&generated) {
            println!("{}", format_summary_line(&name, bytes));
        }
    }

    Ok(())
}

fn check_command(paths: &Paths, config: &Config, quiet: bool) -> Result<()> {
    let generator = IconGenerator::from_config(config, &paths.source, &paths.out_dir)?;
    if quiet {
        return Ok(());
    }

    let (width, height) = generator.source().dimensions();

    println!("✓ Source: {} ({}x{})", generator.source().path().display(), width, height);
    println!("✓ Output directory: {}", generator.out_dir().display());
    println!("✓ {} icon(s) configured:", config.icons.len());
    for icon in &config.icons {
        if icon.is_padded() {
            println!(
                "   {} - {}x{}, artwork {}px at offset {}",
                icon.name,
                icon.size,
                icon.size,
                icon.inner_size(),
                icon.offset()
            );
        } else {
            println!("   {} - {}x{}", icon.name, icon.size, icon.size);
        }
    }

    Ok(())
}

fn init_config_command(path: &Path) -> Result<()> {
    Config::default().save_new(path)?;
    println!("Created default config at: {}", path.display());
    Ok(())
}
