use std::path::PathBuf;

use clap::Parser;

use sitegen::Config;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Generate a static HTML site from Markdown content")]
struct Cli {
    /// Site root containing the content, static and template paths
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Base path prefix for root-relative asset links (overrides config)
    #[arg(short, long)]
    base_path: Option<String>,

    /// Config file, relative to the site root
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(&cli.root.join(&cli.config));
    if let Some(base_path) = cli.base_path {
        config.site.base_path = base_path;
    }

    if let Err(e) = sitegen::build(&cli.root, &config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    println!(
        "Site written to {}",
        cli.root.join(&config.paths.output).display()
    );
}
