use anyhow::Result;
use clap::Parser;
use covmap::cli::{Cli, Commands};
use covmap::commands::tree::{run_tree, TreeCommand};
use covmap::config::{load_config, load_config_file, CovmapConfig};
use covmap::formatting::formatter_for;

fn main() -> Result<()> {
    let cli = Cli::parse();
    covmap::observability::init_tracing(cli.verbosity);

    match cli.command {
        Commands::Tree {
            file,
            format,
            output,
            color,
            max_depth,
            show_metrics,
            tab_width,
            link_template,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            let command = TreeCommand {
                file,
                format,
                output,
                color,
                max_depth,
                show_metrics,
                tab_width,
                link_template,
            };
            run_tree(command, config)
        }
        Commands::Classify { percentages, json } => {
            let config = resolve_config(cli.config.as_deref())?;
            let formatter = formatter_for(config.display.color);
            let classifications = covmap::commands::classify::classify_all(&percentages);
            let mut stdout = std::io::stdout().lock();
            covmap::commands::classify::write_classifications(
                &mut stdout,
                &classifications,
                formatter.as_ref(),
                json,
            )
        }
        Commands::Init { force } => {
            let dir = std::env::current_dir()?;
            covmap::commands::init::init_config(&dir, force)
        }
    }
}

// An explicit path must load; otherwise fall back to discovery
fn resolve_config(explicit: Option<&std::path::Path>) -> Result<CovmapConfig> {
    match explicit {
        Some(path) => Ok(load_config_file(path)?),
        None => Ok(load_config()),
    }
}
