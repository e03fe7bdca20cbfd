use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tasks_export::{config, run_export, Bootstrap, ExportError};

/// Turn exported members and issues into a tasks CSV
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON array of users, each wrapping a member
    #[arg(long)]
    members: Option<PathBuf>,

    /// JSON array of issues
    #[arg(long)]
    issues: Option<PathBuf>,

    /// Where to write the CSV
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML file with default paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print the final outcome
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn into_bootstrap(self) -> Result<Bootstrap, ExportError> {
        let mut bootstrap = Bootstrap {
            quiet: self.quiet,
            ..Default::default()
        };
        if let Some(path) = self.config {
            bootstrap = config::get_configuration(path)
                .map_err(ExportError::Config)?
                .apply(bootstrap);
        }
        if let Some(members) = self.members {
            bootstrap.members = members;
        }
        if let Some(issues) = self.issues {
            bootstrap.issues = issues;
        }
        if let Some(output) = self.output {
            bootstrap.output = output;
        }
        Ok(bootstrap)
    }
}

fn main() {
    let args = Args::parse();

    let result = args
        .into_bootstrap()
        .and_then(|bootstrap| run_export(&bootstrap).map(|summary| (bootstrap, summary)));

    match result {
        Ok((bootstrap, summary)) => {
            if !bootstrap.quiet {
                println!("{} {}", "SHA256:".green(), summary.sha256.white());
            }
            println!("{}", "CSV file created successfully.".green());
        }
        Err(e) => {
            println!("{}", e.to_string().bold().red());
            std::process::exit(1);
        }
    }
}
