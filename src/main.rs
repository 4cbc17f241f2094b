use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use pwmaker::config::{self, ProfileFile, DEFAULT_PROFILE};
use pwmaker::{context_with, generate_with, logging, PublicSuffixList, RegionSet, SuffixRules, SuffixTable};

/// Derive site passwords from a master secret and a URL.
#[derive(Debug, Parser)]
#[command(name = "pwmaker")]
#[command(about = "Deterministic site password derivation", long_about = None)]
struct Cli {
    /// Profile file (defaults to $XDG_CONFIG_HOME/pwmaker/profiles.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Replacement suffix data in Public Suffix List format.
    #[arg(long, global = true, conflicts_with = "psl")]
    suffix_list: Option<PathBuf>,

    /// Split domains with the compiled Public Suffix List.
    #[arg(long, global = true)]
    psl: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the normalized context for a URL.
    Context {
        /// URL or opaque text.
        text: String,

        /// Comma-separated regions, overriding the profile's selection.
        #[arg(long)]
        regions: Option<String>,

        /// Profile name.
        #[arg(long, default_value = DEFAULT_PROFILE)]
        profile: String,
    },

    /// Derive a password; the master secret is read from the first line of stdin.
    Derive {
        /// URL or opaque text.
        text: String,

        /// Profile name.
        #[arg(long, default_value = DEFAULT_PROFILE)]
        profile: String,
    },

    /// List the profiles defined in the config file.
    Profiles,
}

fn suffix_rules(cli: &Cli) -> Result<Box<dyn SuffixRules>> {
    if cli.psl {
        return Ok(Box::new(PublicSuffixList));
    }
    match &cli.suffix_list {
        Some(path) => {
            let table = SuffixTable::load(path)
                .with_context(|| format!("failed to load suffix list {}", path.display()))?;
            tracing::info!(rules = table.len(), "loaded suffix list {}", path.display());
            Ok(Box::new(table))
        }
        None => Ok(Box::new(SuffixTable::builtin())),
    }
}

fn load_profiles(cli: &Cli) -> Result<ProfileFile> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };
    ProfileFile::load_or_default(&path)
        .with_context(|| format!("failed to load profiles from {}", path.display()))
}

fn read_secret() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read master secret from stdin")?;
    let secret = line.trim_end_matches(['\r', '\n']).to_string();
    if secret.is_empty() {
        tracing::warn!("master secret is empty");
    }
    Ok(secret)
}

fn run(cli: Cli) -> Result<()> {
    let rules = suffix_rules(&cli)?;
    let profiles = load_profiles(&cli)?;

    match &cli.command {
        Command::Context { text, regions, profile } => {
            let regions: RegionSet = match regions {
                Some(list) => list.parse()?,
                None => profiles.profile(profile)?.regions,
            };
            println!("{}", context_with(text, regions, rules.as_ref()));
        }
        Command::Derive { text, profile } => {
            let profile = profiles.profile(profile)?;
            let secret = read_secret()?;
            let password = generate_with(text, secret.as_bytes(), &profile, rules.as_ref())?;
            println!("{}", password);
        }
        Command::Profiles => {
            let mut any = false;
            for name in profiles.names() {
                println!("{}", name);
                any = true;
            }
            if !any {
                bail!("no profiles defined");
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("pwmaker error: {:#}", err);
        std::process::exit(1);
    }
}
