use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keyanneal::api::Session;
use keyanneal::config::UserProfile;
use keyanneal::KaResult;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// User profile (finger costs, penalty weights, corpus, keyboard)
    #[arg(
        global = true,
        short,
        long,
        default_value = "data/users/default.json"
    )]
    profile: PathBuf,

    /// Root for keyboards/, locales/ and relative corpus paths
    #[arg(global = true, short, long, default_value = "data")]
    data_dir: PathBuf,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed a layout from the corpus and anneal it
    Optimize(cmd::optimize::OptimizeArgs),
    /// Score the seeded layout and show where the cost comes from
    Score(cmd::score::ScoreArgs),
    /// Show corpus statistics and character placement
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> KaResult<()> {
    info!("Loading profile {:?}", cli.profile);
    let profile = UserProfile::load_from_file(&cli.profile)?;

    // Profile values are the base; flags typed on the command line win.
    let mut config = profile.config();
    match &cli.command {
        Commands::Optimize(args) => {
            if let Some(sub) = matches.subcommand_matches("optimize") {
                config.merge_from_cli(&args.config, sub);
            }
        }
        Commands::Score(args) => {
            if let Some(sub) = matches.subcommand_matches("score") {
                config.weights.merge_from_cli(&args.weights, sub);
            }
        }
        Commands::Analyze(_) => {}
    }

    let session = Session::load(profile, config, &cli.data_dir)?;

    match cli.command {
        Commands::Optimize(args) => cmd::optimize::run(&session, &args),
        Commands::Score(args) => cmd::score::run(&session, &args),
        Commands::Analyze(args) => cmd::analyze::run(&session, &args),
    }
}
