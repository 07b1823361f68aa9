use crate::reports;
use clap::Args;
use keyanneal::api::Session;
use keyanneal::KaResult;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Number of quartads to list
    #[arg(long, default_value_t = 50)]
    pub top: usize,
}

pub fn run(session: &Session, args: &AnalyzeArgs) -> KaResult<()> {
    let corpus = &session.corpus;
    info!(
        "{} characters counted, {} placed on the keyboard, {} through Shift",
        session.frequencies.len(),
        corpus.placed.len(),
        corpus.shifted.len()
    );
    if !session.placement.unplaced.is_empty() {
        warn!("Unplaced: {:?}", session.placement.unplaced);
    }

    reports::print_frequencies(&session.frequencies);
    reports::print_quartads(&corpus.quartads.top(args.top));
    reports::print_layout("SEED", &session.layout);
    Ok(())
}
