use crate::reports;
use clap::Args;
use keyanneal::api::Session;
use keyanneal::config::PenaltyWeights;
use keyanneal::KaResult;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub weights: PenaltyWeights,

    /// Worst quartads to list per rule (0 = none)
    #[arg(long, default_value_t = 5)]
    pub hotspots: usize,

    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(session: &Session, args: &ScoreArgs) -> KaResult<()> {
    let layout = &session.layout;
    let details = session.score(layout);

    reports::print_layout(&layout.name, layout);
    reports::print_cost_grid(layout);
    reports::print_breakdown(&details);
    info!("Total: {:.2}", details.total);

    if args.hotspots > 0 {
        for rule in details.rules.iter().filter(|r| r.total != 0.0) {
            let spots = session.scorer.hotspots(layout, rule.rule, args.hotspots);
            reports::print_hotspots(rule.rule, &spots);
        }
    }

    if let Some(path) = &args.csv {
        reports::write_breakdown_csv(path, &details)?;
        info!("Breakdown written to {:?}", path);
    }
    Ok(())
}
