use crate::reports;
use clap::Args;
use keyanneal::api::Session;
use keyanneal::config::Config;
use keyanneal::optimizer::{CancelToken, Progress, ProgressCallback};
use keyanneal::scorer::{Scorer, Watermarks};
use keyanneal::KaResult;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Write the per-rule breakdown of the best layout as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

struct CliReporter {
    scorer: Arc<Scorer>,
    marks: Mutex<Watermarks>,
}

impl ProgressCallback for CliReporter {
    fn on_progress(&self, p: &Progress) -> bool {
        let details = self.scorer.score_details(p.best);
        let fraction = match self.marks.lock() {
            Ok(mut marks) => {
                marks.observe(&details);
                marks.total.map(|m| 1.0 - m.fraction(details.total)).unwrap_or(0.0)
            }
            Err(_) => 0.0,
        };
        info!(
            "{:>8}/{:<8} T={:<8.4} cur {:>12.2} best {:>12.2} {} acc {}",
            p.iteration,
            p.total,
            p.temperature,
            p.current_score,
            p.best_score,
            reports::progress_bar(fraction, 20),
            p.accepted
        );
        true
    }
}

pub fn run(session: &Session, args: &OptimizeArgs) -> KaResult<()> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    reports::print_layout("SEED", &session.layout);

    let optimizer = session.optimizer();
    let reporter = CliReporter {
        scorer: session.scorer.clone(),
        marks: Mutex::new(Watermarks::default()),
    };
    let result = optimizer.run(&session.layout, &cancel, reporter)?;

    if result.cancelled {
        warn!("Interrupted, reporting best layout so far");
    }

    info!("=== FINAL RESULT ===");
    info!(
        "Score: {:.2} (seed {:.2}, {} iterations, {} accepted)",
        result.best_score, result.initial_score, result.iterations_run, result.accepted
    );
    info!("Rerun with --seed {} to reproduce", result.seed);

    reports::print_layout("OPTIMIZED", &result.best);
    reports::print_cost_grid(&result.best);

    let details = session.scorer.score_details(&result.best);
    reports::print_breakdown(&details);

    if result.top.len() > 1 {
        for (rank, (score, layout)) in result.top.iter().enumerate().skip(1) {
            reports::print_layout(&format!("#{} ({:.2})", rank + 1, score), layout);
        }
    }

    if let Some(path) = &args.csv {
        reports::write_breakdown_csv(path, &details)?;
        info!("Breakdown written to {:?}", path);
    }

    Ok(())
}
