use super::anneal::AnnealingSchedule;
use super::mutation;
use crate::config::SearchParams;
use crate::error::KaResult;
use crate::geometry::Layout;
use crate::scorer::Scorer;
use fastrand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
pub struct OptimizationOptions {
    pub iterations: usize,
    #[builder(default = 15.0)]
    pub t0: f64,
    #[builder(default = 10.0)]
    pub cooling_rate: f64,
    #[builder(default = 3)]
    pub max_swaps: usize,
    /// Candidates evaluated per batch. 1 runs a plain sequential chain.
    #[builder(default = 1)]
    pub parallelism: usize,
    #[builder(default = 5)]
    pub top_layouts: usize,
    #[builder(default)]
    pub seed: Option<u64>,
    /// Iterations between progress callbacks.
    #[builder(default = 500)]
    pub report_every: usize,
}

impl OptimizationOptions {
    pub fn from_search(search: &SearchParams, swappable_keys: usize) -> Self {
        Self::builder()
            .iterations(search.resolve_iterations(swappable_keys))
            .t0(search.t0)
            .cooling_rate(search.cooling_rate)
            .max_swaps(search.max_swaps)
            .parallelism(search.parallelism.max(1))
            .top_layouts(search.top_layouts)
            .seed(search.seed)
            .build()
    }
}

/// Cooperative stop flag shared with a signal handler or another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Progress<'a> {
    pub iteration: usize,
    pub total: usize,
    pub temperature: f64,
    pub current_score: f64,
    pub best_score: f64,
    pub best: &'a Layout,
    pub accepted: usize,
}

pub trait ProgressCallback: Send + Sync {
    /// Return `false` to stop the search.
    fn on_progress(&self, progress: &Progress) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(&Progress) -> bool + Send + Sync,
{
    fn on_progress(&self, progress: &Progress) -> bool {
        self(progress)
    }
}

/// Callback that never reports and never stops the search.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_progress(&self, _progress: &Progress) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub initial_score: f64,
    pub best: Layout,
    pub best_score: f64,
    /// Distinct accepted layouts, best first.
    pub top: Vec<(f64, Layout)>,
    pub iterations_run: usize,
    pub accepted: usize,
    pub cancelled: bool,
    /// Seed the run used, drawn at random when none was configured.
    pub seed: u64,
}

/// Best-first list of distinct layouts, bounded to `capacity`.
#[derive(Debug)]
struct TopLayouts {
    capacity: usize,
    entries: Vec<(f64, Layout)>,
}

impl TopLayouts {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    fn offer(&mut self, score: f64, layout: &Layout) {
        if self.capacity == 0 {
            return;
        }
        if let Some(worst) = self.entries.last() {
            if self.entries.len() >= self.capacity && score >= worst.0 {
                return;
            }
        }
        if self.entries.iter().any(|(_, l)| l.same_bindings(layout)) {
            return;
        }
        let pos = self.entries.partition_point(|(s, _)| *s <= score);
        self.entries.insert(pos, (score, layout.clone()));
        self.entries.truncate(self.capacity);
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> Self {
        Self { scorer, options }
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    fn candidate(&self, base: &Layout, swappable: &[usize], rng: &mut Rng) -> (Layout, f64) {
        let mut layout = base.clone();
        mutation::mutate(&mut layout, swappable, rng, self.options.max_swaps);
        let score = self.scorer.score(&layout);
        (layout, score)
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        initial: &Layout,
        cancel: &CancelToken,
        callback: CB,
    ) -> KaResult<OptimizationResult> {
        let opts = &self.options;
        let schedule = AnnealingSchedule::new(opts.iterations, opts.t0, opts.cooling_rate)?;
        let seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = Rng::with_seed(seed);

        let swappable = initial.swappable_keys();
        let batch_size = opts.parallelism.max(1);
        let report_every = opts.report_every.max(1);

        let mut current = initial.clone();
        let mut current_score = self.scorer.score(&current);
        let initial_score = current_score;
        let mut best = current.clone();
        let mut best_score = current_score;
        let mut top = TopLayouts::new(opts.top_layouts);
        top.offer(current_score, &current);

        info!(
            "Annealing {} iterations over {} swappable keys (batch {}, seed {}, start score {:.2})",
            schedule.n,
            swappable.len(),
            batch_size,
            seed,
            current_score
        );

        let mut accepted = 0;
        let mut cancelled = false;
        let mut i = 1;
        let mut next_report = report_every;

        while i <= schedule.n {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let batch = batch_size.min(schedule.n - i + 1);
            let candidates: Vec<(Layout, f64)> = if batch == 1 {
                vec![self.candidate(&current, &swappable, &mut rng)]
            } else {
                let seeds: Vec<u64> = (0..batch).map(|_| rng.u64(..)).collect();
                let base = &current;
                seeds
                    .par_iter()
                    .map(|&seed| {
                        let mut worker_rng = Rng::with_seed(seed);
                        self.candidate(base, &swappable, &mut worker_rng)
                    })
                    .collect()
            };

            for (layout, score) in candidates {
                let delta = score - current_score;
                if schedule.accept(delta, i, &mut rng) {
                    accepted += 1;
                    current = layout;
                    current_score = score;
                    top.offer(current_score, &current);
                    if current_score < best_score {
                        debug!("Iteration {}: new best {:.4}", i, current_score);
                        best = current.clone();
                        best_score = current_score;
                    }
                }
                i += 1;
            }

            if i > next_report || i > schedule.n {
                next_report += report_every;
                let progress = Progress {
                    iteration: i - 1,
                    total: schedule.n,
                    temperature: schedule.temperature(i - 1),
                    current_score,
                    best_score,
                    best: &best,
                    accepted,
                };
                if !callback.on_progress(&progress) {
                    cancelled = true;
                    break;
                }
            }
        }

        let iterations_run = i - 1;
        if cancelled {
            info!(
                "Search stopped after {} of {} iterations",
                iterations_run, schedule.n
            );
        }
        info!(
            "Best score {:.4} (start {:.4}, {} accepted)",
            best_score, initial_score, accepted
        );

        Ok(OptimizationResult {
            initial_score,
            best,
            best_score,
            top: top.entries,
            iterations_run,
            accepted,
            cancelled,
            seed,
        })
    }
}
