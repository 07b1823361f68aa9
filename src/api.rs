use crate::config::{Config, UserProfile};
use crate::corpus::{count_characters, read_corpus, CharFrequencies, CorpusAnalysis};
use crate::error::KaResult;
use crate::geometry::{KeyboardDefinition, Layout};
use crate::locale::Locale;
use crate::optimizer::{assign_characters, OptimizationOptions, Optimizer, Placement};
use crate::scorer::{PenaltyResult, Scorer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// `{data_dir}/{kind}/{name}.json`, or `name` itself when it already names a file.
pub fn resolve_data_file(data_dir: &Path, kind: &str, name: &str) -> PathBuf {
    let direct = Path::new(name);
    if direct.extension().is_some() {
        if direct.is_absolute() {
            return direct.to_path_buf();
        }
        return data_dir.join(direct);
    }
    data_dir.join(kind).join(format!("{}.json", name))
}

fn resolve_corpus(data_dir: &Path, entry: &str) -> PathBuf {
    let path = Path::new(entry);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}

/// Everything needed to score or optimize one user's layout.
pub struct Session {
    pub profile: UserProfile,
    pub config: Config,
    pub locale: Locale,
    /// Keyboard after greedy seeding.
    pub layout: Layout,
    pub frequencies: CharFrequencies,
    pub placement: Placement,
    pub corpus: CorpusAnalysis,
    pub scorer: Arc<Scorer>,
}

impl Session {
    /// Loads keyboard, locale and corpus named by the profile from `data_dir`.
    pub fn load(profile: UserProfile, config: Config, data_dir: &Path) -> KaResult<Self> {
        let kb_path = resolve_data_file(data_dir, "keyboards", &profile.keyboard);
        let keyboard = KeyboardDefinition::load_from_file(&kb_path)?;

        let locale_path = resolve_data_file(data_dir, "locales", &profile.locale);
        let locale = Locale::load_from_file(&locale_path)?;

        let corpus_paths: Vec<PathBuf> = profile
            .corpus
            .iter()
            .map(|c| resolve_corpus(data_dir, c))
            .collect();
        if corpus_paths.is_empty() {
            warn!("Profile '{}' lists no corpus files; only seed characters will be placed", profile.name);
        }
        let text = read_corpus(&corpus_paths)?;

        info!(
            "Loaded keyboard '{}', locale '{}' ({} pairs), {} corpus file(s)",
            keyboard.name,
            profile.locale,
            locale.len(),
            corpus_paths.len()
        );

        Self::from_parts(profile, config, &keyboard, locale, &text)
    }

    /// Builds a session from already-loaded inputs.
    pub fn from_parts(
        profile: UserProfile,
        config: Config,
        keyboard: &KeyboardDefinition,
        locale: Locale,
        text: &str,
    ) -> KaResult<Self> {
        let mut layout = Layout::from_definition(keyboard, profile.costs(), &locale)?;

        let seeds: Vec<char> = layout
            .essential_chars()
            .iter()
            .copied()
            .chain(profile.required_chars())
            .collect();
        let frequencies = count_characters(text, seeds);
        let placement = assign_characters(&mut layout, &frequencies, &locale);
        let corpus = CorpusAnalysis::new(text, &layout);
        let scorer = Arc::new(Scorer::new(corpus.quartads.clone(), config.weights.clone()));

        Ok(Self {
            profile,
            config,
            locale,
            layout,
            frequencies,
            placement,
            corpus,
            scorer,
        })
    }

    pub fn score(&self, layout: &Layout) -> PenaltyResult {
        self.scorer.score_details(layout)
    }

    pub fn optimizer(&self) -> Optimizer {
        let options =
            OptimizationOptions::from_search(&self.config.search, self.layout.swappable_keys().len());
        Optimizer::new(self.scorer.clone(), options)
    }
}
