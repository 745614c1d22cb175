use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rafft::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Debug, Default)]
struct SearchTally {
    phase: &'static str,
    stems: usize,
    pairs: usize,
}

impl SearchTally {
    fn message(&self) -> String {
        if self.stems == 0 {
            self.phase.to_string()
        } else {
            format!("{}: {} stems, {} pairs", self.phase, self.stems, self.pairs)
        }
    }
}

/// Renders progress of a single fold as a spinner on stderr.
#[derive(Clone)]
pub struct FoldProgressHandler {
    pb: ProgressBar,
    tally: Arc<Mutex<SearchTally>>,
}

impl FoldProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(None, target);
        pb.set_style(spinner_style());
        Self {
            pb,
            tally: Arc::new(Mutex::new(SearchTally::default())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        let tally = self.tally.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut tally) = tally.lock() else {
                warn!("Progress tally mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    *tally = SearchTally {
                        phase: name,
                        ..SearchTally::default()
                    };
                    pb.reset();
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(tally.message());
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_with_message(format!("✓ {}", tally.message()));
                }
                Progress::StemCommitted { length } => {
                    tally.stems += 1;
                    tally.pairs += length;
                    pb.set_message(tally.message());
                }
            }
        })
    }
}

impl Default for FoldProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Bar used when several records are folded in parallel.
pub fn batch_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    pb.set_style(bar_style());
    pb.set_message("Folding");
    pb
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .map(|style| style.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
