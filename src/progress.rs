use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

// Progress bar style templates as constants
const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Interactive stderr progress for the CLI commands
pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    /// A reporter only makes sense on an interactive terminal
    pub fn for_terminal() -> Option<Self> {
        Term::stderr().is_term().then(Self::new)
    }

    fn create_progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new(len));
        let bar_style = ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        pb.set_style(bar_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        let spinner_style = ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_FRAMES);
        pb.set_style(spinner_style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_loading(&mut self, inputs: usize) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Loading {} edge {}...",
            style("📥").cyan(),
            style(inputs).yellow(),
            pluralize("stream", inputs)
        );
        let bar = self.create_progress_bar(inputs as u64, "Reading edge streams");
        self.current_bar = Some(bar);
    }

    /// Called from worker threads as each input is picked up
    pub fn reading_input(&self, name: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Reading: {name}"));
            pb.inc(1);
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Reading: {}... ",
                style(self.next_frame()).cyan(),
                style(name).dim()
            );
        }
    }

    pub fn finish_loading(&mut self, edges: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        eprintln!(
            "\r{} Loaded {} {}",
            style("✓").green(),
            style(edges).yellow().bold(),
            pluralize("edge", edges)
        );
    }

    pub fn start_analysis(&mut self) {
        let spinner = self.create_spinner("Assembling module graph and looking for loops...");
        self.current_bar = Some(spinner);
    }

    pub fn finish_analysis(&mut self, modules: usize, cycles: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "{} Assembled {} {}",
            style("✓").green(),
            style(modules).yellow().bold(),
            pluralize("module", modules)
        );
        if cycles == 0 {
            eprintln!(
                "{} No loops on this ride! {}",
                style("✓").green().bold(),
                style("🎉").dim()
            );
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles).red().bold(),
                pluralize("loop", cycles)
            );
        }
    }
}
