use std::sync::{Arc, Mutex};
use std::time::Duration;

use dnacomp::progress::{ProgressNotifier, Stage};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

#[derive(Debug)]
struct DnaProgressBarState {
    stage: Option<Stage>,
    length: u64,
    initialized: bool,
}

impl DnaProgressBarState {
    fn new() -> Self {
        Self {
            stage: None,
            length: 0,
            initialized: false,
        }
    }
}

/// Terminal progress bar following the stages reported by the compressor
/// and the decompressor.
#[derive(Debug, Clone)]
pub(crate) struct DnaProgressBar {
    bar: ProgressBar,
    state: Arc<Mutex<DnaProgressBarState>>,
}

impl DnaProgressBar {
    pub fn new() -> DnaProgressBar {
        let init_bar = ProgressBar::hidden();
        init_bar.set_style(ProgressStyle::default_spinner());
        init_bar.enable_steady_tick(Duration::from_millis(50));
        init_bar.set_message("Reading input...");

        Self {
            bar: init_bar,
            state: Arc::new(Mutex::new(DnaProgressBarState::new())),
        }
    }

    pub fn show(&self) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear()
    }

    #[inline]
    fn init(&self) {
        let mut state = self.state.lock().unwrap();
        if state.initialized {
            return;
        }

        self.bar.set_length(state.length);
        self.bar.set_position(0);
        if let Some(stage) = state.stage {
            self.bar.set_message(format!("{:<8}", stage));
        }

        if state.length == 0 {
            self.bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg} {pos}/? ({per_sec})")
                    .expect("Invalid progress bar template"),
            );
        } else {
            self.bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} {wide_bar} {human_pos}/{human_len} bases [ETA {eta}]")
                    .expect("Invalid progress bar template"),
            );
        }
        state.initialized = true;
    }

    pub fn start_stage(&self, stage: Stage, length: u64) {
        let mut state = self.state.lock().unwrap();

        state.initialized = false;
        state.stage = Some(stage);
        state.length = length;
    }

    pub fn inc(&self, value: u64) {
        self.init();
        self.bar.inc(value);
    }

    pub fn println<I: AsRef<str>>(&self, msg: I) {
        self.bar.println(msg);
    }
}

impl ProgressNotifier for DnaProgressBar {
    fn stage_started(&self, stage: Stage, total_bases: u64) {
        self.start_stage(stage, total_bases);
        self.init();
    }

    fn processed_bases(&self, bases: u64) {
        self.inc(bases);
    }

    fn stage_finished(&self, _stage: Stage) {
        let length = self.state.lock().unwrap().length;
        self.bar.set_position(length);
    }
}
