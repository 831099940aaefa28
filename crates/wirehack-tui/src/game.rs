use std::time::{Duration, Instant};
use wirehack_core::{HackConfig, WireHack};

/// Seconds-per-cell budget; finishing under `cells × this` counts as a
/// fast hack.
const FAST_HACK_SECS_PER_CELL: f32 = 0.9;

/// Per-second rate at which the displayed bar closes on the real fraction.
const PROGRESS_EASE_RATE: f32 = 6.0;

/// The host side of one hack: owns the engine session plus the timing and
/// scoring the panel entity would normally layer on top.
pub struct HostSession {
    hack: WireHack,
    config: HackConfig,
    seed: u64,
    start: Instant,
    /// Latched at completion so the clock stops with the hack
    final_elapsed: Duration,
    completed: bool,
    moves: usize,
    displayed_progress: f32,
}

impl HostSession {
    pub fn new(config: HackConfig, seed: u64) -> Self {
        let hack = WireHack::with_seed(config, seed);
        let displayed_progress = hack.progress();
        Self {
            hack,
            config,
            seed,
            start: Instant::now(),
            final_elapsed: Duration::ZERO,
            completed: false,
            moves: 0,
            displayed_progress,
        }
    }

    pub fn hack(&self) -> &WireHack {
        &self.hack
    }

    pub fn config(&self) -> HackConfig {
        self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Forward a rotation to the engine. Returns whether this move finished
    /// the hack.
    pub fn select(&mut self, flat_index: usize) -> bool {
        if self.hack.select_option(flat_index).is_err() {
            return false;
        }
        self.moves += 1;
        if !self.completed && self.hack.is_complete() {
            self.completed = true;
            self.final_elapsed = self.start.elapsed();
            return true;
        }
        false
    }

    /// Re-lock the panel: same layout, fresh jumble, fresh clock.
    pub fn reset(&mut self) {
        self.hack.reset();
        self.start = Instant::now();
        self.final_elapsed = Duration::ZERO;
        self.completed = false;
        self.moves = 0;
        self.displayed_progress = self.hack.progress();
    }

    /// Advance the display clock: ease the progress bar toward the real
    /// fraction instead of snapping.
    pub fn tick(&mut self, dt: Duration) {
        let target = self.hack.progress();
        let step = (PROGRESS_EASE_RATE * dt.as_secs_f32()).min(1.0);
        self.displayed_progress += (target - self.displayed_progress) * step;
    }

    pub fn elapsed(&self) -> Duration {
        if self.completed {
            self.final_elapsed
        } else {
            self.start.elapsed()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Smoothed fraction for the progress bar
    pub fn displayed_progress(&self) -> f32 {
        self.displayed_progress
    }

    pub fn fast_hack_threshold(&self) -> f32 {
        self.config.total_cells() as f32 * FAST_HACK_SECS_PER_CELL
    }

    pub fn is_fast_hack(&self) -> bool {
        self.completed && self.final_elapsed.as_secs_f32() < self.fast_hack_threshold()
    }
}

/// Format seconds as M:SS.s
pub fn format_time(secs: f32) -> String {
    let mins = (secs / 60.0) as u32;
    format!("{}:{:04.1}", mins, secs - mins as f32 * 60.0)
}
