//! Progress display for an enrichment run.
//!
//! One overall bar counts finished rows. Below it, a few spinner slots show
//! which rows are currently being looked up; rows that start while every
//! slot is busy simply aren't shown.

use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use songlore_scraper::EnrichEvent;

/// Most in-flight rows shown at once.
const MAX_SLOTS: usize = 8;

pub(crate) struct RunProgress {
    mp: MultiProgress,
    bar: ProgressBar,
    slots: Vec<ProgressBar>,
    assigned: HashMap<usize, usize>,
    free: Vec<usize>,
    matched: usize,
}

impl RunProgress {
    /// When `quiet` is true, nothing is drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let mp = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };

        let bar = mp.add(ProgressBar::new(0));
        bar.set_style(
            ProgressStyle::with_template(
                "  {bar:40.cyan/blue} {pos}/{len} rows ({per_sec}, eta {eta}) {msg}",
            )
            .expect("static pattern")
            .progress_chars("=> "),
        );

        Self {
            mp,
            bar,
            slots: Vec::new(),
            assigned: HashMap::new(),
            free: Vec::new(),
            matched: 0,
        }
    }

    pub(crate) fn handle(&mut self, event: EnrichEvent) {
        match event {
            EnrichEvent::Started { total, workers } => {
                self.bar.set_length(total as u64);
                self.add_slots(workers.min(MAX_SLOTS));
            }
            EnrichEvent::RowStarted { index, id } => {
                self.claim(index, format!("Looking up row {}", id));
            }
            EnrichEvent::RowFinished { index, matched, .. } => {
                if matched {
                    self.matched += 1;
                    self.bar.set_message(format!("{} matched", self.matched));
                }
                self.release(index);
                self.bar.inc(1);
            }
            EnrichEvent::RowFailed { index, .. } => {
                self.release(index);
                self.bar.inc(1);
            }
            EnrichEvent::Done => self.finish(),
        }
    }

    pub(crate) fn finish(&mut self) {
        for slot in &self.slots {
            slot.disable_steady_tick();
            slot.finish_and_clear();
        }
        self.assigned.clear();
        self.bar.finish_and_clear();
    }

    fn add_slots(&mut self, n: usize) {
        let style = ProgressStyle::with_template("    {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|");
        for _ in self.slots.len()..n {
            let pb = self.mp.add(ProgressBar::new_spinner());
            pb.set_style(style.clone());
            self.slots.push(pb);
        }
        self.free = (0..self.slots.len()).rev().collect();
    }

    fn claim(&mut self, key: usize, msg: String) {
        if let Some(slot) = self.free.pop() {
            self.slots[slot].reset();
            self.slots[slot].enable_steady_tick(Duration::from_millis(100));
            self.slots[slot].set_message(msg);
            self.assigned.insert(key, slot);
        }
    }

    fn release(&mut self, key: usize) {
        if let Some(slot) = self.assigned.remove(&key) {
            self.slots[slot].disable_steady_tick();
            self.slots[slot].set_message("");
            self.free.push(slot);
        }
    }
}
