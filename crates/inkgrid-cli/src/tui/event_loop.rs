use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces the next [`TuiEvent`].
///
/// Renders are only produced after something happened (a tick or a terminal
/// event), so an idle game does not redraw. Without a tick interval the loop
/// simply blocks on terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // first frame
        }
    }
}

impl EventLoop {
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Blocks until the next tick is due or a terminal event arrives.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let now = Instant::now();
            let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
            if let Some(tick_at) = next_tick_at {
                if now >= tick_at {
                    self.last_tick = now;
                    self.dirty = true;
                    return Ok(TuiEvent::Tick);
                }
                if !event::poll(tick_at.saturating_duration_since(now))? {
                    continue;
                }
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
