use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks at an adjustable interval, a render after every change,
/// and terminal events in between.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates an event loop without ticks. The first event is a render.
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true,
        }
    }

    /// Sets the tick interval. `None` stops ticks.
    ///
    /// The next tick fires one full interval from now, so resuming never
    /// produces an immediate tick.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.set_tick_interval_at(interval, Instant::now());
    }

    fn set_tick_interval_at(&mut self, interval: Option<Duration>, now: Instant) {
        self.tick_interval = interval;
        self.last_tick = now;
    }

    /// Returns the next event, blocking until one is available.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= tick_interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Time until the next tick, or `None` to wait for input indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let interval = self.tick_interval?;
        Some((self.last_tick + interval).saturating_duration_since(now))
    }
}
