//! Minimal terminal runtime: an event loop that interleaves gravity ticks,
//! redraws and key input, and a stack of screens that handle them.

pub use self::{
    app::App,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
