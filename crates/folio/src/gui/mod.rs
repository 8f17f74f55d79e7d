use crate::motion::Entrance;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;
use strum::{AsRefStr, Display as StrumDisplay};

pub mod app;
pub mod contact;
pub mod hero;
pub mod theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    Hero,
    Contact,
}

/// Fades `widget` in and slides it into place, driven by its frame clock.
pub fn animate_entrance(widget: &impl IsA<gtk::Widget>, entrance: Entrance) {
    let widget = widget.upcast_ref::<gtk::Widget>();
    widget.set_opacity(0.0);

    let start = Cell::new(None::<i64>);
    widget.add_tick_callback(move |widget, clock| {
        let now = clock.frame_time();
        let first = start.get().unwrap_or(now);
        start.set(Some(first));
        let elapsed = std::time::Duration::from_micros((now - first).max(0) as u64);

        widget.set_opacity(entrance.opacity.sample(elapsed));
        let margins = entrance.margins(elapsed);
        widget.set_margin_top(margins.top);
        widget.set_margin_start(margins.start);
        widget.set_margin_end(margins.end);

        if entrance.is_finished(elapsed) {
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });
}

pub fn open_uri(uri: &str) {
    if let Err(e) = std::process::Command::new("xdg-open").arg(uri).spawn() {
        log::error!("Failed to open '{}': {}", uri, e);
    }
}
