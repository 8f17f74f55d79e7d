use crate::theme::{self, Element, ThemeMode};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(&theme::stylesheet());

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

pub fn apply_class(widget: &impl IsA<gtk::Widget>, element: Element, mode: ThemeMode) {
    let classes = element.classes();
    widget.remove_css_class(classes.resolve(mode.toggle()));
    widget.add_css_class(classes.resolve(mode));
}

/// Widgets whose classes follow the theme mode.
#[derive(Default)]
pub struct ThemeBinder {
    bound: Vec<(gtk::Widget, Element)>,
}

impl ThemeBinder {
    pub fn bind(&mut self, widget: &impl IsA<gtk::Widget>, element: Element) {
        self.bound
            .push((widget.upcast_ref::<gtk::Widget>().clone(), element));
    }

    pub fn apply(&self, mode: ThemeMode) {
        for (widget, element) in &self.bound {
            apply_class(widget, *element, mode);
        }
    }

    pub fn clear(&mut self) {
        self.bound.clear();
    }
}
