use palette::Srgba;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::fmt::Write;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// A value with one variant per theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant<T> {
    pub dark: T,
    pub light: T,
}

impl<T> Variant<T> {
    pub const fn new(dark: T, light: T) -> Self {
        Self { dark, light }
    }

    pub fn resolve(&self, mode: ThemeMode) -> &T {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }
}

/// Every piece of the pages whose look depends on the theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum Element {
    Page,
    Heading,
    Body,
    FormLabel,
    Input,
    ContactCard,
    IconChip,
    CardTitle,
    CardValue,
    OutlineButton,
}

impl Element {
    pub fn classes(self) -> Variant<&'static str> {
        match self {
            Self::Page => Variant::new("page-dark", "page-light"),
            Self::Heading => Variant::new("heading-dark", "heading-light"),
            Self::Body => Variant::new("body-dark", "body-light"),
            Self::FormLabel => Variant::new("form-label-dark", "form-label-light"),
            Self::Input => Variant::new("input-dark", "input-light"),
            Self::ContactCard => Variant::new("contact-card-dark", "contact-card-light"),
            Self::IconChip => Variant::new("icon-chip-dark", "icon-chip-light"),
            Self::CardTitle => Variant::new("card-title-dark", "card-title-light"),
            Self::CardValue => Variant::new("card-value-dark", "card-value-light"),
            Self::OutlineButton => Variant::new("outline-button-dark", "outline-button-light"),
        }
    }

    fn declarations(self) -> Variant<&'static str> {
        match self {
            Self::Page => Variant::new(
                "background-color: #0f172a; color: #ffffff;",
                "background-color: #f9fafb; color: #111827;",
            ),
            Self::Heading => Variant::new("color: #ffffff;", "color: #1f2937;"),
            Self::Body => Variant::new("color: #d1d5db;", "color: #4b5563;"),
            Self::FormLabel => Variant::new("color: #d1d5db;", "color: #374151;"),
            Self::Input => Variant::new(
                "background-color: rgba(30, 41, 59, 0.8); border: 1px solid #334155; color: #ffffff;",
                "background-color: #ffffff; border: 1px solid #e5e7eb; color: #111827;",
            ),
            Self::ContactCard => Variant::new(
                "background-color: rgba(30, 41, 59, 0.5);",
                "background-color: rgba(255, 255, 255, 0.5);",
            ),
            Self::IconChip => Variant::new(
                "background-color: rgba(139, 92, 246, 0.2);",
                "background-color: #ede9fe;",
            ),
            Self::CardTitle => Variant::new("color: #9ca3af;", "color: #6b7280;"),
            Self::CardValue => Variant::new("color: #ffffff;", "color: #111827;"),
            Self::OutlineButton => Variant::new(
                "color: #d1d5db; border: 1px solid #374151;",
                "color: #4b5563; border: 1px solid #d1d5db;",
            ),
        }
    }
}

pub fn css_class(element: Element, mode: ThemeMode) -> &'static str {
    element.classes().resolve(mode)
}

const BASE_CSS: &str = "
.folio-accent { color: #c4b5fd; }
.folio-gradient-button {
    background-image: linear-gradient(to right, #8b5cf6, #d946ef);
    color: #ffffff;
    border-radius: 12px;
    padding: 12px 28px;
}
.outline-button-dark:hover, .outline-button-light:hover {
    color: #a78bfa;
    border-color: #a78bfa;
}
.folio-notice-error { color: #f87171; }
.folio-notice-sent { color: #34d399; }
.folio-title { font-size: 48px; font-weight: bold; }
";

/// Rules for both variants of every element, plus mode-independent ones.
pub fn stylesheet() -> String {
    let mut css = String::from(BASE_CSS);
    for element in Element::iter() {
        let (classes, decls) = (element.classes(), element.declarations());
        for mode in ThemeMode::iter() {
            let _ = writeln!(css, ".{} {{ {} }}", classes.resolve(mode), decls.resolve(mode));
        }
    }
    css
}

/// Colors for the cairo-painted ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub glow_start: Srgba<f64>,
    pub glow_end: Srgba<f64>,
    pub portrait_border: Srgba<f64>,
    pub badge: Srgba<f64>,
    pub badge_text: Srgba<f64>,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            glow_start: Srgba::new(0.545, 0.361, 0.965, 0.5),
            glow_end: Srgba::new(0.941, 0.671, 0.988, 0.5),
            portrait_border: Srgba::new(1.0, 1.0, 1.0, 0.1),
            badge: Srgba::new(1.0, 1.0, 1.0, 0.1),
            badge_text: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    pub fn light() -> Self {
        Self {
            portrait_border: Srgba::new(0.0, 0.0, 0.0, 0.08),
            badge: Srgba::new(0.545, 0.361, 0.965, 0.15),
            badge_text: Srgba::new(0.427, 0.157, 0.851, 1.0),
            ..Self::dark()
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}
