#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ShowHero,
    ShowContact,
    ToggleTheme,
    Quit,
    ConfigReload,
}

impl AppEvent {
    /// Parses one line of the control socket protocol.
    pub fn from_command(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "hero" => Some(Self::ShowHero),
            "contact" => Some(Self::ShowContact),
            "theme" => Some(Self::ToggleTheme),
            "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}
