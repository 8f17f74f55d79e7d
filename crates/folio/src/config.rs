use crate::contact::{ContactDetail, ContactInfo, SocialLink};
use crate::events::AppEvent;
use crate::hero;
use crate::ring::{self, RingGeometry, TechnologyItem};
use crate::theme::ThemeMode;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub role: String,
    pub intro: String,
    pub phrases: Vec<String>,
    pub type_delay_ms: u64,
    pub hold_ms: u64,
    /// Portrait painted inside the ring.
    pub avatar: Option<PathBuf>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Jawad".to_string(),
            role: "Software Developer".to_string(),
            intro: "A passionate software developer crafting exceptional digital experiences. \
                    Specializing in modern web applications that make a difference."
                .to_string(),
            phrases: vec![
                "Web Developer 😀".to_string(),
                "Freelancer 👻".to_string(),
                "Web Designer ✨".to_string(),
            ],
            type_delay_ms: hero::TYPE_DELAY.as_millis() as u64,
            hold_ms: hero::HOLD.as_millis() as u64,
            avatar: None,
        }
    }
}

impl ProfileConfig {
    pub fn type_delay(&self) -> Duration {
        Duration::from_millis(self.type_delay_ms)
    }

    /// Hold time expressed in typewriter steps.
    pub fn hold_steps(&self) -> u32 {
        (self.hold_ms / self.type_delay_ms.max(1)) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RingConfig {
    pub radius: f64,
    pub period_ms: u64,
    pub steps_per_turn: u32,
    pub animation_ms: u64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: ring::DEFAULT_RADIUS,
            period_ms: ring::DEFAULT_PERIOD.as_millis() as u64,
            steps_per_turn: ring::DEFAULT_STEPS_PER_TURN,
            animation_ms: ring::BADGE_ANIMATION.as_millis() as u64,
        }
    }
}

impl RingConfig {
    pub fn geometry(&self) -> RingGeometry {
        RingGeometry::new(self.radius, self.steps_per_turn)
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    pub submit_delay_ms: u64,
    pub details: Vec<ContactDetail>,
    pub socials: Vec<SocialLink>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        let info = ContactInfo::default();
        Self {
            submit_delay_ms: crate::contact::DEFAULT_SUBMIT_DELAY.as_millis() as u64,
            details: info.details,
            socials: info.socials,
        }
    }
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn info(&self) -> ContactInfo {
        ContactInfo {
            details: self.details.clone(),
            socials: self.socials.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileConfig,
    pub theme: ThemeConfig,
    pub ring: RingConfig,
    pub contact: ContactConfig,
    pub technologies: Vec<TechnologyItem>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: ProfileConfig::default(),
            theme: ThemeConfig::default(),
            ring: RingConfig::default(),
            contact: ContactConfig::default(),
            technologies: default_technologies(),
        }
    }
}

fn default_technologies() -> Vec<TechnologyItem> {
    [
        ("React", "react"),
        ("JavaScript", "javascript"),
        ("TypeScript", "typescript"),
        ("Node.js", "nodejs"),
        ("Tailwind", "tailwindcss"),
        ("HTML5", "html"),
        ("CSS3", "css"),
        ("Git", "git"),
    ]
    .into_iter()
    .map(|(name, icon)| TechnologyItem::new(name, Some(icon)))
    .collect()
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ring = &self.ring;
        if !(ring.radius.is_finite() && ring.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ring.radius must be positive, got {}",
                ring.radius
            )));
        }
        if ring.period_ms == 0 {
            return Err(ConfigError::Invalid("ring.period_ms must be positive".into()));
        }
        if ring.steps_per_turn == 0 {
            return Err(ConfigError::Invalid(
                "ring.steps_per_turn must be positive".into(),
            ));
        }
        if self.profile.type_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "profile.type_delay_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("dev", "folio", "folio").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Built-in defaults, then the user's file, then `FOLIO_*` variables.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&get_config_path()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_config(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return Ok(());
    };
    fs_err::create_dir_all(&config_dir)?;

    let (fs_tx, fs_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = fs_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        let touches_config = matches!(
            event.kind,
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
        ) && event.paths.iter().any(|p| p == &config_path);

        if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::SocialKind;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-test-{}-{}", name, std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs_err::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config_matches_builtin() {
        let config = load_from(Path::new("/nonexistent/folio/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let path = temp_config(
            "override",
            r#"
[theme]
mode = "light"

[ring]
radius = 120.0

[[technologies]]
name = "Rust"
icon = "rust"
"#,
        );
        let config = load_from(&path).unwrap();

        assert_eq!(config.theme.mode, ThemeMode::Light);
        assert_eq!(config.ring.radius, 120.0);
        assert_eq!(config.ring.period_ms, 3000);
        assert_eq!(config.technologies, vec![TechnologyItem::new("Rust", Some("rust"))]);
        assert_eq!(config.contact.socials[1].kind, SocialKind::GitHub);
    }

    #[test]
    fn test_rejects_zero_steps() {
        let path = temp_config("steps", "[ring]\nsteps_per_turn = 0\n");
        assert!(matches!(load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_hold_steps() {
        let profile = ProfileConfig::default();
        assert_eq!(profile.hold_steps(), 50);
        assert_eq!(profile.type_delay(), Duration::from_millis(30));
    }

    #[test]
    fn test_ring_geometry_from_config() {
        let ring = RingConfig::default();
        assert_eq!(ring.geometry(), RingGeometry::default());
        assert_eq!(ring.period(), Duration::from_secs(3));
        assert_eq!(ring.animation(), Duration::from_secs(8));
    }
}
