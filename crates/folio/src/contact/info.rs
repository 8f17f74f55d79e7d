use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Email,
    Location,
    Phone,
}

impl DetailKind {
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Email => "mail-unread-symbolic",
            Self::Location => "mark-location-symbolic",
            Self::Phone => "call-start-symbolic",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    #[strum(serialize = "LinkedIn")]
    LinkedIn,
    #[strum(serialize = "GitHub")]
    GitHub,
    #[strum(serialize = "Twitter", serialize = "x")]
    Twitter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    pub kind: DetailKind,
    pub value: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl ContactDetail {
    pub fn new(kind: DetailKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            link: None,
        }
    }

    /// Explicit link, or one derived from the value where the kind allows it.
    pub fn href(&self) -> Option<String> {
        self.link.clone().or_else(|| match self.kind {
            DetailKind::Email => Some(format!("mailto:{}", self.value)),
            DetailKind::Phone => Some(format!("tel:{}", self.value.replace(' ', ""))),
            DetailKind::Location => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub details: Vec<ContactDetail>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            details: vec![
                ContactDetail::new(DetailKind::Email, "Jawadalisoomro46@gmail.com"),
                ContactDetail::new(DetailKind::Location, "Islamabad, Pakistan"),
            ],
            socials: vec![
                SocialLink {
                    kind: SocialKind::LinkedIn,
                    url: "https://linkedin.com/in/dev-jawad".to_string(),
                },
                SocialLink {
                    kind: SocialKind::GitHub,
                    url: "https://github.com/jawad8082".to_string(),
                },
                SocialLink {
                    kind: SocialKind::Twitter,
                    url: "https://twitter.com/".to_string(),
                },
            ],
        }
    }
}
