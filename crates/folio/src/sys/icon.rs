use crate::ring::IconName;
use freedesktop_icons::lookup;
use std::path::{Path, PathBuf};

pub fn find_icon_path(icon_name: &IconName, size: u16) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_str()).with_size(size).with_scale(1).find()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_missing_paths() {
        assert_eq!(find_icon_path(&IconName::new(""), 48), None);
        assert_eq!(
            find_icon_path(&IconName::new("/nonexistent/folio/icon.png"), 48),
            None
        );
    }

    #[test]
    fn test_absolute_path_is_used_directly() {
        let path = std::env::temp_dir().join(format!("folio-icon-{}.svg", std::process::id()));
        fs_err::write(&path, "<svg/>").unwrap();
        assert_eq!(
            find_icon_path(&IconName::new(path.to_string_lossy()), 48),
            Some(path.clone())
        );
        let _ = fs_err::remove_file(&path);
    }
}
