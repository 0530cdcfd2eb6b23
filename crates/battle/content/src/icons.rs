//! Talent icon resolution.
//!
//! A talent names an icon file relative to an asset root. When the file is
//! missing (or no root is configured) the talent is shown as a solid swatch in
//! its rarity color.

use std::path::{Path, PathBuf};

use battle_core::{Color, TalentInfo};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Icon {
    Image(PathBuf),
    Placeholder(Color),
}

impl Icon {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Icon::Placeholder(_))
    }
}

/// Maps talent icons onto files under an asset root.
#[derive(Clone, Debug, Default)]
pub struct IconResolver {
    root: Option<PathBuf>,
}

impl IconResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Resolver that always yields placeholders.
    pub fn placeholders() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn resolve(&self, info: &TalentInfo) -> Icon {
        let placeholder = Icon::Placeholder(info.rarity.color());
        let (Some(root), Some(file)) = (self.root.as_deref(), info.icon) else {
            return placeholder;
        };
        let path = root.join(file);
        if path.is_file() {
            Icon::Image(path)
        } else {
            debug!(
                target: "content::icons",
                talent = info.name,
                path = %path.display(),
                "icon missing, using rarity placeholder"
            );
            placeholder
        }
    }
}

#[cfg(test)]
mod tests {
    use battle_core::Rarity;

    use super::*;

    const INFO: TalentInfo =
        TalentInfo::new("test", "Test talent", Rarity::Legendary).with_icon("test.png");

    #[test]
    fn existing_file_resolves_to_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.png"), b"png").unwrap();
        let icon = IconResolver::new(dir.path()).resolve(&INFO);
        assert_eq!(icon, Icon::Image(dir.path().join("test.png")));
    }

    #[test]
    fn missing_file_falls_back_to_rarity_color() {
        let dir = tempfile::tempdir().unwrap();
        let icon = IconResolver::new(dir.path()).resolve(&INFO);
        assert_eq!(icon, Icon::Placeholder(Color::rgb(255, 165, 0)));
    }

    #[test]
    fn no_root_means_placeholder() {
        let info = TalentInfo::new("plain", "No icon", Rarity::Common);
        assert!(IconResolver::placeholders().resolve(&info).is_placeholder());
        assert!(IconResolver::placeholders().resolve(&INFO).is_placeholder());
    }
}
