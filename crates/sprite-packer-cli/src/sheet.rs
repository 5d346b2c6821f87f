use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sprite_packer_core::PackerConfig;

/// One spritesheet: a directory of icons turned into a PNG, a stylesheet and
/// an HTML preview page. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Directory scanned (non-recursively) for .png/.jpg/.gif files.
    pub directory: PathBuf,
    /// Prepended to every CSS class name.
    #[serde(default)]
    pub icon_name_prefix: String,
    /// Appended to every CSS class name.
    #[serde(default)]
    pub icon_name_suffix: String,
    pub sprite_image_file: PathBuf,
    pub sprite_css_file: PathBuf,
    /// Preview page path. Defaults to the stylesheet path with an `.html` extension.
    #[serde(default)]
    pub html_file: Option<PathBuf>,
    /// Resize every icon to `sprite_size x sprite_size` before packing. 0 keeps the source size.
    #[serde(default)]
    pub sprite_size: u32,
    #[serde(default)]
    pub packer: PackerConfig,
}

impl SheetConfig {
    pub fn html_path(&self) -> PathBuf {
        self.html_file
            .clone()
            .unwrap_or_else(|| self.sprite_css_file.with_extension("html"))
    }

    /// CSS class for an icon whose file stem is `stem`.
    pub fn class_name(&self, stem: &str) -> String {
        format!(
            "{}{}{}",
            self.icon_name_prefix,
            slug(stem),
            self.icon_name_suffix
        )
    }

    /// Short label used as the log prefix for this sheet.
    pub fn label(&self) -> String {
        self.directory.to_string_lossy().replace('\\', "/")
    }
}

/// Top-level YAML document: `sheets: [ ... ]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsFile {
    #[serde(default)]
    pub sheets: Vec<SheetConfig>,
}

impl SheetsFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let file: SheetsFile = serde_yaml::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        if file.sheets.is_empty() {
            anyhow::bail!("no sheets configured in {}", path.display());
        }
        Ok(file)
    }
}

/// Lowercases `s` and collapses every run of characters outside `[a-z0-9]`
/// into a single `-`, trimming dashes at both ends.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(slug("Sword of  Doom"), "sword-of-doom");
        assert_eq!(slug("__Potion (Red)__"), "potion-red");
        assert_eq!(slug("inv_misc_01"), "inv-misc-01");
        assert_eq!(slug("Épée"), "p-e");
        assert_eq!(slug("---"), "");
    }

    #[test]
    fn yaml_defaults() {
        let yaml = r#"
sheets:
  - directory: ./assets/spell_icons
    icon_name_prefix: spell-
    icon_name_suffix: "-20"
    sprite_image_file: ./assets/sprites/spell-icons-20.png
    sprite_css_file: ./assets/sprites/spell-icons-20.css
    sprite_size: 20
  - directory: ./assets/objects
    sprite_image_file: ./assets/sprites/objects.png
    sprite_css_file: ./assets/sprites/objects.css
    packer:
      min_width: 64
"#;
        let file: SheetsFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.sheets.len(), 2);
        let spells = &file.sheets[0];
        assert_eq!(spells.sprite_size, 20);
        assert_eq!(spells.class_name("Fire Ball"), "spell-fire-ball-20");
        assert_eq!(
            spells.html_path(),
            PathBuf::from("./assets/sprites/spell-icons-20.html")
        );
        let objects = &file.sheets[1];
        assert_eq!(objects.sprite_size, 0);
        assert_eq!(objects.icon_name_prefix, "");
        assert_eq!(objects.packer.min_width, 64);
        assert_eq!(objects.packer.min_height, 0);
    }
}
