use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub text_base_height: i64,
    pub text_line_height: i64,
    pub text_char_width: i64,
    pub default_text_width: i64,
    pub default_file_width: i64,
    pub default_file_height: i64,
    pub default_group_width: i64,
    pub default_group_height: i64,
    pub group_padding: i64,
    /// Space reserved above the top-most member for the group label.
    pub group_header_height: i64,
    pub group_bottom_buffer: i64,
    /// Extra band below the header that still counts as a header collision.
    pub group_header_overlap_buffer: i64,
    pub group_header_push_gap: i64,
    pub group_gap_between: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_base_height: 50,
            text_line_height: 25,
            text_char_width: 6,
            default_text_width: 250,
            default_file_width: 400,
            default_file_height: 400,
            default_group_width: 200,
            default_group_height: 200,
            group_padding: 30,
            group_header_height: 60,
            group_bottom_buffer: 20,
            group_header_overlap_buffer: 40,
            group_header_push_gap: 60,
            group_gap_between: 60,
        }
    }
}

impl LayoutConfig {
    pub fn header_probe_height(&self) -> i64 {
        self.group_header_height + self.group_header_overlap_buffer
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config: LayoutConfig = serde_json::from_str(&contents)?;
    log::debug!("loaded layout config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.header_probe_height(), 100);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"group_padding": 10, "text_char_width": 8}}"#).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.group_padding, 10);
        assert_eq!(config.text_char_width, 8);
        assert_eq!(config.group_header_height, 60);
        assert_eq!(config.default_text_width, 250);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
