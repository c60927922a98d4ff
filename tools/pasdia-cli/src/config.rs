//! Rendering options and their defaults.

use clap::ValueEnum;

pub const DEFAULT_DOC_CLASS: &str = "standalone";
pub const DEFAULT_DEP_OPTION: &str = "theme=simple";
pub const DEFAULT_DEPTEXT_OPTION: &str = "column sep=1em";

/// Desktop platform families with a known Japanese font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub const fn default_font(self) -> &'static str {
        match self {
            Platform::Windows => "Noto Sans Japanese Regular",
            Platform::MacOs => "Hiragino Kaku Gothic Pro W3",
            Platform::Linux | Platform::Other => "IPAPGothic",
        }
    }
}

/// Which cells make up the deptext row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RowSource {
    /// Every segment; backbone columns line up with segment ids.
    #[default]
    Segments,
    /// Only segments carrying an ID or predicate annotation.
    Predicates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub doc_class: String,
    pub font: String,
    pub dep_option: String,
    pub deptext_option: String,
    pub row: RowSource,
}

impl RenderConfig {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            doc_class: DEFAULT_DOC_CLASS.to_string(),
            font: platform.default_font().to_string(),
            dep_option: DEFAULT_DEP_OPTION.to_string(),
            deptext_option: DEFAULT_DEPTEXT_OPTION.to_string(),
            row: RowSource::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_table() {
        assert_eq!(Platform::Windows.default_font(), "Noto Sans Japanese Regular");
        assert_eq!(Platform::MacOs.default_font(), "Hiragino Kaku Gothic Pro W3");
        assert_eq!(Platform::Linux.default_font(), "IPAPGothic");
        assert_eq!(Platform::Other.default_font(), Platform::Linux.default_font());
    }

    #[test]
    fn test_current_platform_in_table() {
        let expected = if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        };
        assert_eq!(Platform::current(), expected);
    }

    #[test]
    fn test_defaults() {
        let config = RenderConfig::for_platform(Platform::Linux);
        assert_eq!(config.doc_class, "standalone");
        assert_eq!(config.font, "IPAPGothic");
        assert_eq!(config.dep_option, "theme=simple");
        assert_eq!(config.deptext_option, "column sep=1em");
        assert_eq!(config.row, RowSource::Segments);
    }
}
