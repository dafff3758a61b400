#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Core,
    Plugin,
    Theme,
    Translation,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::Core,
        AssetCategory::Plugin,
        AssetCategory::Theme,
        AssetCategory::Translation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Plugin => "plugin",
            Self::Theme => "theme",
            Self::Translation => "translation",
        }
    }
}
