//! Process-wide service settings.

use std::path::PathBuf;

use gridway_core::Color;

use crate::bitmap::Palette;

/// Default colour for cells on a rendered path.
pub const DEFAULT_PATH_COLOR: Color = Color(0xEA6769);

/// Settings consulted by [`crate::MapService`].
///
/// Colours are used only for rendering and bitmap import. `allow_corner`
/// is the default for [`crate::MapService::find_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServiceConfig {
    pub wall_color: Color,
    pub road_color: Color,
    pub path_color: Color,
    /// Where auto-rendered bitmaps go. `None` means next to the executable.
    pub output_dir: Option<PathBuf>,
    /// Render `<output_dir>/<map id>.bmp` after every successful search.
    pub auto_render: bool,
    pub allow_corner: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            wall_color: Color::BLACK,
            road_color: Color::WHITE,
            path_color: DEFAULT_PATH_COLOR,
            output_dir: None,
            auto_render: false,
            allow_corner: true,
        }
    }
}

impl ServiceConfig {
    pub fn palette(&self) -> Palette {
        Palette {
            wall: self.wall_color,
            road: self.road_color,
            path: self.path_color,
        }
    }

    /// Directory auto-rendered bitmaps are written to.
    ///
    /// Falls back to the executable's directory, then to the working
    /// directory when that cannot be determined.
    pub fn render_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
