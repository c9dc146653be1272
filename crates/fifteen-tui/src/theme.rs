use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Tile border color
    pub border: Color,
    /// Color of a tile sitting on its home cell
    pub tile_home: Color,
    /// Color of a tile still out of place
    pub tile_away: Color,
    /// Fill color of the blank cell
    pub blank: Color,
    /// Message banner background
    pub message_bg: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 90, g: 95, b: 115 },
            tile_home: Color::Rgb { r: 90, g: 255, b: 130 },
            tile_away: Color::Rgb { r: 80, g: 180, b: 255 },
            blank: Color::Rgb { r: 45, g: 48, b: 60 },
            message_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 150, g: 150, b: 170 },
            tile_home: Color::Rgb { r: 40, g: 160, b: 60 },
            tile_away: Color::Rgb { r: 30, g: 100, b: 200 },
            blank: Color::Rgb { r: 225, g: 227, b: 237 },
            message_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            tile_home: Color::Green,
            tile_away: Color::Cyan,
            blank: Color::Rgb { r: 40, g: 40, b: 40 },
            message_bg: Color::Blue,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
