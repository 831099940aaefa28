use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Panel border color
    pub border: Color,
    /// Lit (live) tile color
    pub lit: Color,
    /// Unlit tile color
    pub unlit: Color,
    /// Selected cell background
    pub cursor_bg: Color,
    /// Completed-wire / success color
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
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 12, g: 14, b: 18 },
            fg: Color::Rgb { r: 205, g: 214, b: 222 },
            border: Color::Rgb { r: 70, g: 80, b: 95 },
            lit: Color::Rgb { r: 255, g: 200, b: 40 },
            unlit: Color::Rgb { r: 90, g: 100, b: 115 },
            cursor_bg: Color::Rgb { r: 45, g: 70, b: 110 },
            success: Color::Rgb { r: 80, g: 220, b: 120 },
            info: Color::Rgb { r: 130, g: 170, b: 220 },
            key: Color::Rgb { r: 160, g: 140, b: 220 },
        }
    }
}
