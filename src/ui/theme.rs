use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    /// CPU line, CPU bar and CPU gauge fill.
    pub cpu_accent: Color,
    /// Memory bar and memory gauge fill.
    pub mem_accent: Color,
    /// Unfilled gauge segment and bar track.
    pub gauge_track: Color,
    pub axis: Color,
    pub selection_bg: Color,
    pub kill_button: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            header_accent_bg: Color::Rgb(79, 195, 247),
            header_accent_fg: Color::Rgb(17, 24, 39),
            status_ok: Color::Rgb(129, 199, 132),
            status_err: Color::Rgb(239, 83, 80),
            statusbar_bg: Color::Rgb(24, 26, 32),
            overlay_border: Color::Rgb(51, 51, 51),
            text_primary: Color::Rgb(255, 255, 255),
            text_secondary: Color::Rgb(170, 170, 170),
            pill_key_bg: Color::Rgb(79, 195, 247),
            pill_key_fg: Color::Rgb(17, 24, 39),
            pill_desc_fg: Color::Rgb(220, 220, 220),
            surface_bg: Color::Rgb(30, 33, 40),
            cpu_accent: Color::Rgb(79, 195, 247),
            mem_accent: Color::Rgb(129, 212, 250),
            gauge_track: Color::Rgb(44, 62, 80),
            axis: Color::Rgb(170, 170, 170),
            selection_bg: Color::Rgb(44, 62, 80),
            kill_button: Color::Rgb(239, 83, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            header_accent_bg: Color::Rgb(2, 136, 209),
            header_accent_fg: Color::Rgb(255, 255, 255),
            status_ok: Color::Rgb(46, 125, 50),
            status_err: Color::Rgb(198, 40, 40),
            statusbar_bg: Color::Rgb(236, 239, 241),
            overlay_border: Color::Rgb(176, 190, 197),
            text_primary: Color::Rgb(33, 33, 33),
            text_secondary: Color::Rgb(97, 97, 97),
            pill_key_bg: Color::Rgb(2, 136, 209),
            pill_key_fg: Color::Rgb(255, 255, 255),
            pill_desc_fg: Color::Rgb(55, 71, 79),
            surface_bg: Color::Rgb(250, 250, 250),
            cpu_accent: Color::Rgb(2, 136, 209),
            mem_accent: Color::Rgb(3, 155, 229),
            gauge_track: Color::Rgb(207, 216, 220),
            axis: Color::Rgb(97, 97, 97),
            selection_bg: Color::Rgb(207, 216, 220),
            kill_button: Color::Rgb(198, 40, 40),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
