use std::fmt;

/// A width or height for the widget container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    /// Pixels.
    Px(u32),
    /// Any CSS length, e.g. `"50%"` or `"auto"`.
    Css(String),
}

impl Dimension {
    pub fn css(&self) -> String {
        match self {
            Dimension::Px(px) => format!("{px}px"),
            Dimension::Css(value) => value.clone(),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Css(value) if value.trim() == "auto")
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self {
        Dimension::Px(px)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::Css(value.to_string())
    }
}

impl From<String> for Dimension {
    fn from(value: String) -> Self {
        Dimension::Css(value)
    }
}

/// Inline CSS sizing the container. Without a fixed height the card keeps a
/// 3:2 aspect ratio.
pub fn size_css(width: Option<&Dimension>, height: Option<&Dimension>) -> String {
    let width = width.map_or_else(|| "100%".to_string(), Dimension::css);
    match height {
        Some(height) if !height.is_auto() => {
            format!("width: {width}; height: {};", height.css())
        }
        _ => format!("width: {width}; height: auto; aspect-ratio: 3 / 2;"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_and_strings() {
        assert_eq!(Dimension::from(400u32).css(), "400px");
        assert_eq!(Dimension::from("50%").css(), "50%");
    }

    #[test]
    fn fixed_size() {
        let css = size_css(Some(&Dimension::Px(400)), Some(&Dimension::Px(200)));
        assert_eq!(css, "width: 400px; height: 200px;");
    }

    #[test]
    fn auto_height_keeps_aspect_ratio() {
        let css = size_css(Some(&"50%".into()), Some(&"auto".into()));
        assert!(css.starts_with("width: 50%; height: auto;"));
        assert!(css.contains("aspect-ratio: 3 / 2"));
        assert!(size_css(None, None).starts_with("width: 100%;"));
    }
}
