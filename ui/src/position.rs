use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance between the action buttons and the edge of the ad.
const INSET: &str = "12px";

/// Where the action buttons sit on top of the ad image.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 8] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::CenterLeft,
        Position::CenterRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::CenterLeft => "center-left",
            Position::CenterRight => "center-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }

    /// Inline CSS placing an absolutely positioned element.
    pub fn css(self) -> String {
        let placement = match self {
            Position::TopLeft => format!("top: {INSET}; left: {INSET};"),
            Position::TopCenter => format!(
                "top: {INSET}; left: 50%; transform: translateX(-50%);"
            ),
            Position::TopRight => format!("top: {INSET}; right: {INSET};"),
            Position::CenterLeft => format!(
                "top: 50%; left: {INSET}; transform: translateY(-50%);"
            ),
            Position::CenterRight => format!(
                "top: 50%; right: {INSET}; transform: translateY(-50%);"
            ),
            Position::BottomLeft => format!("bottom: {INSET}; left: {INSET};"),
            Position::BottomCenter => format!(
                "bottom: {INSET}; left: 50%; transform: translateX(-50%);"
            ),
            Position::BottomRight => {
                format!("bottom: {INSET}; right: {INSET};")
            }
        };
        format!("position: absolute; {placement}")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position `{0}`")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_bottom_right() {
        let css = Position::default().css();
        assert!(css.contains("position: absolute"));
        assert!(css.contains("bottom: 12px"));
        assert!(css.contains("right: 12px"));
    }

    #[test]
    fn top_left_css() {
        let css = Position::TopLeft.css();
        assert!(css.contains("top: 12px"));
        assert!(css.contains("left: 12px"));
    }

    #[test]
    fn parses_every_name() {
        for position in Position::ALL {
            assert_eq!(position.to_string().parse(), Ok(position));
        }
        assert_eq!(
            "middle".parse::<Position>(),
            Err(UnknownPosition("middle".into()))
        );
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Position::CenterRight).unwrap();
        assert_eq!(json, r#""center-right""#);
    }
}
