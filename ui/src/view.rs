//! Which view the widget shows, as plain data.
//!
//! The Yew component renders whatever [`WidgetView::select`] returns; keeping
//! the decision here lets it be tested without a browser.

use payloads::AdDetails;

use crate::dimension::Dimension;
use crate::fetch::AdDetailsState;
use crate::position::Position;

/// Width below which the built-in buttons drop their text labels.
pub const DEFAULT_SMALL_WIDTH_THRESHOLD: f64 = 270.0;

/// Host configuration that affects what is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub show_close_button: bool,
    pub show_buy_slot_button: bool,
    pub show_cta_button: bool,
    pub show_ad_label: bool,
    pub cta_button_text: String,
    pub buy_slot_button_text: String,
    pub position: Position,
    /// Number of caller-supplied action nodes. When non-zero they replace
    /// the built-in buttons.
    pub custom_node_count: usize,
    /// Shown instead of the ad image while a slot has no buyer.
    pub default_image: Option<String>,
    pub small_width_threshold: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            show_close_button: false,
            show_buy_slot_button: false,
            show_cta_button: false,
            show_ad_label: false,
            cta_button_text: "Learn More".to_string(),
            buy_slot_button_text: "Buy Slot".to_string(),
            position: Position::default(),
            custom_node_count: 0,
            default_image: None,
            small_width_threshold: DEFAULT_SMALL_WIDTH_THRESHOLD,
        }
    }
}

/// The action buttons laid over the ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSet {
    None,
    BuiltIn { buy_slot: bool, cta: bool },
    Custom { count: usize },
}

impl ActionSet {
    fn from_config(config: &WidgetConfig) -> Self {
        if config.custom_node_count > 0 {
            ActionSet::Custom {
                count: config.custom_node_count,
            }
        } else if config.show_buy_slot_button || config.show_cta_button {
            ActionSet::BuiltIn {
                buy_slot: config.show_buy_slot_button,
                cta: config.show_cta_button,
            }
        } else {
            ActionSet::None
        }
    }

    pub fn has_buy_slot(self) -> bool {
        matches!(self, ActionSet::BuiltIn { buy_slot: true, .. })
    }

    pub fn has_cta(self) -> bool {
        matches!(self, ActionSet::BuiltIn { cta: true, .. })
    }

    pub fn custom_count(self) -> usize {
        match self {
            ActionSet::Custom { count } => count,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedView {
    pub details: AdDetails,
    pub image: String,
    pub show_close: bool,
    pub show_ad_label: bool,
    pub actions: ActionSet,
    /// False when the widget is too narrow for button text.
    pub show_labels: bool,
    pub position: Position,
}

impl LoadedView {
    /// Whether the image can be drawn, given the last source the preload
    /// reported as loaded.
    pub fn image_ready(&self, loaded_src: Option<&str>) -> bool {
        loaded_src == Some(self.image.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    /// Dismissed by the user.
    Hidden,
    Error,
    /// Loading, or nothing to show yet.
    Placeholder,
    Loaded(LoadedView),
}

impl WidgetView {
    /// Pick the view for the current state.
    ///
    /// `rendered_width` is the measured container width; `None` before the
    /// first measurement, which counts as narrow.
    pub fn select(
        state: &AdDetailsState,
        visible: bool,
        config: &WidgetConfig,
        rendered_width: Option<f64>,
    ) -> Self {
        if !visible {
            return WidgetView::Hidden;
        }
        if state.error.is_some() {
            return WidgetView::Error;
        }
        let details = match &state.details {
            Some(details) if !state.loading => details,
            _ => return WidgetView::Placeholder,
        };

        WidgetView::Loaded(LoadedView {
            details: details.clone(),
            image: details
                .display_image(config.default_image.as_deref())
                .to_string(),
            show_close: config.show_close_button,
            show_ad_label: config.show_ad_label,
            actions: ActionSet::from_config(config),
            show_labels: rendered_width
                .is_some_and(|width| width >= config.small_width_threshold),
            position: config.position,
        })
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            WidgetView::Hidden => ViewKind::Hidden,
            WidgetView::Error => ViewKind::Error,
            WidgetView::Placeholder => ViewKind::Placeholder,
            WidgetView::Loaded(_) => ViewKind::Loaded,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedView> {
        match self {
            WidgetView::Loaded(view) => Some(view),
            _ => None,
        }
    }
}

/// [`WidgetView`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Hidden,
    Error,
    Placeholder,
    Loaded,
}
