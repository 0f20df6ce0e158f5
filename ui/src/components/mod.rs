pub mod ad_widget;
pub mod cta_button;
pub mod icons;

pub use ad_widget::{AdWidget, AdWidgetProps};
pub use cta_button::CtaButton;
