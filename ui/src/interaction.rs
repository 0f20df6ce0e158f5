//! Routing of clicks on the ad card to host-visible effects.

use payloads::AdDetails;
use yew::Callback;

use crate::view::WidgetView;

/// `window.open` target for click-through and buy-slot links.
pub const NEW_CONTEXT_TARGET: &str = "_blank";
/// `window.open` features for click-through and buy-slot links.
pub const NEW_CONTEXT_FEATURES: &str = "noopener,noreferrer";

/// Something the user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// The ad itself, outside any button.
    AdBody,
    BuySlot,
    Cta,
    Close,
    /// A caller-supplied action node, by index.
    CustomNode(usize),
}

impl Interaction {
    /// Clicks on buttons must not also count as a click on the ad.
    pub fn stops_propagation(self) -> bool {
        !matches!(self, Interaction::AdBody)
    }
}

/// What the widget does in response to an [`Interaction`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open the URL in a new browsing context.
    OpenUrl(String),
    AdClicked(AdDetails),
    BuySlotClicked(String),
    CtaClicked(AdDetails),
    Closed,
    /// Custom nodes only render on a loaded ad, so details are always known.
    CustomNodeClicked(usize, AdDetails),
}

/// Per-instance interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSession {
    visible: bool,
}

impl Default for WidgetSession {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl WidgetSession {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Work out the effects of `interaction` on the rendered `view`.
    ///
    /// Clicks on affordances the view does not show, clicks on any view
    /// other than a loaded ad, and any click once the widget has been
    /// closed, produce nothing.
    pub fn handle(
        &mut self,
        interaction: Interaction,
        view: &WidgetView,
    ) -> Vec<Effect> {
        if !self.visible {
            return Vec::new();
        }
        let Some(view) = view.loaded() else {
            return Vec::new();
        };
        let details = &view.details;

        match interaction {
            Interaction::AdBody => {
                click_through(details, Effect::AdClicked(details.clone()))
            }
            Interaction::Cta if view.actions.has_cta() => {
                click_through(details, Effect::CtaClicked(details.clone()))
            }
            Interaction::BuySlot if view.actions.has_buy_slot() => {
                let mut effects = Vec::with_capacity(2);
                if !details.buy_slot_url.is_empty() {
                    effects.push(Effect::OpenUrl(details.buy_slot_url.clone()));
                }
                effects.push(Effect::BuySlotClicked(details.buy_slot_url.clone()));
                effects
            }
            Interaction::Close if view.show_close => {
                self.visible = false;
                tracing::debug!("ad widget closed");
                vec![Effect::Closed]
            }
            Interaction::CustomNode(index)
                if index < view.actions.custom_count() =>
            {
                vec![Effect::CustomNodeClicked(index, details.clone())]
            }
            _ => Vec::new(),
        }
    }
}

fn click_through(details: &AdDetails, notify: Effect) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    if !details.url.is_empty() {
        effects.push(Effect::OpenUrl(details.url.clone()));
    }
    effects.push(notify);
    effects
}

/// The host's callbacks, as handed to the widget.
///
/// `E` is the click event passed along to custom-node callbacks.
pub struct HostCallbacks<E> {
    pub on_close: Option<Callback<()>>,
    pub on_ad_click: Option<Callback<AdDetails>>,
    pub on_buy_slot_click: Option<Callback<String>>,
    /// Falls back to `on_ad_click` when unset.
    pub on_cta_button_click: Option<Callback<AdDetails>>,
    pub on_cta_node_click: Option<Callback<(usize, E, AdDetails)>>,
}

impl<E> Default for HostCallbacks<E> {
    fn default() -> Self {
        Self {
            on_close: None,
            on_ad_click: None,
            on_buy_slot_click: None,
            on_cta_button_click: None,
            on_cta_node_click: None,
        }
    }
}

impl<E> Clone for HostCallbacks<E> {
    fn clone(&self) -> Self {
        Self {
            on_close: self.on_close.clone(),
            on_ad_click: self.on_ad_click.clone(),
            on_buy_slot_click: self.on_buy_slot_click.clone(),
            on_cta_button_click: self.on_cta_button_click.clone(),
            on_cta_node_click: self.on_cta_node_click.clone(),
        }
    }
}

impl<E: Clone> HostCallbacks<E> {
    /// Carry out `effects` for a click described by `event`, passing URLs
    /// to `open`.
    ///
    /// Returns true when the widget was closed and has to be re-rendered.
    pub fn dispatch(
        &self,
        effects: Vec<Effect>,
        event: &E,
        mut open: impl FnMut(&str),
    ) -> bool {
        let mut closed = false;
        for effect in effects {
            match effect {
                Effect::OpenUrl(url) => open(&url),
                Effect::AdClicked(details) => {
                    if let Some(on_ad_click) = &self.on_ad_click {
                        on_ad_click.emit(details);
                    }
                }
                Effect::CtaClicked(details) => {
                    if let Some(callback) = self
                        .on_cta_button_click
                        .as_ref()
                        .or(self.on_ad_click.as_ref())
                    {
                        callback.emit(details);
                    }
                }
                Effect::BuySlotClicked(url) => {
                    if let Some(on_buy_slot_click) = &self.on_buy_slot_click {
                        on_buy_slot_click.emit(url);
                    }
                }
                Effect::Closed => {
                    closed = true;
                    if let Some(on_close) = &self.on_close {
                        on_close.emit(());
                    }
                }
                Effect::CustomNodeClicked(index, details) => {
                    if let Some(on_cta_node_click) = &self.on_cta_node_click {
                        on_cta_node_click.emit((index, event.clone(), details));
                    }
                }
            }
        }
        closed
    }
}
