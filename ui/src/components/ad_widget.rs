use payloads::AdDetails;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ResizeObserver, ResizeObserverEntry};
use yew::prelude::*;

use super::cta_button::CtaButton;
use super::icons;
use crate::dimension::{Dimension, size_css};
use crate::hooks::use_ad_details;
use crate::interaction::{
    HostCallbacks, Interaction, NEW_CONTEXT_FEATURES, NEW_CONTEXT_TARGET,
    WidgetSession,
};
use crate::position::Position;
use crate::view::{
    ActionSet, DEFAULT_SMALL_WIDTH_THRESHOLD, LoadedView, WidgetConfig,
    WidgetView,
};

const FONT: &str = "font-family: system-ui, -apple-system, sans-serif;";

const KEYFRAMES: &str = "\
@keyframes adsterix-shimmer { from { transform: translateX(-100%); } to { transform: translateX(100%); } } \
@keyframes adsterix-fade-in { from { opacity: 0; } to { opacity: 1; } }";

const ERROR_STYLE: &str = "display: flex; align-items: center; \
    justify-content: center; padding: 16px; border-radius: 12px; \
    background: linear-gradient(135deg, #0f172a 0%, #1e293b 100%); \
    color: #f87171; font-size: 14px; font-weight: 500;";

const PLACEHOLDER_STYLE: &str = "position: relative; border-radius: 12px; \
    background: linear-gradient(135deg, #0f172a 0%, #1e293b 100%); \
    overflow: hidden;";

const SHIMMER_STYLE: &str = "position: absolute; inset: 0; \
    background: linear-gradient(90deg, transparent 0%, \
    rgba(255,255,255,0.05) 50%, transparent 100%); \
    animation: adsterix-shimmer 1.5s linear infinite;";

const LOADED_STYLE: &str = "position: relative; border-radius: 12px; \
    overflow: hidden; cursor: pointer; \
    box-shadow: 0 10px 30px rgba(0,0,0,0.2); \
    animation: adsterix-fade-in 0.3s ease-out;";

const IMAGE_STYLE: &str = "position: absolute; inset: 0; width: 100%; \
    height: 100%; object-fit: cover; animation: adsterix-fade-in 0.4s ease-out;";

const OVERLAY_STYLE: &str = "position: absolute; inset: 0; \
    background: linear-gradient(to top, rgba(0,0,0,0.3) 0%, transparent 50%); \
    pointer-events: none;";

const CLOSE_STYLE: &str = "position: absolute; top: 10px; right: 10px; \
    display: flex; align-items: center; justify-content: center; \
    width: 28px; height: 28px; border-radius: 50%; \
    background: rgba(0,0,0,0.5); backdrop-filter: blur(8px); \
    color: rgba(255,255,255,0.8); cursor: pointer;";

const AD_LABEL_STYLE: &str = "position: absolute; top: 10px; left: 10px; \
    display: flex; align-items: center; gap: 4px; padding: 4px 8px; \
    border-radius: 6px; background: rgba(0,0,0,0.5); \
    backdrop-filter: blur(8px); color: rgba(255,255,255,0.8); \
    font-size: 10px; font-weight: 500; letter-spacing: 0.5px; \
    text-transform: uppercase;";

#[derive(Properties, PartialEq)]
pub struct AdWidgetProps {
    /// Cast hash of the ad slot. Blank values show the empty placeholder.
    #[prop_or_default]
    pub identifier: AttrValue,
    #[prop_or_default]
    pub width: Option<Dimension>,
    #[prop_or_default]
    pub height: Option<Dimension>,
    #[prop_or(false)]
    pub show_close_button: bool,
    #[prop_or(false)]
    pub show_buy_slot_button: bool,
    #[prop_or(false)]
    pub show_cta_button: bool,
    /// Show the "Ad" disclosure label.
    #[prop_or(false)]
    pub show_ad_label: bool,
    #[prop_or_else(|| AttrValue::from("Learn More"))]
    pub cta_button_text: AttrValue,
    /// Replaces the default external-link icon.
    #[prop_or_default]
    pub cta_button_icon: Option<Html>,
    #[prop_or_else(|| AttrValue::from("Buy Slot"))]
    pub buy_slot_button_text: AttrValue,
    /// Caller-supplied action elements. When non-empty they replace the
    /// built-in buy-slot and CTA buttons entirely.
    #[prop_or_default]
    pub cta_nodes: Option<Vec<Html>>,
    #[prop_or_default]
    pub position: Position,
    /// Inline CSS appended to the container's style.
    #[prop_or_default]
    pub container_style: Option<AttrValue>,
    #[prop_or_default]
    pub buy_slot_button_style: Option<AttrValue>,
    #[prop_or_default]
    pub cta_button_style: Option<AttrValue>,
    /// Image shown instead of the ad while the slot has no buyer.
    #[prop_or_default]
    pub default_image: Option<AttrValue>,
    /// Overrides the ad service address.
    #[prop_or_default]
    pub api_base: Option<AttrValue>,
    #[prop_or(DEFAULT_SMALL_WIDTH_THRESHOLD)]
    pub small_width_threshold: f64,
    #[prop_or_default]
    pub on_close: Option<Callback<()>>,
    #[prop_or_default]
    pub on_ad_click: Option<Callback<AdDetails>>,
    #[prop_or_default]
    pub on_buy_slot_click: Option<Callback<String>>,
    /// Falls back to `on_ad_click` when unset.
    #[prop_or_default]
    pub on_cta_button_click: Option<Callback<AdDetails>>,
    /// Receives the node index, the click event and the current details.
    #[prop_or_default]
    pub on_cta_node_click: Option<Callback<(usize, MouseEvent, AdDetails)>>,
}

impl AdWidgetProps {
    pub fn config(&self) -> WidgetConfig {
        WidgetConfig {
            width: self.width.clone(),
            height: self.height.clone(),
            show_close_button: self.show_close_button,
            show_buy_slot_button: self.show_buy_slot_button,
            show_cta_button: self.show_cta_button,
            show_ad_label: self.show_ad_label,
            cta_button_text: self.cta_button_text.to_string(),
            buy_slot_button_text: self.buy_slot_button_text.to_string(),
            position: self.position,
            custom_node_count: self.cta_nodes.as_ref().map_or(0, Vec::len),
            default_image: self.default_image.as_ref().map(|i| i.to_string()),
            small_width_threshold: self.small_width_threshold,
        }
    }

    fn callbacks(&self) -> HostCallbacks<MouseEvent> {
        HostCallbacks {
            on_close: self.on_close.clone(),
            on_ad_click: self.on_ad_click.clone(),
            on_buy_slot_click: self.on_buy_slot_click.clone(),
            on_cta_button_click: self.on_cta_button_click.clone(),
            on_cta_node_click: self.on_cta_node_click.clone(),
        }
    }
}

/// Everything a click handler needs, shared between the handlers of one
/// render.
struct InteractionContext {
    session: Rc<RefCell<WidgetSession>>,
    view: WidgetView,
    callbacks: HostCallbacks<MouseEvent>,
    force_update: UseForceUpdateHandle,
}

impl InteractionContext {
    fn callback(self: &Rc<Self>, interaction: Interaction) -> Callback<MouseEvent> {
        let ctx = self.clone();
        Callback::from(move |e: MouseEvent| ctx.handle(interaction, e))
    }

    fn handle(&self, interaction: Interaction, e: MouseEvent) {
        if interaction.stops_propagation() {
            e.stop_propagation();
        }
        let effects = self.session.borrow_mut().handle(interaction, &self.view);
        if self.callbacks.dispatch(effects, &e, open_in_new_context) {
            self.force_update.force_update();
        }
    }
}

fn open_in_new_context(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target_and_features(
        url,
        NEW_CONTEXT_TARGET,
        NEW_CONTEXT_FEATURES,
    ) {
        tracing::warn!("Failed to open {url}: {e:?}");
    }
}

type WidthObserver = (ResizeObserver, Closure<dyn FnMut(js_sys::Array)>);

/// Track the rendered width of the container so labels can collapse on
/// narrow widgets.
fn observe_width(
    container_ref: &NodeRef,
    rendered_width: UseStateHandle<Option<f64>>,
) -> Option<WidthObserver> {
    let element = container_ref.cast::<HtmlElement>()?;
    rendered_width.set(Some(f64::from(element.offset_width())));

    let closure = Closure::<dyn FnMut(js_sys::Array)>::new(
        move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let entry: ResizeObserverEntry = entry.unchecked_into();
                rendered_width.set(Some(entry.content_rect().width()));
            }
        },
    );
    let observer = ResizeObserver::new(closure.as_ref().unchecked_ref()).ok()?;
    observer.observe(&element);
    Some((observer, closure))
}

/// Embeddable ad card for the slot keyed by `identifier`.
#[function_component]
pub fn AdWidget(props: &AdWidgetProps) -> Html {
    let instance = use_memo((), |_| Uuid::new_v4());
    let ad = use_ad_details(props.identifier.clone(), props.api_base.clone());
    let session = use_mut_ref(WidgetSession::default);
    let force_update = use_force_update();
    let rendered_width = use_state_eq(|| None::<f64>);
    let loaded_image = use_state_eq(|| None::<String>);
    let container_ref = use_node_ref();

    let config = props.config();
    let visible = session.borrow().is_visible();
    let view = WidgetView::select(&ad.state, visible, &config, *rendered_width);

    // The container element changes with the view, so re-attach the observer
    {
        let container_ref = container_ref.clone();
        let rendered_width = rendered_width.clone();
        let instance = *instance;
        use_effect_with(view.kind(), move |kind| {
            tracing::debug!(%instance, ?kind, "ad widget view changed");
            let observer = observe_width(&container_ref, rendered_width);
            move || {
                if let Some((observer, _closure)) = observer {
                    observer.disconnect();
                }
            }
        });
    }

    let size = size_css(config.width.as_ref(), config.height.as_ref());
    let container_style = props.container_style.as_deref().unwrap_or_default();

    match &view {
        WidgetView::Hidden => html! {},
        WidgetView::Error => html! {
            <div class="adsterix-widget adsterix-error" style={format!("{ERROR_STYLE} {FONT}")}>
                {"Unable to load ad"}
            </div>
        },
        WidgetView::Placeholder => html! {
            <div
                ref={container_ref}
                class="adsterix-widget adsterix-placeholder"
                style={format!("{PLACEHOLDER_STYLE} {size} {container_style}")}
            >
                <style>{KEYFRAMES}</style>
                <div style={SHIMMER_STYLE} />
            </div>
        },
        WidgetView::Loaded(loaded) => {
            let ctx = Rc::new(InteractionContext {
                session: session.clone(),
                view: view.clone(),
                callbacks: props.callbacks(),
                force_update,
            });
            let on_image_load = {
                let loaded_image = loaded_image.clone();
                let src = loaded.image.clone();
                Callback::from(move |_: Event| loaded_image.set(Some(src.clone())))
            };

            html! {
                <div
                    ref={container_ref}
                    class="adsterix-widget"
                    style={format!("{LOADED_STYLE} {size} {container_style}")}
                    onclick={ctx.callback(Interaction::AdBody)}
                >
                    <style>{KEYFRAMES}</style>
                    if loaded.image_ready(loaded_image.as_deref()) {
                        <img src={loaded.image.clone()} alt="Advertisement" style={IMAGE_STYLE} />
                    }
                    <img src={loaded.image.clone()} alt="" onload={on_image_load} style="display: none;" />
                    <div style={OVERLAY_STYLE} />

                    if loaded.show_close {
                        <div
                            class="adsterix-close"
                            role="button"
                            aria-label="Close ad"
                            style={CLOSE_STYLE}
                            onclick={ctx.callback(Interaction::Close)}
                        >
                            {icons::close(14)}
                        </div>
                    }

                    if loaded.show_ad_label {
                        <div class="adsterix-ad-label" style={format!("{AD_LABEL_STYLE} {FONT}")}>
                            {icons::sparkles(10)}
                            {"Ad"}
                        </div>
                    }

                    {render_actions(props, loaded, &ctx)}
                </div>
            }
        }
    }
}

fn render_actions(
    props: &AdWidgetProps,
    loaded: &LoadedView,
    ctx: &Rc<InteractionContext>,
) -> Html {
    let style = format!("{} display: flex; gap: 8px;", loaded.position.css());

    match loaded.actions {
        ActionSet::None => html! {},
        ActionSet::BuiltIn { buy_slot, cta } => {
            let cta_icon = props
                .cta_button_icon
                .clone()
                .unwrap_or_else(|| icons::external_link(14));

            html! {
                <div class="adsterix-actions" style={style}>
                    if buy_slot {
                        <CtaButton
                            label={props.buy_slot_button_text.clone()}
                            icon={icons::shopping_bag(14)}
                            onclick={ctx.callback(Interaction::BuySlot)}
                            show_label={loaded.show_labels}
                            style={props.buy_slot_button_style.clone()}
                        />
                    }
                    if cta {
                        <CtaButton
                            label={props.cta_button_text.clone()}
                            icon={cta_icon}
                            onclick={ctx.callback(Interaction::Cta)}
                            show_label={loaded.show_labels}
                            style={props.cta_button_style.clone()}
                        />
                    }
                </div>
            }
        }
        ActionSet::Custom { .. } => html! {
            <div class="adsterix-actions" style={style}>
                {props.cta_nodes.iter().flatten().enumerate().map(|(index, node)| {
                    html! {
                        <div
                            class="adsterix-custom-action"
                            onclick={ctx.callback(Interaction::CustomNode(index))}
                        >
                            {node.clone()}
                        </div>
                    }
                }).collect::<Html>()}
            </div>
        },
    }
}
