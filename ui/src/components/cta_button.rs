use yew::prelude::*;

const BASE_STYLE: &str = "display: flex; align-items: center; \
    border-radius: 20px; background: rgba(255,255,255,0.9); \
    backdrop-filter: blur(8px); color: #0f172a; font-size: 13px; \
    font-weight: 600; font-family: system-ui, -apple-system, sans-serif; \
    box-shadow: 0 4px 12px rgba(0,0,0,0.15); cursor: pointer; \
    transition: transform 0.15s ease, box-shadow 0.15s ease;";

#[derive(Properties, PartialEq)]
pub struct Props {
    pub label: AttrValue,
    pub icon: Html,
    pub onclick: Callback<MouseEvent>,
    /// Hidden on narrow widgets, leaving just the icon.
    pub show_label: bool,
    /// Appended after the built-in style so it wins.
    #[prop_or_default]
    pub style: Option<AttrValue>,
}

/// A pill-shaped action button laid over the ad image.
#[function_component]
pub fn CtaButton(props: &Props) -> Html {
    let spacing = if props.show_label {
        "gap: 6px; padding: 8px 14px;"
    } else {
        "gap: 0; padding: 8px;"
    };
    let style = format!(
        "{BASE_STYLE} {spacing} {}",
        props.style.as_deref().unwrap_or_default()
    );

    html! {
        <div
            class="adsterix-cta-button"
            role="button"
            aria-label={props.label.clone()}
            style={style}
            onclick={props.onclick.clone()}
        >
            if props.show_label {
                {props.label.clone()}
            }
            <span style="display: flex; align-items: center;">
                {props.icon.clone()}
            </span>
        </div>
    }
}
