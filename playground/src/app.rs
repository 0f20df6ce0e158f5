use widget::{AdWidget, Dimension, Position};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::event_log::{EventLog, EventLogView, logger};
use crate::inspector::Inspector;

const CAST_HASH: &str = "0xbf59074b94c5fd1c6b3ee1a7201708da3f60998f";

#[function_component]
pub fn App() -> Html {
    let (_, dispatch) = use_store::<EventLog>();

    let on_ad_click = |source| {
        logger(&dispatch, source, |details: widget::AdDetails| {
            format!("ad click -> {}", details.url)
        })
    };
    let on_close = |source| logger(&dispatch, source, |_: ()| "closed".into());

    let custom_nodes = vec![
        html! { <button>{"Visit"}</button> },
        html! { <button>{"Share"}</button> },
    ];

    html! {
        <main style="padding: 24px; max-width: 960px;">
            <h1>{"Playground"}</h1>

            <div style="display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 24px;">
                <AdWidget
                    identifier={CAST_HASH}
                    width={Dimension::Px(300)}
                    height={Dimension::Px(90)}
                    show_cta_button={true}
                    cta_button_text="Open"
                    position={Position::CenterRight}
                    container_style="border-radius: 0;"
                    cta_button_style="border-radius: 0; background: orange; color: #ffffff;"
                    on_ad_click={on_ad_click("banner")}
                />

                <AdWidget
                    identifier={format!("  {CAST_HASH}  ")}
                    show_close_button={true}
                    show_buy_slot_button={true}
                    show_cta_button={true}
                    show_ad_label={true}
                    default_image="https://www.adsterix.xyz/placeholder.png"
                    on_ad_click={on_ad_click("card")}
                    on_close={on_close("card")}
                    on_buy_slot_click={logger(&dispatch, "card", |url: String| format!("buy slot -> {url}"))}
                />

                <AdWidget
                    identifier={CAST_HASH}
                    width={Dimension::from("50%")}
                    position={Position::TopLeft}
                    cta_nodes={custom_nodes}
                    on_ad_click={on_ad_click("custom")}
                    on_cta_node_click={logger(
                        &dispatch,
                        "custom",
                        |(index, _, details): (usize, MouseEvent, widget::AdDetails)| {
                            format!("custom node {index} -> {}", details.url)
                        },
                    )}
                />

                <AdWidget identifier="missing-slot" show_ad_label={true} />
            </div>

            <Inspector initial_identifier={CAST_HASH} />
            <EventLogView />
        </main>
    }
}
