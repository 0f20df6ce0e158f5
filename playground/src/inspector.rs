use web_sys::HtmlInputElement;
use widget::FetchPhase;
use widget::hooks::use_ad_details;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub initial_identifier: AttrValue,
}

/// Drives the fetch hook directly, without the widget, to show the raw
/// state and the refetch/reset actions.
#[function_component]
pub fn Inspector(props: &Props) -> Html {
    let identifier = use_state(|| props.initial_identifier.clone());
    let ad = use_ad_details((*identifier).clone(), None);

    let on_input = {
        let identifier = identifier.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            identifier.set(input.value().into());
        })
    };

    let phase = match ad.state.phase() {
        FetchPhase::Idle => "idle",
        FetchPhase::Loading => "loading",
        FetchPhase::Success => "success",
        FetchPhase::Failed => "failed",
    };

    html! {
        <section style="margin-top: 24px;">
            <h2 style="font-size: 16px; margin: 0 0 8px;">{"Fetch state"}</h2>
            <input
                type="text"
                value={(*identifier).clone()}
                oninput={on_input}
                placeholder="cast hash"
                style="width: 360px; font-family: monospace;"
            />
            <button onclick={ad.refetch.reform(|_| ())}>{"Refetch"}</button>
            <button onclick={ad.reset.reform(|_| ())}>{"Reset"}</button>
            <dl style="font-family: monospace; font-size: 12px;">
                <dt>{"phase"}</dt>
                <dd>{phase}</dd>
                <dt>{"error"}</dt>
                <dd>{ad.state.error.clone().unwrap_or_else(|| "-".into())}</dd>
                <dt>{"details"}</dt>
                <dd>
                    {match &ad.state.details {
                        Some(details) => html! {
                            <>
                                <div>{format!("image: {}", details.image)}</div>
                                <div>{format!("url: {}", details.url)}</div>
                                <div>{format!("buy slot: {}", details.buy_slot_url)}</div>
                                <div>
                                    {match &details.buyer {
                                        Some(buyer) => format!("buyer: @{} ({})", buyer.username, buyer.display_name),
                                        None => "buyer: none".to_string(),
                                    }}
                                </div>
                            </>
                        },
                        None => html! { {"-"} },
                    }}
                </dd>
            </dl>
        </section>
    }
}
