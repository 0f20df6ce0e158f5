use std::cell::RefCell;
use std::rc::Rc;

use widget::interaction::{Effect, HostCallbacks, Interaction, WidgetSession};
use widget::view::{WidgetConfig, WidgetView};
use widget::{AdDetails, AdDetailsState};
use yew::Callback;

/// Click event stand-in; the real widget passes a `MouseEvent`.
type Click = &'static str;

type Calls = Rc<RefCell<Vec<String>>>;

fn details() -> AdDetails {
    AdDetails {
        image: "https://example.com/ad-image.jpg".into(),
        url: "https://example.com/ad-destination".into(),
        buy_slot_url: "https://example.com/buy-slot".into(),
        buyer: None,
    }
}

fn record<T: 'static>(
    calls: &Calls,
    name: &'static str,
    describe: impl Fn(T) -> String + 'static,
) -> Option<Callback<T>> {
    let calls = calls.clone();
    Some(Callback::from(move |value: T| {
        calls.borrow_mut().push(format!("{name}: {}", describe(value)));
    }))
}

fn all_callbacks(calls: &Calls) -> HostCallbacks<Click> {
    HostCallbacks {
        on_close: record(calls, "close", |()| String::new()),
        on_ad_click: record(calls, "ad", |d: AdDetails| d.url),
        on_buy_slot_click: record(calls, "buy slot", |url: String| url),
        on_cta_button_click: record(calls, "cta", |d: AdDetails| d.url),
        on_cta_node_click: record(
            calls,
            "node",
            |(index, click, d): (usize, Click, AdDetails)| {
                format!("{index} {click} {}", d.url)
            },
        ),
    }
}

/// Dispatch `effects`, returning the opened URLs and the close flag.
fn run(
    callbacks: &HostCallbacks<Click>,
    effects: Vec<Effect>,
) -> (Vec<String>, bool) {
    let mut opened = Vec::new();
    let closed = callbacks.dispatch(effects, &"click", |url| {
        opened.push(url.to_string())
    });
    (opened, closed)
}

#[test]
fn ad_click_opens_and_notifies() {
    let calls = Calls::default();
    let callbacks = all_callbacks(&calls);

    let (opened, closed) = run(
        &callbacks,
        vec![
            Effect::OpenUrl("https://example.com/ad-destination".into()),
            Effect::AdClicked(details()),
        ],
    );

    assert_eq!(opened, vec!["https://example.com/ad-destination"]);
    assert!(!closed);
    assert_eq!(
        *calls.borrow(),
        vec!["ad: https://example.com/ad-destination"]
    );
}

#[test]
fn cta_prefers_its_own_callback() {
    let calls = Calls::default();
    let callbacks = all_callbacks(&calls);

    run(&callbacks, vec![Effect::CtaClicked(details())]);

    assert_eq!(
        *calls.borrow(),
        vec!["cta: https://example.com/ad-destination"]
    );
}

#[test]
fn cta_falls_back_to_ad_click() {
    let calls = Calls::default();
    let callbacks = HostCallbacks {
        on_cta_button_click: None,
        ..all_callbacks(&calls)
    };

    run(&callbacks, vec![Effect::CtaClicked(details())]);

    assert_eq!(
        *calls.borrow(),
        vec!["ad: https://example.com/ad-destination"]
    );
}

#[test]
fn buy_slot_callback_receives_the_url() {
    let calls = Calls::default();
    let callbacks = all_callbacks(&calls);

    let (opened, _) = run(
        &callbacks,
        vec![
            Effect::OpenUrl("https://example.com/buy-slot".into()),
            Effect::BuySlotClicked("https://example.com/buy-slot".into()),
        ],
    );

    assert_eq!(opened, vec!["https://example.com/buy-slot"]);
    assert_eq!(
        *calls.borrow(),
        vec!["buy slot: https://example.com/buy-slot"]
    );
}

#[test]
fn custom_node_gets_index_event_and_details() {
    let calls = Calls::default();
    let callbacks = all_callbacks(&calls);

    run(&callbacks, vec![Effect::CustomNodeClicked(2, details())]);

    assert_eq!(
        *calls.borrow(),
        vec!["node: 2 click https://example.com/ad-destination"]
    );
}

#[test]
fn missing_callbacks_are_skipped() {
    let callbacks = HostCallbacks::<Click>::default();

    let (opened, closed) = run(
        &callbacks,
        vec![
            Effect::OpenUrl("https://example.com/ad-destination".into()),
            Effect::CtaClicked(details()),
            Effect::BuySlotClicked("https://example.com/buy-slot".into()),
            Effect::CustomNodeClicked(0, details()),
        ],
    );

    assert_eq!(opened, vec!["https://example.com/ad-destination"]);
    assert!(!closed);
}

#[test]
fn close_fires_once_and_asks_for_a_rerender() {
    let calls = Calls::default();
    let callbacks = all_callbacks(&calls);
    let state = AdDetailsState {
        details: Some(details()),
        ..AdDetailsState::default()
    };
    let config = WidgetConfig {
        show_close_button: true,
        ..WidgetConfig::default()
    };
    let view = WidgetView::select(&state, true, &config, None);
    let mut session = WidgetSession::default();

    let (_, closed) = run(&callbacks, session.handle(Interaction::Close, &view));
    assert!(closed);

    let (_, closed) = run(&callbacks, session.handle(Interaction::Close, &view));
    assert!(!closed);

    assert_eq!(*calls.borrow(), vec!["close: "]);
    assert_eq!(
        WidgetView::select(&state, session.is_visible(), &config, None),
        WidgetView::Hidden
    );
}
