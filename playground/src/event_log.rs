use jiff::Timestamp;
use yew::prelude::*;
use yewdux::prelude::*;

/// How many events the log keeps before dropping the oldest.
const MAX_ENTRIES: usize = 50;

#[derive(Clone, PartialEq)]
pub struct LoggedEvent {
    pub at: Timestamp,
    pub source: AttrValue,
    pub message: String,
}

/// Host callbacks fired by the widgets on the page, newest first.
#[derive(Default, Clone, PartialEq, Store)]
pub struct EventLog {
    pub entries: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn record(&mut self, source: AttrValue, message: String) {
        tracing::info!(%source, "{message}");
        self.entries.insert(
            0,
            LoggedEvent {
                at: Timestamp::now(),
                source,
                message,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
    }
}

/// Callback recording `message(value)` under `source`.
pub fn logger<T: 'static>(
    dispatch: &Dispatch<EventLog>,
    source: &'static str,
    message: impl Fn(T) -> String + 'static,
) -> Callback<T> {
    let dispatch = dispatch.clone();
    Callback::from(move |value: T| {
        let line = message(value);
        dispatch.reduce_mut(|log| log.record(source.into(), line));
    })
}

#[function_component]
pub fn EventLogView() -> Html {
    let (log, dispatch) = use_store::<EventLog>();
    let on_clear = dispatch.reduce_mut_callback(|log| log.entries.clear());

    html! {
        <section style="margin-top: 24px;">
            <div style="display: flex; align-items: center; gap: 12px;">
                <h2 style="font-size: 16px; margin: 0;">{"Events"}</h2>
                <button onclick={on_clear}>{"Clear"}</button>
            </div>
            if log.entries.is_empty() {
                <p style="color: #64748b;">{"Click a widget to see its callbacks here."}</p>
            } else {
                <ul style="font-family: monospace; font-size: 12px; padding-left: 16px;">
                    {log.entries.iter().map(|entry| html! {
                        <li>
                            {format!(
                                "{} [{}] {}",
                                entry.at.strftime("%H:%M:%S"),
                                entry.source,
                                entry.message
                            )}
                        </li>
                    }).collect::<Html>()}
                </ul>
            }
        </section>
    }
}
