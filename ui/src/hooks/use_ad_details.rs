use payloads::APIClient;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::fetch::{AdDetailsState, AdDetailsUnit};
use crate::get_api_client;

/// Hook return type for a widget's ad details
pub struct AdDetailsHandle {
    pub state: AdDetailsState,
    /// Run the request again for the current identifier.
    pub refetch: Callback<()>,
    /// Clear the state and drop any outstanding request.
    pub reset: Callback<()>,
}

/// Hook owning the fetch unit for one widget instance.
///
/// Starts a request cycle on mount and whenever `identifier` changes; the
/// unit is disposed on unmount or when `api_base` changes, so no request
/// can write into a torn-down component.
#[hook]
pub fn use_ad_details(
    identifier: AttrValue,
    api_base: Option<AttrValue>,
) -> AdDetailsHandle {
    let state = {
        let identifier = identifier.clone();
        use_state(move || AdDetailsState::initial(&identifier))
    };
    let unit = use_memo(api_base, |api_base| {
        AdDetailsUnit::<APIClient>::new(get_api_client(api_base.as_deref()))
    });

    // Mirror unit changes into component state; dispose on teardown
    {
        let state = state.clone();
        use_effect_with(unit.clone(), move |unit| {
            let unit = (**unit).clone();
            unit.subscribe(move |next| state.set(next.clone()));
            move || unit.dispose()
        });
    }

    {
        use_effect_with((identifier, unit.clone()), |(identifier, unit)| {
            if let Some(pending) = unit.start(identifier) {
                spawn_local(pending);
            }
        });
    }

    let refetch = {
        let unit = unit.clone();
        Callback::from(move |_| {
            if let Some(pending) = unit.refetch() {
                spawn_local(pending);
            }
        })
    };

    let reset = Callback::from(move |_| unit.reset());

    AdDetailsHandle {
        state: (*state).clone(),
        refetch,
        reset,
    }
}
