//! Embeddable Yew widget showing the ad booked for a slot on the Adsterix
//! service, with buy-slot and call-to-action buttons.
//!
//! The request lifecycle ([`fetch`]) and the choice of what to draw
//! ([`view`], [`interaction`]) are plain Rust and work off the browser; the
//! [`AdWidget`] component and [`hooks::use_ad_details`] wire them into Yew.

pub mod components;
pub mod dimension;
pub mod fetch;
pub mod hooks;
pub mod interaction;
pub mod logs;
pub mod position;
pub mod view;

pub use components::{AdWidget, AdWidgetProps};
pub use dimension::Dimension;
pub use fetch::{AdDetailsState, AdDetailsUnit, AdSource, FetchError, FetchPhase};
pub use payloads::{AdDetails, Buyer, Identifier};
pub use position::Position;

use payloads::{APIClient, DEFAULT_ADDRESS};

/// API client for the ad service.
///
/// `api_base` wins when given; otherwise the address baked in at build time
/// through `ADSTERIX_API_URL`, falling back to the production service.
pub fn get_api_client(api_base: Option<&str>) -> APIClient {
    let address = api_base
        .map(str::to_string)
        .or_else(|| option_env!("ADSTERIX_API_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    APIClient::new(address)
}
