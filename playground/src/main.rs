//! Playground for the ad widget.
//!
//! Usage: cd playground && trunk serve
//!
//! Set `ADSTERIX_API_URL` at build time to point the widgets at another
//! ad service.

mod app;
mod event_log;
mod inspector;

fn main() {
    widget::logs::init_logging();
    yew::Renderer::<app::App>::new().render();
}
