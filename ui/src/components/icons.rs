//! Inline SVG icons (lucide outlines) so the widget needs no icon font.

use yew::prelude::*;

fn icon(name: &'static str, size: u32, paths: Html) -> Html {
    html! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            class={format!("adsterix-icon adsterix-icon-{name}")}
            width={size.to_string()}
            height={size.to_string()}
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2.5"
            stroke-linecap="round"
            stroke-linejoin="round"
        >
            {paths}
        </svg>
    }
}

pub fn close(size: u32) -> Html {
    icon(
        "x",
        size,
        html! {
            <>
                <path d="M18 6 6 18" />
                <path d="m6 6 12 12" />
            </>
        },
    )
}

pub fn shopping_bag(size: u32) -> Html {
    icon(
        "shopping-bag",
        size,
        html! {
            <>
                <path d="M6 2 3 6v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2V6l-3-4Z" />
                <path d="M3 6h18" />
                <path d="M16 10a4 4 0 0 1-8 0" />
            </>
        },
    )
}

pub fn external_link(size: u32) -> Html {
    icon(
        "external-link",
        size,
        html! {
            <>
                <path d="M15 3h6v6" />
                <path d="M10 14 21 3" />
                <path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6" />
            </>
        },
    )
}

pub fn sparkles(size: u32) -> Html {
    icon(
        "sparkles",
        size,
        html! {
            <path d="M9.937 15.5A2 2 0 0 0 8.5 14.063l-6.135-1.582a.5.5 0 0 1 0-.962L8.5 9.936A2 2 0 0 0 9.937 8.5l1.582-6.135a.5.5 0 0 1 .963 0L14.063 8.5A2 2 0 0 0 15.5 9.937l6.135 1.581a.5.5 0 0 1 0 .964L15.5 14.063a2 2 0 0 0-1.437 1.437l-1.582 6.135a.5.5 0 0 1-.963 0z" />
        },
    )
}
