//! In-app link component.

use leptos::{ev, prelude::*};

use crate::app::AppContext;
use crate::models::AppRoute;

/// Anchor that navigates through the router instead of reloading the page.
///
/// Modified clicks (new tab, new window) fall through to the browser.
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let href = route.href();

    let on_click = move |event: ev::MouseEvent| {
        if event.button() != 0
            || event.ctrl_key()
            || event.meta_key()
            || event.shift_key()
            || event.alt_key()
        {
            return;
        }
        event.prevent_default();
        ctx.navigate(route.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
