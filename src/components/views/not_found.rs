use leptos::prelude::*;

use super::css;
use crate::components::Link;
use crate::models::AppRoute;

/// Shown for any path the route table does not match.
#[component]
pub fn NotFoundView(path: String) -> impl IntoView {
    view! {
        <section class=css::panel>
            <h1 class=css::title>"Page not found"</h1>
            <p class=css::muted>"Nothing lives at " <code>{path}</code> "."</p>
            <Link route=AppRoute::Home class=css::link>"Back to home"</Link>
        </section>
    }
}
