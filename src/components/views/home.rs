use leptos::prelude::*;

use super::css;
use crate::app::AppContext;
use crate::components::Link;
use crate::config::{APP_NAME, ROUTE_TABLE};
use crate::models::{AppRoute, RouteName};

#[component]
pub fn HomeView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let auth = ctx.auth;

    view! {
        <section class=css::panel>
            <h1 class=css::title>{APP_NAME}</h1>
            <Show
                when=move || auth.is_logged_in()
                fallback=|| view! {
                    <p class=css::muted>"Save posts, keep them in folders and share folders with friends."</p>
                    <Link route=AppRoute::Login class=css::link>"Sign in to get started"</Link>
                }
            >
                <p>"Welcome back, " <strong>{move || auth.email()}</strong> "."</p>
                <ul class=css::list>
                    {move || auth.uid().map(|uid| {
                        let profile = AppRoute::UserProfile { user_id: uid };
                        view! { <li><Link route=profile class=css::link>"Your profile"</Link></li> }
                    })}
                    {ROUTE_TABLE.contains(RouteName::SavedPosts).then(|| view! {
                        <li><Link route=AppRoute::SavedPosts class=css::link>"Saved posts"</Link></li>
                    })}
                </ul>
            </Show>
        </section>
    }
}
