//! Navigation bar component.
//!
//! Shows the app links and the session: the signed-in email with a
//! sign-out button, or a sign-in link for guests.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::Link;
use crate::components::icons as ic;
use crate::config::{APP_NAME, ROUTE_TABLE};
use crate::models::{AppRoute, AuthState, RouteName};

stylance::import_crate_style!(css, "src/components/nav/nav.module.css");

#[component]
pub fn Nav() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let state = ctx.auth.state();

    let session_name = Signal::derive(move || state.with(AuthState::display_name));
    let logged_in = Signal::derive(move || state.with(AuthState::is_logged_in));

    let sign_out = move |_: leptos::ev::MouseEvent| {
        ctx.auth.sign_out();
        ctx.navigate(AppRoute::Home);
    };

    view! {
        <header class=css::bar>
            <Link route=AppRoute::Home class=css::brand>{APP_NAME}</Link>

            <nav class=css::links>
                <Link route=AppRoute::Home class=css::link>
                    <Icon icon=ic::HOME />
                    <span class=css::label>"Home"</span>
                </Link>
                {ROUTE_TABLE.contains(RouteName::SavedPosts).then(|| view! {
                    <Link route=AppRoute::SavedPosts class=css::link>
                        <Icon icon=ic::BOOKMARK />
                        <span class=css::label>"Saved"</span>
                    </Link>
                })}
            </nav>

            <div class=css::session>
                <Show
                    when=move || logged_in.get()
                    fallback=move || view! {
                        <span>{session_name}</span>
                        <Link route=AppRoute::Login class=css::link>
                            <Icon icon=ic::SIGN_IN />
                            <span class=css::label>"Sign in"</span>
                        </Link>
                    }
                >
                    {move || ctx.auth.uid().map(|uid| {
                        let profile = AppRoute::UserProfile { user_id: uid };
                        view! {
                            <Link route=profile class=css::link>
                                <Icon icon=ic::USER />
                                <span>{session_name}</span>
                            </Link>
                        }
                    })}
                    <button class=css::sign_out on:click=sign_out title="Sign out">
                        <Icon icon=ic::SIGN_OUT />
                        <span class=css::label>"Sign out"</span>
                    </button>
                </Show>
            </div>
        </header>
    }
}
