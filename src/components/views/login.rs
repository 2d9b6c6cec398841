use leptos::{ev, prelude::*};
use leptos_icons::Icon;

use super::css;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::CredentialAction;
use crate::models::{AppRoute, AuthState};

/// Email/password sign-in and account creation.
#[component]
pub fn LoginView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let state = ctx.auth.state();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = Signal::derive(move || state.with(AuthState::is_pending));

    let submit = move |action: CredentialAction| {
        ctx.auth.submit(
            email.get_untracked(),
            password.get_untracked(),
            action,
            move || {
                password.set(String::new());
                ctx.navigate(AppRoute::Home);
            },
        );
    };

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();
        submit(CredentialAction::SignIn);
    };

    view! {
        <section class=css::panel>
            <Show
                when=move || !state.with(AuthState::is_logged_in)
                fallback=move || view! {
                    <h1 class=css::title>"Signed in"</h1>
                    <p>"You are signed in as " <strong>{move || ctx.auth.email()}</strong> "."</p>
                }
            >
                <h1 class=css::title>"Sign in"</h1>
                <form class=css::form on:submit=on_submit>
                    <input
                        class=css::input
                        type="email"
                        placeholder="Email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class=css::input
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    {move || state.with(|s| s.error().map(str::to_string)).map(|reason| view! {
                        <p class=css::error>
                            <Icon icon=ic::WARNING />
                            <span>{reason}</span>
                        </p>
                    })}
                    <div class=css::actions>
                        <button class=css::button type="submit" disabled=move || pending.get()>
                            {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                        <button
                            class=css::secondary
                            type="button"
                            disabled=move || pending.get()
                            on:click=move |_| submit(CredentialAction::SignUp)
                        >
                            "Create account"
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
