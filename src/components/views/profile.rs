use leptos::prelude::*;

use super::{ErrorNotice, css, load_document};
use crate::app::AppContext;
use crate::config::collections;
use crate::models::UserProfile;

/// Public profile of `users/{userId}`.
#[component]
pub fn UserProfileView(user_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let auth = ctx.auth;

    let own_profile = {
        let user_id = user_id.clone();
        move || auth.uid().is_some_and(|uid| uid == user_id)
    };

    // Refetch when the signed-in user changes, since rules may depend on it
    let profile = LocalResource::new(move || {
        let _ = auth.uid();
        let path = format!("{}/{}", collections::USERS, user_id);
        async move { load_document::<UserProfile>(path).await }
    });

    view! {
        <section class=css::panel>
            <Suspense fallback=move || view! { <p class=css::muted>"Loading profile..."</p> }>
                {move || profile.get().map(|result| match result {
                    Ok(profile) => view! {
                        <h1 class=css::title>{profile.title().to_string()}</h1>
                        {(!profile.email.is_empty()).then(|| view! {
                            <p class=css::muted>{profile.email.clone()}</p>
                        })}
                        {profile.bio.clone().map(|bio| view! { <p>{bio}</p> })}
                    }.into_any(),
                    Err(error) => view! { <ErrorNotice error=error what="user" /> }.into_any(),
                })}
            </Suspense>
            <Show when=own_profile>
                <p class=css::muted>"This is your profile."</p>
            </Show>
        </section>
    }
}
