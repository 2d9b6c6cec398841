use leptos::prelude::*;
use leptos_icons::Icon;

use super::{ErrorNotice, css, load_collection};
use crate::app::AppContext;
use crate::components::Link;
use crate::components::icons as ic;
use crate::config::collections;
use crate::models::{AppRoute, SavedPost};
use crate::utils::markdown_to_html;

/// Posts the signed-in user saved, from `users/{uid}/savedPosts`.
#[component]
pub fn SavedPostsView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let auth = ctx.auth;

    let posts = LocalResource::new(move || {
        let uid = auth.uid();
        async move {
            match uid {
                Some(uid) => {
                    let path = format!("{}/{}/{}", collections::USERS, uid, collections::SAVED_POSTS);
                    Some(load_collection::<SavedPost>(path).await)
                }
                None => None,
            }
        }
    });

    view! {
        <section class=css::panel>
            <h1 class=css::title>"Saved posts"</h1>
            <Show
                when=move || auth.is_logged_in()
                fallback=|| view! {
                    <p class=css::notice>
                        <Icon icon=ic::LOCK />
                        <span>"Sign in to see the posts you saved."</span>
                    </p>
                    <Link route=AppRoute::Login class=css::link>"Sign in"</Link>
                }
            >
                <Suspense fallback=move || view! { <p class=css::muted>"Loading posts..."</p> }>
                    {move || posts.get().flatten().map(|result| match result {
                        Ok(posts) if posts.is_empty() => view! {
                            <p class=css::muted>"You haven't saved any posts yet."</p>
                        }.into_any(),
                        Ok(posts) => posts
                            .into_iter()
                            .map(|post| view! { <PostCard post=post /> })
                            .collect_view()
                            .into_any(),
                        Err(error) => view! { <ErrorNotice error=error /> }.into_any(),
                    })}
                </Suspense>
            </Show>
        </section>
    }
}

#[component]
fn PostCard(post: SavedPost) -> impl IntoView {
    let body = markdown_to_html(&post.body);
    let meta = match (post.author, post.saved_at) {
        (Some(author), Some(saved)) => format!("by {} · saved {}", author, saved),
        (Some(author), None) => format!("by {}", author),
        (None, Some(saved)) => format!("saved {}", saved),
        (None, None) => String::new(),
    };

    view! {
        <article class=css::post>
            <h2>{post.title}</h2>
            {(!meta.is_empty()).then(|| view! { <p class=css::post_meta>{meta}</p> })}
            <div class=css::markdown inner_html=body />
        </article>
    }
}
