use leptos::prelude::*;
use leptos_icons::Icon;

use super::{ErrorNotice, css, load_document};
use crate::app::AppContext;
use crate::components::Link;
use crate::components::icons as ic;
use crate::config::collections;
use crate::models::{AppRoute, Folder, FolderAccess};

/// Whether a visitor with `access` may open the folder through this view.
///
/// The owner view admits only the owner; the shared view also admits
/// anyone the folder is shared with.
fn may_view(access: FolderAccess, shared: bool) -> bool {
    match access {
        FolderAccess::Owner => true,
        FolderAccess::Shared => shared,
        FolderAccess::Denied => false,
    }
}

/// A folder at `folders/{id}`, served by both `/folder/:id` and
/// `/shared-folder/:id`.
#[component]
pub fn FolderView(id: String, shared: bool) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let auth = ctx.auth;

    let folder = LocalResource::new(move || {
        let _ = auth.uid();
        let path = format!("{}/{}", collections::FOLDERS, id);
        async move { load_document::<Folder>(path).await }
    });

    view! {
        <section class=css::panel>
            <Suspense fallback=move || view! { <p class=css::muted>"Loading folder..."</p> }>
                {move || folder.get().map(|result| match result {
                    Ok(folder) => {
                        let uid = auth.uid();
                        let access = folder.access_for(uid.as_deref(), &auth.email());
                        if may_view(access, shared) {
                            view! { <FolderContents folder=folder access=access /> }.into_any()
                        } else {
                            view! {
                                <p class=css::notice>
                                    <Icon icon=ic::LOCK />
                                    <span>"This folder hasn't been shared with you."</span>
                                </p>
                                {(!auth.is_logged_in()).then(|| view! {
                                    <Link route=AppRoute::Login class=css::link>"Sign in"</Link>
                                })}
                            }.into_any()
                        }
                    }
                    Err(error) => view! { <ErrorNotice error=error what="folder" /> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn FolderContents(folder: Folder, access: FolderAccess) -> impl IntoView {
    let icon = if access == FolderAccess::Owner { ic::FOLDER } else { ic::SHARED_FOLDER };
    let share_route = AppRoute::SharedFolder { id: folder.id.clone() };
    let is_owner = access == FolderAccess::Owner;
    let shared_with = folder.shared_with.clone();

    view! {
        <h1 class=css::title>
            <Icon icon=icon />
            " "
            {folder.name.clone()}
        </h1>
        {if folder.posts.is_empty() {
            view! { <p class=css::muted>"This folder is empty."</p> }.into_any()
        } else {
            view! {
                <ul class=css::list>
                    {folder.posts.iter().map(|post| view! { <li>{post.clone()}</li> }).collect_view()}
                </ul>
            }.into_any()
        }}
        {is_owner.then(move || view! {
            <div class=css::post>
                <p class=css::post_meta>
                    "Shared with: "
                    {if shared_with.is_empty() {
                        view! { <span>"nobody yet"</span> }.into_any()
                    } else {
                        shared_with
                            .into_iter()
                            .map(|email| view! { <span class=css::tag>{email}</span> })
                            .collect_view()
                            .into_any()
                    }}
                </p>
                <Link route=share_route class=css::link>"Shared link"</Link>
            </div>
        })}
    }
}
