//! Root application module.
//!
//! Contains the main App component and the AppContext shared with every
//! view, following Leptos conventions.

use leptos::prelude::*;

use crate::components::AppRouter;
use crate::core::AuthStore;
use crate::models::AppRoute;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Architecture
///
/// - **Auth**: sign-in state and the flows that change it
/// - **Route**: the view currently mounted, mirrored from the browser URL
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Auth state store.
    pub auth: AuthStore,

    /// Current route, updated by navigation and `popstate`.
    pub route: RwSignal<AppRoute>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            auth: AuthStore::new(),
            route: RwSignal::new(AppRoute::current()),
        }
    }

    /// Navigate to a route, adding a history entry.
    pub fn navigate(&self, route: AppRoute) {
        if self.route.with_untracked(|current| *current == route) {
            return;
        }
        route.push();
        self.route.set(route);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Restores a persisted session
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    ctx.auth.restore();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #c0392b; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #666; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="text-align: left; margin-bottom: 1rem;">
                            <summary style="cursor: pointer;">"Error details"</summary>
                            <ul style="margin: 1rem 0 0 0; padding-left: 1.5rem; color: #c0392b;">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }>
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
