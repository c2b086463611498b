//! App shell: configuration, session bootstrap and guarded routing.
//!
//! # Design
//! - Configuration is validated once; a bad build renders a full-page message.
//! - The persisted session is validated before any guarded route renders.
//! - Every session change flows through the yewdux store; this module mirrors
//!   it into the client bearer token and local storage.

use crate::components::shell::AppShell;
use crate::components::spinner::Spinner;
use crate::core::auth::{
    AuthEvent, EXPIRY_MARGIN_SECS, GuardDecision, RouteAccess, Session, SessionStatus, guard,
};
use crate::core::config::BackendConfig;
use crate::core::store::AppStore;
use crate::features::auth::api::{RestoreOutcome, refresh, restore_session};
use crate::features::auth::view::{LoginPage, RegisterPage};
use crate::features::comments::view::CommentsPage;
use crate::features::create::view::CreatePage;
use crate::features::feed::view::FeedPage;
use crate::features::profile::view::ProfilePage;
use crate::features::search::view::SearchPage;
use gloo::console;
use gloo_timers::callback::Timeout;
use photoshare_telemetry::{LoggingConfig, init_logging};
use preferences::{clear_session, load_session, persist_session};
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) use api::ApiCtx;
pub(crate) use routes::Route;

mod api;
mod preferences;
mod routes;

/// Milliseconds since the epoch from the browser clock.
pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Whole seconds since the epoch from the browser clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn now_secs() -> i64 {
    (now_ms() / 1000.0) as i64
}

/// Delay before the session should be refreshed, clamped to what
/// `setTimeout` accepts.
fn refresh_delay_ms(session: &Session, now_secs: i64) -> u32 {
    let secs = session
        .expires_at
        .saturating_sub(EXPIRY_MARGIN_SECS)
        .saturating_sub(now_secs)
        .max(0);
    let max = i64::from(i32::MAX);
    u32::try_from(secs.saturating_mul(1000).min(max)).unwrap_or(0)
}

#[function_component(PhotoshareApp)]
fn photoshare_app() -> Html {
    let config = use_memo(|_| BackendConfig::from_build_env(), ());
    match &*config {
        Ok(config) => html! { <AppRoot config={config.clone()} /> },
        Err(err) => {
            console::error!(format!("backend configuration invalid: {err}"));
            html! { <ConfigErrorPage message={err.to_string()} /> }
        }
    }
}

#[derive(Properties, PartialEq)]
struct AppRootProps {
    config: BackendConfig,
}

#[function_component(AppRoot)]
fn app_root(props: &AppRootProps) -> Html {
    let api_ctx = use_memo(|config| ApiCtx::new(config.clone()), props.config.clone());
    let dispatch = Dispatch::<AppStore>::new();
    let session = use_selector(|store: &AppStore| store.auth.session.clone());
    let restored = use_selector(|store: &AppStore| store.auth.status != SessionStatus::Loading);
    // Set when the backend was unreachable at startup; the stored session is
    // kept for the next load until a new session replaces it.
    let keep_stored = use_mut_ref(|| false);

    {
        let api_ctx = (*api_ctx).clone();
        let dispatch = dispatch.clone();
        let keep_stored = keep_stored.clone();
        use_effect_with_deps(
            move |_| {
                let client = api_ctx.client.clone();
                spawn_local(async move {
                    let event = match restore_session(&*client, load_session(), now_secs()).await {
                        RestoreOutcome::Restored(session) => AuthEvent::SignedIn(session),
                        RestoreOutcome::Rejected => AuthEvent::SignedOut,
                        RestoreOutcome::Unreachable => {
                            *keep_stored.borrow_mut() = true;
                            AuthEvent::SignedOut
                        }
                    };
                    dispatch.reduce_mut(|store| store.auth.apply(event));
                });
                || ()
            },
            (),
        );
    }
    {
        let api_ctx = (*api_ctx).clone();
        let keep_stored = keep_stored.clone();
        use_effect_with_deps(
            move |(session, restored): &(Rc<Option<Session>>, Rc<bool>)| {
                let current: &Option<Session> = session;
                api_ctx
                    .client
                    .set_auth(current.as_ref().map(|session| session.access_token.clone()));
                if **restored {
                    match current {
                        Some(session) => {
                            *keep_stored.borrow_mut() = false;
                            persist_session(session);
                        }
                        None if *keep_stored.borrow() => {}
                        None => clear_session(),
                    }
                }
                || ()
            },
            (session.clone(), restored),
        );
    }
    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |session: &Rc<Option<Session>>| {
                let timer = (**session).clone().map(|session| {
                    let delay = refresh_delay_ms(&session, now_secs());
                    Timeout::new(delay, move || {
                        let client = api_ctx.client.clone();
                        spawn_local(async move {
                            let event = match refresh(&*client, &session, now_secs()).await {
                                Ok(next) => AuthEvent::TokenRefreshed(next),
                                Err(err) => {
                                    tracing::warn!(error = %err, "session refresh failed");
                                    AuthEvent::SignedOut
                                }
                            };
                            dispatch.reduce_mut(|store| store.auth.apply(event));
                        });
                    })
                });
                move || drop(timer)
            },
            session,
        );
    }

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    let access = route.access();
    let page = match route {
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Feed => html! { <FeedPage /> },
        Route::Create => html! { <CreatePage /> },
        Route::Comments { photo_id } => {
            html! { <CommentsPage key={photo_id.clone()} photo_id={photo_id} /> }
        }
        Route::Search => html! { <SearchPage /> },
        Route::MyProfile => html! { <ProfilePage key="me" profile_id={None::<String>} /> },
        Route::Profile { id } => html! { <ProfilePage key={id.clone()} profile_id={Some(id)} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };
    match access {
        RouteAccess::Protected => html! {
            <Guarded access={access}>
                <AppShell>{page}</AppShell>
            </Guarded>
        },
        RouteAccess::GuestOnly | RouteAccess::Public => html! {
            <Guarded access={access}>{page}</Guarded>
        },
    }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    access: RouteAccess,
    children: Children,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let status = use_selector(|store: &AppStore| store.auth.status.clone());
    match guard(props.access, &status) {
        GuardDecision::Render => html! { <>{for props.children.iter()}</> },
        GuardDecision::Wait => html! {
            <div class="flex min-h-screen items-center justify-center">
                <Spinner label="Checking session" />
            </div>
        },
        GuardDecision::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        GuardDecision::RedirectToFeed => html! { <Redirect<Route> to={Route::Feed} /> },
    }
}

#[function_component(NotFoundPage)]
fn not_found_page() -> Html {
    html! {
        <div class="hero min-h-screen">
            <div class="hero-content flex-col text-center">
                <h1 class="text-3xl font-bold">{"Page not found"}</h1>
                <Link<Route> to={Route::Feed} classes="link link-primary">{"Back to the feed"}</Link<Route>>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ConfigErrorProps {
    message: AttrValue,
}

#[function_component(ConfigErrorPage)]
fn config_error_page(props: &ConfigErrorProps) -> Html {
    html! {
        <div class="hero min-h-screen">
            <div class="hero-content flex-col text-center">
                <h1 class="text-2xl font-bold">{"Photoshare is not configured"}</h1>
                <p class="text-error">{props.message.clone()}</p>
            </div>
        </div>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&LoggingConfig::default()) {
        console::error!(format!("logging setup failed: {err}"));
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<PhotoshareApp>::with_root(root).render();
    } else {
        yew::Renderer::<PhotoshareApp>::new().render();
    }
}
