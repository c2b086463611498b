use crate::app::{ApiCtx, Route};
use crate::core::store::AppStore;
use crate::features::auth::api::sign_out;
use crate::core::auth::AuthEvent;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_route};
use yewdux::prelude::{Dispatch, use_selector};

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
}

/// Navigation bar and page frame for signed-in routes.
#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let menu_open = use_state(|| false);
    let api_ctx = use_context::<ApiCtx>();
    let session = use_selector(|store: &AppStore| store.auth.session.clone());
    let active = use_route::<Route>().unwrap_or(Route::Feed);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let on_sign_out = Callback::from(move |_: MouseEvent| {
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        let session = (*session).clone();
        spawn_local(async move {
            if let Some(client) = client {
                sign_out(&*client, session.as_ref()).await;
            }
            Dispatch::<AppStore>::new().reduce_mut(|store| store.auth.apply(AuthEvent::SignedOut));
        });
    });

    html! {
        <>
            <header class="navbar bg-base-200 shadow">
                <div class="container mx-auto flex flex-wrap items-center">
                    <button
                        class="btn btn-ghost md:hidden"
                        aria-label="Toggle navigation menu"
                        aria-expanded={menu_open.to_string()}
                        onclick={toggle_menu}
                    >{"☰"}</button>
                    <nav
                        class={classes!("menu", "menu-horizontal", "gap-1", (!*menu_open).then_some("max-md:hidden"))}
                        aria-label="Main navigation"
                    >
                        {nav_item(Route::Feed, "Feed", &active)}
                        {nav_item(Route::Search, "Search", &active)}
                        {nav_item(Route::Create, "Create Post", &active)}
                        {nav_item(Route::MyProfile, "My profile", &active)}
                        <button class="btn btn-sm btn-outline ml-2" onclick={on_sign_out}>{"Sign Out"}</button>
                    </nav>
                </div>
            </header>
            <main class="container mx-auto p-4">
                {for props.children.iter()}
            </main>
        </>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let classes = classes!("btn", "btn-ghost", "btn-sm", (*active == route).then_some("btn-active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label}</Link<Route>>
    }
}
