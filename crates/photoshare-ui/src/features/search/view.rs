use crate::app::{ApiCtx, Route};
use crate::components::spinner::Spinner;
use crate::core::filters::FeedQuery;
use crate::core::paging::ApplyOutcome;
use crate::core::search::{SearchCategory, SearchController, SearchEffect, SearchFetch, SearchHit};
use crate::features::search::api::{fetch_albums, fetch_users};
use crate::services::supabase::SupabaseClient;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

fn run_fetch(
    client: Rc<SupabaseClient>,
    controller: Rc<RefCell<SearchController>>,
    fetch: SearchFetch,
    refresh: Callback<()>,
) {
    if let Some(ticket) = fetch.users {
        let client = client.clone();
        let controller = controller.clone();
        let refresh = refresh.clone();
        spawn_local(async move {
            let result = fetch_users(&*client, &ticket).await;
            if controller.borrow_mut().apply_users(&ticket, result) == ApplyOutcome::Applied {
                refresh.emit(());
            }
        });
    }
    if let Some(ticket) = fetch.albums {
        spawn_local(async move {
            let result = fetch_albums(&*client, &ticket).await;
            if controller.borrow_mut().apply_albums(&ticket, result) == ApplyOutcome::Applied {
                refresh.emit(());
            }
        });
    }
}

fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn result_item(hit: &SearchHit) -> Html {
    let (icon, summary) = match hit.category {
        SearchCategory::User => (
            "👤",
            format!(
                "User • {} • {}",
                plural(hit.photo_count, "photo"),
                plural(hit.album_count.unwrap_or(0), "album")
            ),
        ),
        SearchCategory::Album => ("📁", format!("Album • {}", plural(hit.photo_count, "photo"))),
    };
    let body = html! {
        <div class="flex items-start gap-3">
            <span class="text-2xl">{icon}</span>
            <div class="flex flex-col gap-1">
                <span class="font-semibold">{hit.title.clone()}</span>
                <span class="text-sm opacity-70">{summary}</span>
                {if hit.preview_urls.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="flex gap-2">
                            {for hit.preview_urls.iter().map(|url| html! {
                                <img src={url.clone()} alt="" class="h-16 w-16 rounded object-cover" />
                            })}
                        </div>
                    }
                }}
            </div>
        </div>
    };
    let key = format!("{:?}-{}", hit.category, hit.id);
    match hit.category {
        SearchCategory::User => html! {
            <Link<Route> key={key} to={Route::Profile { id: hit.id.clone() }} classes="card bg-base-200 p-4 hover:bg-base-300">
                {body}
            </Link<Route>>
        },
        SearchCategory::Album => {
            let query = FeedQuery {
                profile: None,
                album: Some(hit.id.clone()),
            };
            html! {
                <Link<Route, FeedQuery> key={key} to={Route::Feed} query={Some(query)} classes="card bg-base-200 p-4 hover:bg-base-300">
                    {body}
                </Link<Route, FeedQuery>>
            }
        }
    }
}

/// Debounced search over user display names and album names.
#[function_component(SearchPage)]
pub(crate) fn search_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let controller = use_mut_ref(SearchController::new);
    let timer = use_mut_ref(|| None::<Timeout>);
    let force = use_force_update();
    let refresh = Callback::from(move |()| force.force_update());

    {
        let controller = controller.clone();
        let timer = timer.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    timer.borrow_mut().take();
                    controller.borrow_mut().cancel();
                }
            },
            (),
        );
    }

    let oninput = {
        let controller = controller.clone();
        let timer = timer.clone();
        let refresh = refresh.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let effect = controller.borrow_mut().set_query(&input.value());
            match effect {
                SearchEffect::Clear => {
                    timer.borrow_mut().take();
                }
                SearchEffect::Debounce {
                    generation,
                    delay_ms,
                } => {
                    let controller = controller.clone();
                    let refresh = refresh.clone();
                    let client = client.clone();
                    let handle = Timeout::new(delay_ms, move || {
                        let fetch = controller.borrow_mut().fire(generation);
                        if let (Some(fetch), Some(client)) = (fetch, client) {
                            run_fetch(client, controller, fetch, refresh);
                        }
                    });
                    *timer.borrow_mut() = Some(handle);
                }
            }
            refresh.emit(());
        })
    };

    let load_more = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |_: MouseEvent| {
            let fetch = controller.borrow_mut().load_more();
            if fetch.is_empty() {
                return;
            }
            if let Some(client) = client.clone() {
                run_fetch(client, controller.clone(), fetch, refresh.clone());
            }
            refresh.emit(());
        })
    };

    let state = controller.borrow();
    let results: Vec<Html> = state.results().map(result_item).collect();
    let first_page_loading = state.is_loading() && results.is_empty();

    html! {
        <div class="mx-auto flex max-w-2xl flex-col gap-4">
            <h1 class="text-2xl font-bold">{"Search"}</h1>
            <input
                type="search"
                class="input input-bordered w-full"
                placeholder="Search for users or albums..."
                value={state.query().to_string()}
                autofocus=true
                {oninput}
            />
            {if first_page_loading {
                html! { <div class="flex justify-center"><Spinner /></div> }
            } else {
                html! {}
            }}
            {match state.error() {
                Some(error) => html! { <p class="text-error">{error.to_string()}</p> },
                None => html! {},
            }}
            {if results.is_empty() {
                if state.is_empty_result() {
                    html! { <p class="opacity-70">{"No results found"}</p> }
                } else {
                    html! {}
                }
            } else {
                html! {
                    <>
                        <div class="flex flex-col gap-2">{for results}</div>
                        {if state.has_more() {
                            html! {
                                <button class="btn btn-outline self-center" disabled={state.is_loading()} onclick={load_more}>
                                    {if state.is_loading() { html! { <Spinner /> } } else { html! { "Load More" } }}
                                </button>
                            }
                        } else {
                            html! {}
                        }}
                    </>
                }
            }}
        </div>
    }
}
