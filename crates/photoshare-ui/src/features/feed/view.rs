use crate::app::{Route, now_ms};
use crate::core::filters::{FeedFilters, FeedQuery};
use crate::core::store::AppStore;
use crate::features::feed::state::{FeedUrlSync, UrlWrite};
use crate::features::photos::view::PhotoList;
use gloo::console;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

fn write_query(
    navigator: Option<&Navigator>,
    last_written: &RefCell<Option<FeedQuery>>,
    query: FeedQuery,
) {
    if last_written.borrow().as_ref() == Some(&query) {
        return;
    }
    let Some(navigator) = navigator else {
        return;
    };
    let result = if query == FeedQuery::default() {
        navigator.replace(&Route::Feed);
        Ok(())
    } else {
        navigator.replace_with_query(&Route::Feed, &query)
    };
    match result {
        Ok(()) => *last_written.borrow_mut() = Some(query),
        Err(err) => console::error!(format!("feed url update failed: {err}")),
    }
}

fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<web_sys::HtmlInputElement>()
        .map(|input| input.value())
}

/// Feed with owner and album filters mirrored into the URL.
#[function_component(FeedPage)]
pub(crate) fn feed_page() -> Html {
    let navigator = use_navigator();
    let location = use_location();
    let url_query = location
        .as_ref()
        .and_then(|location| location.query::<FeedQuery>().ok())
        .unwrap_or_default();
    let current_user = use_selector(|store: &AppStore| store.auth.user_id().map(str::to_string));

    let user_text = {
        let initial = url_query.profile.clone();
        use_state(move || initial.unwrap_or_default())
    };
    let album_text = {
        let initial = url_query.album.clone();
        use_state(move || initial.unwrap_or_default())
    };
    let sync = use_mut_ref(FeedUrlSync::default);
    let timer = use_mut_ref(|| None::<Timeout>);
    let last_written = use_mut_ref(|| None::<FeedQuery>);

    let filters = FeedFilters::new(Some(user_text.as_str()), Some(album_text.as_str()));

    {
        let sync = sync.clone();
        let timer = timer.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    timer.borrow_mut().take();
                    sync.borrow_mut().cancel();
                }
            },
            (),
        );
    }
    {
        // Navigation from outside this page (album links, back button).
        let sync = sync.clone();
        let timer = timer.clone();
        let last_written = last_written.clone();
        let user_text = user_text.clone();
        let album_text = album_text.clone();
        use_effect_with_deps(
            move |url_query: &FeedQuery| {
                if last_written.borrow().as_ref() != Some(url_query) {
                    let incoming = FeedFilters::from_query(url_query);
                    user_text.set(incoming.user_id.clone().unwrap_or_default());
                    album_text.set(incoming.album_id.clone().unwrap_or_default());
                    timer.borrow_mut().take();
                    *sync.borrow_mut() = FeedUrlSync::new(incoming);
                    *last_written.borrow_mut() = Some(url_query.clone());
                }
                || ()
            },
            url_query,
        );
    }
    {
        let navigator = navigator.clone();
        use_effect_with_deps(
            move |filters: &FeedFilters| {
                let decision = sync.borrow_mut().update(filters.clone(), now_ms());
                match decision {
                    UrlWrite::Now(query) => write_query(navigator.as_ref(), &last_written, query),
                    UrlWrite::After { delay_ms } => {
                        let sync = Rc::clone(&sync);
                        let last_written = Rc::clone(&last_written);
                        let handle = Timeout::new(delay_ms, move || {
                            let query = sync.borrow_mut().flush(now_ms());
                            write_query(navigator.as_ref(), &last_written, query);
                        });
                        *timer.borrow_mut() = Some(handle);
                    }
                    UrlWrite::Pending => {}
                }
                || ()
            },
            filters.clone(),
        );
    }

    let on_user_input = {
        let user_text = user_text.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                user_text.set(value);
            }
        })
    };
    let on_album_input = {
        let album_text = album_text.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                album_text.set(value);
            }
        })
    };

    html! {
        <div class="flex flex-col gap-4">
            <h1 class="text-2xl font-bold">{"Photo Feed"}</h1>
            <div class="flex flex-wrap gap-2">
                <input
                    type="text"
                    class="input input-bordered"
                    placeholder="Filter by user ID..."
                    value={(*user_text).clone()}
                    oninput={on_user_input}
                />
                <input
                    type="text"
                    class="input input-bordered"
                    placeholder="Filter by album ID..."
                    value={(*album_text).clone()}
                    oninput={on_album_input}
                />
            </div>
            <PhotoList
                filters={filters}
                current_user_id={(*current_user).clone().map(AttrValue::from)}
            />
        </div>
    }
}
