use crate::app::ApiCtx;
use crate::components::photo_card::PhotoCard;
use crate::components::spinner::Spinner;
use crate::core::filters::FeedFilters;
use crate::core::paging::{ApplyOutcome, FEED_PAGE_SIZE, FetchTicket, PagedList};
use crate::features::photos::api::{delete_photo, fetch_page, forget_photo};
use crate::services::supabase::SupabaseClient;
use gloo::dialogs::alert;
use photoshare_models::Photo;
use std::cell::RefCell;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

type PhotoPages = PagedList<Photo, FeedFilters>;

#[derive(Properties, PartialEq)]
pub(crate) struct PhotoListProps {
    pub filters: FeedFilters,
    #[prop_or_default]
    pub current_user_id: Option<AttrValue>,
    /// Receives the reported total after every applied page or delete.
    #[prop_or_default]
    pub on_total: Option<Callback<Option<u64>>>,
    /// Receives each photo once its delete succeeded.
    #[prop_or_default]
    pub on_deleted: Option<Callback<Photo>>,
}

fn spawn_fetch(
    client: Rc<SupabaseClient>,
    list: Rc<RefCell<PhotoPages>>,
    ticket: FetchTicket<FeedFilters>,
    refresh: Callback<()>,
) {
    refresh.emit(());
    spawn_local(async move {
        let result = fetch_page(&*client, &ticket).await;
        let outcome = list.borrow_mut().apply(&ticket, result);
        if outcome == ApplyOutcome::Applied {
            refresh.emit(());
        }
    });
}

/// Paginated photo grid with load-more and owner deletes.
#[function_component(PhotoList)]
pub(crate) fn photo_list(props: &PhotoListProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let list = use_mut_ref(|| PhotoPages::new(FEED_PAGE_SIZE, props.filters.clone()));
    let force = use_force_update();
    let deleting = use_state(|| None::<String>);

    let refresh = {
        let list = list.clone();
        let on_total = props.on_total.clone();
        Callback::from(move |()| {
            if let Some(on_total) = &on_total {
                on_total.emit(list.borrow().total());
            }
            force.force_update();
        })
    };

    {
        let list = list.clone();
        use_effect_with_deps(
            move |_| move || list.borrow_mut().cancel(),
            (),
        );
    }
    {
        let list = list.clone();
        let refresh = refresh.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |filters: &FeedFilters| {
                let ticket = list.borrow_mut().set_filters(filters.clone());
                if let Some(client) = client {
                    spawn_fetch(client, list, ticket, refresh);
                }
                || ()
            },
            props.filters.clone(),
        );
    }

    let load_more = {
        let list = list.clone();
        let refresh = refresh.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |_: MouseEvent| {
            let ticket = list.borrow_mut().load_more();
            if let (Some(ticket), Some(client)) = (ticket, client.clone()) {
                spawn_fetch(client, list.clone(), ticket, refresh.clone());
            }
        })
    };

    let on_delete = {
        let list = list.clone();
        let refresh = refresh.clone();
        let deleting = deleting.clone();
        let on_deleted = props.on_deleted.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |photo: Photo| {
            let Some(client) = client.clone() else {
                return;
            };
            deleting.set(Some(photo.id.clone()));
            let list = list.clone();
            let refresh = refresh.clone();
            let deleting = deleting.clone();
            let on_deleted = on_deleted.clone();
            spawn_local(async move {
                match delete_photo(&*client, &photo).await {
                    Ok(()) => {
                        forget_photo(&mut list.borrow_mut(), &photo.id);
                        refresh.emit(());
                        if let Some(on_deleted) = &on_deleted {
                            on_deleted.emit(photo);
                        }
                    }
                    Err(err) => alert(&format!("Failed to delete photo: {err}")),
                }
                deleting.set(None);
            });
        })
    };

    let state = list.borrow();
    html! {
        <div class="flex flex-col gap-4">
            {match state.error() {
                Some(error) => html! { <div class="alert alert-error">{format!("Error: {error}")}</div> },
                None => html! {},
            }}
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {for state.items().iter().map(|photo| html! {
                    <PhotoCard
                        key={photo.id.clone()}
                        photo={photo.clone()}
                        current_user_id={props.current_user_id.clone()}
                        on_delete={Some(on_delete.clone())}
                        deleting={deleting.as_deref() == Some(photo.id.as_str())}
                    />
                })}
            </div>
            {if !state.is_loading() && state.items().is_empty() && state.error().is_none() {
                html! { <p class="opacity-70">{"No photos yet."}</p> }
            } else {
                html! {}
            }}
            {if state.is_loading() {
                html! { <div class="flex justify-center"><Spinner /></div> }
            } else if state.has_more() {
                html! {
                    <button
                        class="btn btn-outline self-center"
                        title="Load more photos"
                        aria-label="Load more photos"
                        onclick={load_more}
                    >{"Load More"}</button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
