use crate::app::{ApiCtx, Route};
use crate::components::delete_confirmation::DeleteConfirmation;
use crate::core::backend::Backend;
use crate::core::filters::FeedQuery;
use photoshare_models::Photo;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub(crate) struct PhotoCardProps {
    pub photo: Photo,
    #[prop_or_default]
    pub current_user_id: Option<AttrValue>,
    /// Delete handler; the delete button only shows for the owner when set.
    #[prop_or_default]
    pub on_delete: Option<Callback<Photo>>,
    #[prop_or_default]
    pub deleting: bool,
}

#[function_component(PhotoCard)]
pub(crate) fn photo_card(props: &PhotoCardProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let confirming = use_state(|| false);
    let photo = &props.photo;

    let image_url = match (&api_ctx, photo.path.is_empty()) {
        (Some(ctx), false) => Some(ctx.client.public_url(&photo.user_id, &photo.path)),
        _ => None,
    };
    let can_delete = props.on_delete.is_some()
        && props.current_user_id.as_deref() == Some(photo.user_id.as_str());

    let ask = {
        let confirming = confirming.clone();
        Callback::from(move |_: MouseEvent| confirming.set(true))
    };
    let cancel = {
        let confirming = confirming.clone();
        Callback::from(move |()| confirming.set(false))
    };
    let confirm = {
        let confirming = confirming.clone();
        let on_delete = props.on_delete.clone();
        let photo = photo.clone();
        Callback::from(move |()| {
            confirming.set(false);
            if let Some(on_delete) = &on_delete {
                on_delete.emit(photo.clone());
            }
        })
    };

    let album_link = photo.album_id.map(|album_id| {
        let query = FeedQuery {
            profile: None,
            album: Some(album_id.to_string()),
        };
        html! {
            <Link<Route, FeedQuery> to={Route::Feed} query={Some(query)} classes="link link-hover">
                {format!("📁{}", photo.album_name().unwrap_or("album"))}
            </Link<Route, FeedQuery>>
        }
    });

    html! {
        <div class="card bg-base-100 shadow">
            {match image_url {
                Some(url) => html! {
                    <figure>
                        <a href={url.clone()} target="_blank" title="View full photo">
                            <img src={url} alt={photo.description.clone()} class="w-full object-cover" />
                        </a>
                    </figure>
                },
                None => html! {},
            }}
            <div class="card-body">
                <div class="flex flex-wrap gap-2">
                    <Link<Route> to={Route::Profile { id: photo.user_id.clone() }} classes="link link-hover">
                        {format!("@{}", photo.author_name().unwrap_or("unknown"))}
                    </Link<Route>>
                    {album_link.unwrap_or_default()}
                </div>
                <p class="text-sm opacity-70">
                    {photo.created_at.format("📆%Y-%m-%d ⌚%H:%M").to_string()}
                </p>
                <p>{photo.description.clone()}</p>
                <div class="card-actions justify-end">
                    <Link<Route> to={Route::Comments { photo_id: photo.id.clone() }} classes="btn btn-sm btn-ghost">
                        {"💬 Comments"}
                    </Link<Route>>
                    {if can_delete {
                        html! {
                            <button class="btn btn-sm btn-ghost" aria-label="Delete photo" disabled={props.deleting} onclick={ask}>
                                {if props.deleting { "Deleting..." } else { "🗑️ Delete" }}
                            </button>
                        }
                    } else {
                        html! {}
                    }}
                </div>
            </div>
            {if *confirming {
                html! {
                    <DeleteConfirmation
                        message="Are you sure you want to delete this photo?"
                        on_confirm={confirm}
                        on_cancel={cancel}
                    />
                }
            } else {
                html! {}
            }}
        </div>
    }
}
