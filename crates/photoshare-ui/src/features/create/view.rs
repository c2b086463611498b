use crate::app::{ApiCtx, Route};
use crate::components::album_select::AlbumSelect;
use crate::components::image_upload::ImageUploadInput;
use crate::components::spinner::Spinner;
use crate::core::store::AppStore;
use crate::features::create::api::{create_album, create_post, load_albums};
use crate::features::create::state::{AlbumChoice, ImageUpload, PostDraft};
use photoshare_models::Album;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::use_navigator;
use yewdux::prelude::use_selector;

/// New post form: description, optional image and optional album.
#[function_component(CreatePage)]
pub(crate) fn create_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let owner = use_selector(|store: &AppStore| store.auth.user_id().map(str::to_string));
    let description = use_state(String::new);
    let image = use_state(|| None::<ImageUpload>);
    let albums = use_state(Vec::<Album>::new);
    let album = use_state(AlbumChoice::default);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let albums = albums.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |owner: &Option<String>| {
                if let (Some(client), Some(owner)) = (client, owner.clone()) {
                    spawn_local(async move {
                        match load_albums(&*client, &owner).await {
                            Ok(loaded) => albums.set(loaded),
                            Err(err) => tracing::warn!(error = %err, "album list failed"),
                        }
                    });
                }
                || ()
            },
            (*owner).clone(),
        );
    }

    let on_description = {
        let description = description.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                description.set(input.value());
            }
        })
    };
    let on_image = {
        let image = image.clone();
        Callback::from(move |picked: Option<ImageUpload>| image.set(picked))
    };
    let on_album = {
        let album = album.clone();
        let albums = albums.clone();
        let busy = busy.clone();
        let error = error.clone();
        let owner = owner.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |choice: AlbumChoice| {
            let AlbumChoice::New(name) = choice else {
                album.set(choice);
                return;
            };
            let (Some(client), Some(owner)) = (client.clone(), (*owner).clone()) else {
                return;
            };
            busy.set(true);
            let album = album.clone();
            let albums = albums.clone();
            let busy = busy.clone();
            let error = error.clone();
            spawn_local(async move {
                match create_album(&*client, &owner, &name).await {
                    Ok(created) => {
                        album.set(AlbumChoice::Existing(created.id));
                        let mut next = (*albums).clone();
                        next.push(created);
                        albums.set(next);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        })
    };

    let onsubmit = {
        let description = description.clone();
        let image = image.clone();
        let album = album.clone();
        let busy = busy.clone();
        let error = error.clone();
        let owner = owner.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (Some(client), Some(owner)) = (client.clone(), (*owner).clone()) else {
                return;
            };
            let draft = PostDraft {
                description: (*description).clone(),
                album: (*album).clone(),
                image: (*image).clone(),
            };
            busy.set(true);
            error.set(None);
            let busy = busy.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match create_post(&*client, &owner, &draft).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Feed);
                        }
                    }
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    if owner.is_none() {
        return html! {};
    }

    html! {
        <div class="mx-auto flex max-w-xl flex-col gap-4">
            <h2 class="text-xl font-bold">{"Create New Post"}</h2>
            <form class="flex flex-col gap-4" {onsubmit}>
                <label class="form-control">
                    <span class="label-text">{"Description:"}</span>
                    <input
                        type="text"
                        class="input input-bordered"
                        required=true
                        value={(*description).clone()}
                        disabled={*busy}
                        oninput={on_description}
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">{"Image:"}</span>
                    <ImageUploadInput disabled={*busy} on_change={on_image} />
                </label>
                <div class="form-control">
                    <span class="label-text">{"Album:"}</span>
                    <AlbumSelect albums={(*albums).clone()} disabled={*busy} on_select={on_album} />
                </div>
                {match &*error {
                    Some(message) => html! { <p class="text-error">{message.clone()}</p> },
                    None => html! {},
                }}
                <button type="submit" class="btn btn-primary" disabled={*busy}>
                    {if *busy {
                        html! { <><Spinner />{" Uploading..."}</> }
                    } else {
                        html! { "Create Post" }
                    }}
                </button>
            </form>
        </div>
    }
}
