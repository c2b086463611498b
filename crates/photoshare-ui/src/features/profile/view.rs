use crate::app::{ApiCtx, Route};
use crate::components::avatar::Avatar;
use crate::components::spinner::Spinner;
use crate::core::backend::Backend;
use crate::core::filters::{FeedFilters, FeedQuery};
use crate::core::store::AppStore;
use crate::features::photos::view::PhotoList;
use crate::features::profile::api::{load_profile, update_display_name};
use crate::features::profile::state::{ProfileBundle, ProfileState};
use photoshare_models::Photo;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ProfilePageProps {
    /// Profile to show; the signed-in user's own profile when `None`.
    #[prop_or_default]
    pub profile_id: Option<String>,
}

fn album_grid(api_ctx: Option<&ApiCtx>, bundle: &ProfileBundle) -> Html {
    if bundle.albums.is_empty() {
        return html! {};
    }
    let owner = &bundle.profile.id;
    html! {
        <section class="flex flex-col gap-2">
            <h3 class="text-lg font-semibold">{"Albums"}</h3>
            <div class="grid grid-cols-2 gap-3 md:grid-cols-4">
                {for bundle.albums.iter().map(|album| {
                    let preview = album
                        .preview_path()
                        .zip(api_ctx)
                        .map(|(path, ctx)| ctx.client.public_url(owner, path));
                    let query = FeedQuery {
                        profile: None,
                        album: Some(album.id.to_string()),
                    };
                    html! {
                        <Link<Route, FeedQuery> key={album.id.to_string()} to={Route::Feed} query={Some(query)} classes="card bg-base-200 hover:bg-base-300">
                            <figure class="h-32">
                                {match preview {
                                    Some(url) => html! { <img src={url} alt={album.name.clone()} class="h-full w-full object-cover" /> },
                                    None => html! { <span class="text-4xl">{"📁"}</span> },
                                }}
                            </figure>
                            <div class="card-body p-3">
                                <h4 class="font-semibold">{album.name.clone()}</h4>
                                <span class="text-sm opacity-70">{format!("{} photos", album.photo_count())}</span>
                            </div>
                        </Link<Route, FeedQuery>>
                    }
                })}
            </div>
        </section>
    }
}

/// Profile header, albums and the owner's photos.
#[function_component(ProfilePage)]
pub(crate) fn profile_page(props: &ProfilePageProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let current_user = use_selector(|store: &AppStore| store.auth.user_id().map(str::to_string));
    let profile_id = props
        .profile_id
        .clone()
        .or_else(|| (*current_user).clone());
    let state = use_state(ProfileState::default);
    let photo_total = use_state(|| None::<u64>);
    let editing = use_state(|| false);
    let name_draft = use_state(String::new);
    let edit_error = use_state(|| None::<String>);

    {
        let state = state.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |profile_id: &Option<String>| {
                if let (Some(client), Some(id)) = (client, profile_id.clone()) {
                    state.set(ProfileState::Loading);
                    spawn_local(async move {
                        let result = load_profile(&*client, &id).await;
                        if let Err(err) = &result {
                            tracing::warn!(profile_id = %id, error = %err, "profile load failed");
                        }
                        state.set(ProfileState::from_result(result));
                    });
                }
                || ()
            },
            profile_id.clone(),
        );
    }

    let Some(profile_id) = profile_id else {
        return html! { <div class="alert alert-error">{"User not found"}</div> };
    };
    let bundle = match &*state {
        ProfileState::Loading => {
            return html! { <div class="flex justify-center p-8"><Spinner /></div> };
        }
        ProfileState::NotFound => {
            return html! {
                <div class="hero min-h-[50vh]">
                    <div class="hero-content text-center">
                        <h1 class="text-2xl font-bold">{"Profile not found"}</h1>
                    </div>
                </div>
            };
        }
        ProfileState::Failed(message) => {
            return html! { <div class="alert alert-error">{message.clone()}</div> };
        }
        ProfileState::Ready(bundle) => bundle.clone(),
    };
    let own = current_user.as_deref() == Some(profile_id.as_str());

    let on_total = {
        let photo_total = photo_total.clone();
        Callback::from(move |total: Option<u64>| photo_total.set(total))
    };
    let on_deleted = {
        let state = state.clone();
        let profile_id = profile_id.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |photo: Photo| {
            let mut patched = (*state).clone();
            patched.photo_removed(&photo);
            state.set(patched);
            let Some(client) = client.clone() else {
                return;
            };
            let state = state.clone();
            let profile_id = profile_id.clone();
            spawn_local(async move {
                match load_profile(&*client, &profile_id).await {
                    Ok(bundle) => state.set(ProfileState::Ready(bundle)),
                    Err(err) => {
                        tracing::warn!(profile_id = %profile_id, error = %err, "album refresh failed");
                    }
                }
            });
        })
    };
    let start_edit = {
        let editing = editing.clone();
        let name_draft = name_draft.clone();
        let edit_error = edit_error.clone();
        let current = bundle.profile.display_name.clone();
        Callback::from(move |_: MouseEvent| {
            name_draft.set(current.clone());
            edit_error.set(None);
            editing.set(true);
        })
    };
    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };
    let on_name_input = {
        let name_draft = name_draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                name_draft.set(input.value());
            }
        })
    };
    let save = {
        let state = state.clone();
        let editing = editing.clone();
        let name_draft = name_draft.clone();
        let edit_error = edit_error.clone();
        let profile_id = profile_id.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |_: MouseEvent| {
            let Some(client) = client.clone() else {
                return;
            };
            let state = state.clone();
            let editing = editing.clone();
            let edit_error = edit_error.clone();
            let profile_id = profile_id.clone();
            let requested = (*name_draft).clone();
            spawn_local(async move {
                match update_display_name(&*client, &profile_id, &requested).await {
                    Ok(stored) => {
                        let mut next = (*state).clone();
                        next.rename(&stored);
                        state.set(next);
                        editing.set(false);
                    }
                    Err(err) => edit_error.set(Some(err.to_string())),
                }
            });
        })
    };

    let avatar_url = bundle
        .profile
        .avatar_url
        .as_deref()
        .filter(|path| !path.is_empty())
        .zip(api_ctx.as_ref())
        .map(|(path, ctx)| AttrValue::from(ctx.client.public_url(&profile_id, path)));

    html! {
        <div class="flex flex-col gap-6">
            <header class="flex flex-wrap items-center justify-between gap-4">
                <div class="flex items-center gap-4">
                    <Avatar src={avatar_url} initial={bundle.profile.initial()} />
                    {if own && *editing {
                        html! {
                            <div class="flex flex-col gap-2">
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    placeholder="Display name"
                                    value={(*name_draft).clone()}
                                    oninput={on_name_input}
                                />
                                <div class="flex gap-2">
                                    <button class="btn btn-primary btn-sm" onclick={save}>{"Save"}</button>
                                    <button class="btn btn-sm" onclick={cancel_edit}>{"Cancel"}</button>
                                </div>
                                {match &*edit_error {
                                    Some(message) => html! { <p class="text-error">{message.clone()}</p> },
                                    None => html! {},
                                }}
                            </div>
                        }
                    } else {
                        html! {
                            <div class="flex flex-col gap-2">
                                <h2 class="text-2xl font-bold">{bundle.profile.display_name.clone()}</h2>
                                {if own {
                                    html! { <button class="btn btn-sm" onclick={start_edit}>{"Edit Profile"}</button> }
                                } else {
                                    html! {}
                                }}
                            </div>
                        }
                    }}
                </div>
                <div class="stats shadow">
                    <div class="stat">
                        <div class="stat-value text-lg">{photo_total.map_or_else(|| "-".to_string(), |total| total.to_string())}</div>
                        <div class="stat-desc">{"photos"}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-value text-lg">{bundle.albums.len().to_string()}</div>
                        <div class="stat-desc">{"albums"}</div>
                    </div>
                </div>
            </header>
            {album_grid(api_ctx.as_ref(), &bundle)}
            <PhotoList
                filters={FeedFilters::for_user(&profile_id)}
                current_user_id={(*current_user).clone().map(AttrValue::from)}
                on_total={Some(on_total)}
                on_deleted={Some(on_deleted)}
            />
        </div>
    }
}
