use crate::app::ApiCtx;
use crate::components::comment_item::CommentItem;
use crate::core::backend::{Backend, BackendError};
use crate::core::store::AppStore;
use crate::features::comments::api::{add_comment, delete_comment, load_comments, load_photo};
use crate::features::comments::state::CommentThread;
use gloo::dialogs::alert;
use photoshare_models::Photo;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct CommentsPageProps {
    pub photo_id: String,
}

fn skeleton() -> Html {
    html! {
        <div class="flex flex-col gap-4">
            <div class="skeleton h-64 w-full"></div>
            <div class="skeleton h-6 w-1/3"></div>
            <div class="skeleton h-4 w-2/3"></div>
            <h3 class="text-lg font-semibold">{"Comments"}</h3>
            {for (0..3).map(|_| html! { <div class="skeleton h-16 w-full"></div> })}
        </div>
    }
}

/// A photo with its comment thread.
#[function_component(CommentsPage)]
pub(crate) fn comments_page(props: &CommentsPageProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let current_user = use_selector(|store: &AppStore| store.auth.user_id().map(str::to_string));
    let photo = use_state(|| None::<Result<Photo, BackendError>>);
    let thread = use_mut_ref(|| CommentThread::new(props.photo_id.clone()));
    let force = use_force_update();
    let draft = use_state(String::new);
    let submitting = use_state(|| false);
    let submit_error = use_state(|| None::<String>);

    {
        let photo = photo.clone();
        let thread = thread.clone();
        let force = force.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |photo_id: &String| {
                if let Some(client) = client {
                    let photo_id = photo_id.clone();
                    spawn_local(async move {
                        let loaded = load_photo(&*client, &photo_id).await;
                        if let Err(err) = &loaded {
                            tracing::warn!(photo_id = %photo_id, error = %err, "photo load failed");
                        }
                        photo.set(Some(loaded));
                        let comments = load_comments(&*client, &photo_id).await;
                        thread.borrow_mut().apply_loaded(&photo_id, comments);
                        force.force_update();
                    });
                }
                || ()
            },
            props.photo_id.clone(),
        );
    }

    let oninput = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                draft.set(input.value());
            }
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let submitting = submitting.clone();
        let submit_error = submit_error.clone();
        let thread = thread.clone();
        let force = force.clone();
        let current_user = current_user.clone();
        let photo_id = props.photo_id.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (Some(client), Some(author)) = (client.clone(), (*current_user).clone()) else {
                return;
            };
            if draft.trim().is_empty() {
                return;
            }
            submitting.set(true);
            submit_error.set(None);
            let text = (*draft).clone();
            let draft = draft.clone();
            let submitting = submitting.clone();
            let submit_error = submit_error.clone();
            let thread = thread.clone();
            let force = force.clone();
            let photo_id = photo_id.clone();
            spawn_local(async move {
                match add_comment(&*client, &photo_id, &author, &text).await {
                    Ok(comment) => {
                        thread.borrow_mut().push(comment);
                        draft.set(String::new());
                        force.force_update();
                    }
                    Err(err) => submit_error.set(Some(err.to_string())),
                }
                submitting.set(false);
            });
        })
    };

    let on_delete = {
        let thread = thread.clone();
        let force = force.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |comment_id: String| {
            let Some(client) = client.clone() else {
                return;
            };
            let thread = thread.clone();
            let force = force.clone();
            spawn_local(async move {
                match delete_comment(&*client, &comment_id).await {
                    Ok(()) => {
                        thread.borrow_mut().remove(&comment_id);
                        force.force_update();
                    }
                    Err(err) => {
                        tracing::warn!(comment_id = %comment_id, error = %err, "comment delete failed");
                        alert("Failed to delete comment");
                    }
                }
            });
        })
    };

    let thread_state = thread.borrow();
    let photo = match &*photo {
        None => return skeleton(),
        Some(Err(BackendError::NotFound)) => return html! { <div>{"Photo not found"}</div> },
        Some(Err(err)) => return html! { <div class="alert alert-error">{err.to_string()}</div> },
        Some(Ok(photo)) => photo.clone(),
    };
    if thread_state.is_loading() {
        return skeleton();
    }
    let image_url = match (&api_ctx, photo.path.is_empty()) {
        (Some(ctx), false) => Some(ctx.client.public_url(&photo.user_id, &photo.path)),
        _ => None,
    };
    let current_user_id = (*current_user).clone().map(AttrValue::from);

    html! {
        <div class="flex flex-col gap-6">
            <section class="flex flex-col gap-2">
                {match image_url {
                    Some(url) => html! { <img src={url} alt={photo.description.clone()} class="max-h-[32rem] w-full rounded object-contain" /> },
                    None => html! {},
                }}
                <h2 class="text-xl font-semibold">
                    {format!("Posted by @{}", photo.author_name().unwrap_or("unknown"))}
                </h2>
                <time class="text-sm opacity-70">{photo.created_at.format("%Y-%m-%d %H:%M").to_string()}</time>
                <p>{photo.description.clone()}</p>
            </section>
            <section class="flex flex-col gap-3">
                <h3 class="text-lg font-semibold">{"Comments"}</h3>
                {match thread_state.error() {
                    Some(error) => html! { <div class="alert alert-error">{error.to_string()}</div> },
                    None => html! {},
                }}
                {if thread_state.comments().is_empty() && thread_state.error().is_none() {
                    html! { <p class="opacity-70">{"No comments yet. Be the first person to comment on this post."}</p> }
                } else {
                    html! {}
                }}
                {for thread_state.comments().iter().map(|comment| html! {
                    <CommentItem
                        key={comment.id.clone()}
                        comment={comment.clone()}
                        current_user_id={current_user_id.clone()}
                        on_delete={on_delete.clone()}
                    />
                })}
                {if current_user_id.is_some() {
                    html! {
                        <form class="flex gap-2" {onsubmit}>
                            <input
                                type="text"
                                class="input input-bordered flex-1"
                                placeholder="Add a comment..."
                                value={(*draft).clone()}
                                disabled={*submitting}
                                {oninput}
                            />
                            <button type="submit" class="btn btn-primary" disabled={*submitting || draft.trim().is_empty()}>
                                {"Post"}
                            </button>
                        </form>
                    }
                } else {
                    html! {}
                }}
                {match &*submit_error {
                    Some(error) => html! { <p class="text-error">{error.clone()}</p> },
                    None => html! {},
                }}
            </section>
        </div>
    }
}
