use crate::components::delete_confirmation::DeleteConfirmation;
use photoshare_models::Comment;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct CommentItemProps {
    pub comment: Comment,
    #[prop_or_default]
    pub current_user_id: Option<AttrValue>,
    pub on_delete: Callback<String>,
}

#[function_component(CommentItem)]
pub(crate) fn comment_item(props: &CommentItemProps) -> Html {
    let confirming = use_state(|| false);
    let comment = &props.comment;
    let own = props.current_user_id.as_deref() == Some(comment.user_id.as_str());

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
        let id = comment.id.clone();
        Callback::from(move |()| {
            confirming.set(false);
            on_delete.emit(id.clone());
        })
    };

    html! {
        <div class="card bg-base-200">
            <div class="card-body p-4">
                <strong>{format!("@{}", comment.author_name().unwrap_or("unknown"))}</strong>
                <p class="whitespace-pre-wrap">{comment.text.clone()}</p>
                <div class="flex items-center justify-between text-sm opacity-70">
                    <time>{comment.created_at.format("%Y-%m-%d %H:%M").to_string()}</time>
                    {if own {
                        html! {
                            <button class="btn btn-ghost btn-xs" aria-label="Delete comment" onclick={ask}>
                                {"Delete"}
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
                        message="Are you sure you want to delete this comment?"
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
