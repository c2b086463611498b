use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DeleteConfirmationProps {
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
}

/// Modal asking the user to confirm a delete.
#[function_component(DeleteConfirmation)]
pub(crate) fn delete_confirmation(props: &DeleteConfirmationProps) -> Html {
    let confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let cancel = props.on_cancel.reform(|_: MouseEvent| ());
    html! {
        <div class="modal modal-open" role="dialog" aria-modal="true">
            <div class="modal-box">
                <p>{props.message.clone()}</p>
                <div class="modal-action">
                    <button class="btn btn-error" disabled={props.busy} onclick={confirm}>
                        {if props.busy { "Deleting..." } else { "Delete" }}
                    </button>
                    <button class="btn" disabled={props.busy} onclick={cancel}>{"Cancel"}</button>
                </div>
            </div>
            <div class="modal-backdrop"></div>
        </div>
    }
}
