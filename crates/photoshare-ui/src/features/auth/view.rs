use crate::app::{ApiCtx, Route, now_secs};
use crate::core::auth::{AuthEvent, MIN_PASSWORD_LEN};
use crate::core::store::AppStore;
use crate::features::auth::api::{SignUpOutcome, sign_in, sign_up};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::Dispatch;

fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
            handle.set(input.value());
        }
    })
}

fn error_line(error: &Option<String>) -> Html {
    match error {
        Some(message) => html! { <p class="text-error">{message.clone()}</p> },
        None => html! {},
    }
}

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(client) = client.clone() else {
                return;
            };
            error.set(None);
            busy.set(true);
            let email = (*email).clone();
            let password = (*password).clone();
            let error = error.clone();
            let busy = busy.clone();
            spawn_local(async move {
                match sign_in(&*client, &email, &password, now_secs()).await {
                    Ok(session) => Dispatch::<AppStore>::new()
                        .reduce_mut(|store| store.auth.apply(AuthEvent::SignedIn(session))),
                    Err(message) => {
                        error.set(Some(message));
                        busy.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="mx-auto mt-16 flex max-w-sm flex-col gap-4">
            <h2 class="text-2xl font-bold">{"Login"}</h2>
            <form class="flex flex-col gap-3" {onsubmit}>
                <label class="form-control">
                    <span class="label-text">{"Email:"}</span>
                    <input type="email" class="input input-bordered" required=true
                        value={(*email).clone()} oninput={bind_input(&email)} />
                </label>
                <label class="form-control">
                    <span class="label-text">{"Password:"}</span>
                    <input type="password" class="input input-bordered" required=true
                        value={(*password).clone()} oninput={bind_input(&password)} />
                </label>
                {error_line(&error)}
                <button type="submit" class="btn btn-primary" disabled={*busy}>{"Login"}</button>
            </form>
            <p class="text-sm">
                {"No account yet? "}
                <Link<Route> to={Route::Register} classes="link link-primary">{"Register"}</Link<Route>>
            </p>
        </div>
    }
}

#[function_component(RegisterPage)]
pub(crate) fn register_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let display_name = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let pending_confirmation = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let display_name = display_name.clone();
        let error = error.clone();
        let busy = busy.clone();
        let pending_confirmation = pending_confirmation.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(client) = client.clone() else {
                return;
            };
            error.set(None);
            busy.set(true);
            let email = (*email).clone();
            let password = (*password).clone();
            let display_name = (*display_name).clone();
            let error = error.clone();
            let busy = busy.clone();
            let pending_confirmation = pending_confirmation.clone();
            spawn_local(async move {
                match sign_up(&*client, &email, &password, &display_name, now_secs()).await {
                    Ok(SignUpOutcome::SignedIn(session)) => Dispatch::<AppStore>::new()
                        .reduce_mut(|store| store.auth.apply(AuthEvent::SignedIn(session))),
                    Ok(SignUpOutcome::ConfirmationPending) => {
                        pending_confirmation.set(true);
                        busy.set(false);
                    }
                    Err(message) => {
                        error.set(Some(message));
                        busy.set(false);
                    }
                }
            });
        })
    };

    if *pending_confirmation {
        return html! {
            <div class="mx-auto mt-16 flex max-w-sm flex-col gap-4">
                <h2 class="text-2xl font-bold">{"Check your inbox"}</h2>
                <p>{"Confirm your email address, then sign in."}</p>
                <Link<Route> to={Route::Login} classes="btn btn-primary">{"Go to login"}</Link<Route>>
            </div>
        };
    }

    html! {
        <div class="mx-auto mt-16 flex max-w-sm flex-col gap-4">
            <h2 class="text-2xl font-bold">{"Register"}</h2>
            <form class="flex flex-col gap-3" {onsubmit}>
                <label class="form-control">
                    <span class="label-text">{"Email:"}</span>
                    <input type="email" class="input input-bordered" required=true
                        value={(*email).clone()} oninput={bind_input(&email)} />
                </label>
                <label class="form-control">
                    <span class="label-text">{"Password:"}</span>
                    <input type="password" class="input input-bordered" required=true
                        minlength={MIN_PASSWORD_LEN.to_string()}
                        value={(*password).clone()} oninput={bind_input(&password)} />
                </label>
                <label class="form-control">
                    <span class="label-text">{"Display name:"}</span>
                    <input type="text" class="input input-bordered" required=true
                        value={(*display_name).clone()} oninput={bind_input(&display_name)} />
                </label>
                {error_line(&error)}
                <button type="submit" class="btn btn-primary" disabled={*busy}>{"Register"}</button>
            </form>
            <p class="text-sm">
                {"Already registered? "}
                <Link<Route> to={Route::Login} classes="link link-primary">{"Login"}</Link<Route>>
            </p>
        </div>
    }
}
