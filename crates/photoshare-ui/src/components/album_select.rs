use crate::features::create::state::{AlbumChoice, AlbumOption, album_options};
use photoshare_models::Album;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AlbumSelectProps {
    pub albums: Vec<Album>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_select: Callback<AlbumChoice>,
}

/// Type-ahead album picker. Typing a name that does not exist offers to
/// create it.
#[function_component(AlbumSelect)]
pub(crate) fn album_select(props: &AlbumSelectProps) -> Html {
    let typed = use_state(String::new);
    let open = use_state(|| false);

    let oninput = {
        let typed = typed.clone();
        let open = open.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                typed.set(input.value());
                open.set(true);
            }
        })
    };
    let onfocus = {
        let open = open.clone();
        Callback::from(move |_: FocusEvent| open.set(true))
    };
    let onblur = {
        let open = open.clone();
        Callback::from(move |_: FocusEvent| open.set(false))
    };

    let pick = |option: AlbumOption| {
        let typed = typed.clone();
        let open = open.clone();
        let on_select = props.on_select.clone();
        // mousedown fires before the input loses focus
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            open.set(false);
            match &option {
                AlbumOption::Hint => {}
                AlbumOption::Create(name) => {
                    typed.set(name.clone());
                    on_select.emit(AlbumChoice::New(name.clone()));
                }
                AlbumOption::NoAlbum => {
                    typed.set(String::new());
                    on_select.emit(AlbumChoice::None);
                }
                AlbumOption::Existing { id, name } => {
                    typed.set(name.clone());
                    on_select.emit(AlbumChoice::Existing(*id));
                }
            }
        })
    };

    let options = album_options(&props.albums, &typed);

    html! {
        <div class="dropdown w-full" onfocusout={onblur}>
            <input
                type="text"
                class="input input-bordered w-full"
                placeholder="Select an album or type a new name"
                value={(*typed).clone()}
                disabled={props.disabled}
                {oninput}
                {onfocus}
            />
            {if *open && !props.disabled {
                html! {
                    <ul class="dropdown-content menu bg-base-200 rounded-box z-10 w-full shadow">
                        {for options.into_iter().map(|option| {
                            let label = match &option {
                                AlbumOption::Hint => "ℹ️ Type a name to create a new album".to_string(),
                                AlbumOption::Create(name) => format!("Create \"{name}\""),
                                AlbumOption::NoAlbum => "No album".to_string(),
                                AlbumOption::Existing { name, .. } => name.clone(),
                            };
                            let hint = matches!(option, AlbumOption::Hint);
                            html! {
                                <li class={classes!(hint.then_some("disabled"))}>
                                    <a onmousedown={pick(option)}>{label}</a>
                                </li>
                            }
                        })}
                    </ul>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
