use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AvatarProps {
    /// Image URL; the initial is shown when absent.
    #[prop_or_default]
    pub src: Option<AttrValue>,
    pub initial: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Avatar)]
pub(crate) fn avatar(props: &AvatarProps) -> Html {
    match &props.src {
        Some(src) => html! {
            <div class={classes!("avatar", props.class.clone())}>
                <div class="w-20 h-20 rounded-full ring ring-offset-base-100 ring-offset-2">
                    <img src={src.clone()} alt="Profile avatar" />
                </div>
            </div>
        },
        None => html! {
            <div class={classes!("avatar", "placeholder", props.class.clone())}>
                <div class="w-20 h-20 rounded-full bg-neutral text-neutral-content">
                    <span class="text-3xl">{props.initial.clone()}</span>
                </div>
            </div>
        },
    }
}
