use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SpinnerProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(AttrValue::Static("Loading"))]
    pub label: AttrValue,
}

#[function_component(Spinner)]
pub(crate) fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <span
            class={classes!("loading", "loading-spinner", "loading-md", props.class.clone())}
            role="progressbar"
            aria-busy="true"
            aria-label={props.label.clone()}
        />
    }
}
