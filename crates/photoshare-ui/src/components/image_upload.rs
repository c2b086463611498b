use crate::features::create::state::ImageUpload;
use gloo::console;
use gloo::file::{File, ObjectUrl};
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ImageUploadInputProps {
    #[prop_or_default]
    pub disabled: bool,
    /// Emits the read file, or `None` when the selection is cleared.
    pub on_change: Callback<Option<ImageUpload>>,
}

/// File picker with a local preview. The file is read into memory on pick.
#[function_component(ImageUploadInput)]
pub(crate) fn image_upload_input(props: &ImageUploadInputProps) -> Html {
    let preview = use_state(|| None::<Rc<ObjectUrl>>);

    let onchange = {
        let preview = preview.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: Event| {
            let picked = event
                .target_dyn_into::<web_sys::HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
                .map(File::from);
            let Some(file) = picked else {
                preview.set(None);
                on_change.emit(None);
                return;
            };
            preview.set(Some(Rc::new(ObjectUrl::from(file.clone()))));
            let on_change = on_change.clone();
            spawn_local(async move {
                match gloo::file::futures::read_as_bytes(&file).await {
                    Ok(bytes) => on_change.emit(Some(ImageUpload {
                        file_name: file.name(),
                        content_type: file.raw_mime_type(),
                        bytes,
                    })),
                    Err(err) => {
                        console::error!(format!("could not read {}: {err}", file.name()));
                        on_change.emit(None);
                    }
                }
            });
        })
    };

    html! {
        <div class="flex flex-col gap-2">
            <input
                type="file"
                accept="image/*"
                class="file-input file-input-bordered w-full"
                disabled={props.disabled}
                onchange={onchange}
            />
            {match &*preview {
                Some(url) => {
                    let src: &str = url;
                    html! {
                        <img src={src.to_string()} alt="Preview" class="max-h-64 rounded object-contain" />
                    }
                }
                None => html! {},
            }}
        </div>
    }
}
