use super::super::Model;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::has_accepted_extension;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// First JPG/JPEG/PNG in the list; single-image analysis only.
pub fn extract_image_file(file_list: &FileList) -> Result<GlooFile, String> {
    let mut skipped = Vec::new();
    for file in (0..file_list.length()).filter_map(|i| file_list.item(i)) {
        if has_accepted_extension(&file.name()) {
            return Ok(GlooFile::from(file));
        }
        skipped.push(file.name());
    }

    if skipped.is_empty() {
        Err("No file selected.".to_string())
    } else {
        Err(format!(
            "Unsupported file: {}. Please upload a JPG, JPEG or PNG image.",
            skipped.join(", ")
        ))
    }
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = &model.error {
        html! {
            <div class="error-message">
                <span>{"⚠️"}</span>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}
