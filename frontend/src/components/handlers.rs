use super::super::{ContactStatus, Model, Msg, SelectedImage};
use crate::api::{self, ApiError};
use crate::components::utils::extract_image_file;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{CONTACT_MISSING_FIELDS, InferenceResponse};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    model.error = None;
    model.result = None;

    let preview_url = ObjectUrl::from(file.clone());
    model.image = Some(SelectedImage {
        file,
        preview_url: None,
    });
    ctx.link().send_message(Msg::AddPreview(preview_url));

    true
}

pub fn handle_add_preview(model: &mut Model, url: ObjectUrl) -> bool {
    if let Some(image) = model.image.as_mut() {
        image.preview_url = Some(url);
        true
    } else {
        false
    }
}

pub fn handle_clear_image(model: &mut Model) -> bool {
    model.image = None;
    model.result = None;
    model.error = None;
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    match extract_image_file(&file_list) {
        Ok(file) => ctx.link().send_message(Msg::FileChosen(file)),
        Err(message) => {
            log::warn!("{}", message);
            ctx.link().send_message(Msg::SetError(Some(message)));
        }
    }
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(file) = model.image.as_ref().map(|image| image.file.clone()) else {
        ctx.link()
            .send_message(Msg::SetError(Some("No file selected for analysis.".into())));
        return false;
    };
    if model.loading {
        return false;
    }

    model.loading = true;
    model.error = None;
    send_analysis_request(ctx, file);
    true
}

pub fn handle_inference_result(model: &mut Model, response: InferenceResponse) -> bool {
    log::info!(
        "Request {} classified as {}",
        response.request_id,
        response.severity.name()
    );
    model.result = Some(response);
    model.loading = false;
    true
}

pub fn send_analysis_request(ctx: &Context<Model>, file: GlooFile) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::analyze_image(&file).await {
            Ok(results) => link.send_message(Msg::InferenceResult(results)),
            Err(e) => {
                log::error!("Analysis failed: {}", e.message());
                link.send_message(Msg::SetError(Some(e.message().to_string())))
            }
        }
    });
}

pub fn handle_submit_contact(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.contact.validate().is_err() {
        model.contact_status = Some(ContactStatus::Warning(CONTACT_MISSING_FIELDS.to_string()));
        return true;
    }

    model.contact_sending = true;
    model.contact_status = None;

    let form = model.contact.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let status = match api::send_contact(&form).await {
            Ok(response) => ContactStatus::Sent(response.message),
            Err(ApiError::Rejected(message)) => ContactStatus::Warning(message),
            Err(ApiError::Failed(message)) => ContactStatus::Failed(message),
        };
        link.send_message(Msg::ContactFinished(status));
    });

    true
}

pub fn handle_contact_finished(model: &mut Model, status: ContactStatus) -> bool {
    model.contact_sending = false;
    if matches!(status, ContactStatus::Sent(_)) {
        model.contact = Default::default();
    }
    model.contact_status = Some(status);
    true
}
