mod api;
mod components;

use components::about::render_about_page;
use components::contact_form::render_contact_page;
use components::handlers;
use components::header::render_header;
use components::navigation::render_sidebar;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ContactField, ContactForm, ContactSubject, InferenceResponse};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

const LANDING_IMAGE_URL: &str =
    "https://wiseyak.com/wp-content/uploads/2025/03/eye-scan-7412898-scaled.jpg";

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Contact,
}

// Models
pub struct SelectedImage {
    pub file: GlooFile,
    pub preview_url: Option<ObjectUrl>,
}

#[derive(Clone, PartialEq)]
pub enum ContactStatus {
    Sent(String),
    Warning(String),
    Failed(String),
}

pub enum Msg {
    Navigate(Page),

    // Upload
    FileChosen(GlooFile),
    AddPreview(ObjectUrl),
    ClearImage,
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
    SetDragging(bool),

    // Analysis
    AnalyzeImage,
    InferenceResult(InferenceResponse),
    SetError(Option<String>),

    // Contact form
    ContactInput(ContactField, String),
    SetSubject(ContactSubject),
    SubmitContact,
    ContactFinished(ContactStatus),
}

pub struct Model {
    pub page: Page,
    pub image: Option<SelectedImage>,
    pub result: Option<InferenceResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_dragging: bool,
    pub contact: ContactForm,
    pub contact_status: Option<ContactStatus>,
    pub contact_sending: bool,
    _paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let paste_listener = web_sys::window().map(|window| {
            EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            })
        });

        Self {
            page: Page::Home,
            image: None,
            result: None,
            loading: false,
            error: None,
            is_dragging: false,
            contact: ContactForm::default(),
            contact_status: None,
            contact_sending: false,
            _paste_listener: paste_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                self.page = page;
                true
            }

            Msg::FileChosen(file) => handlers::handle_file_chosen(self, ctx, file),
            Msg::AddPreview(url) => handlers::handle_add_preview(self, url),
            Msg::ClearImage => handlers::handle_clear_image(self),
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::AnalyzeImage => handlers::handle_analyze(self, ctx),
            Msg::InferenceResult(response) => handlers::handle_inference_result(self, response),
            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }

            Msg::ContactInput(field, value) => {
                match field {
                    ContactField::Name => self.contact.name = value,
                    ContactField::Email => self.contact.email = value,
                    ContactField::Message => self.contact.message = value,
                }
                false
            }
            Msg::SetSubject(subject) => {
                self.contact.subject = subject;
                false
            }
            Msg::SubmitContact => handlers::handle_submit_contact(self, ctx),
            Msg::ContactFinished(status) => handlers::handle_contact_finished(self, status),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="layout">
                { render_sidebar(self, ctx) }
                <main class="main">
                {
                    match self.page {
                        Page::Home => self.render_home(ctx),
                        Page::About => render_about_page(),
                        Page::Contact => render_contact_page(self, ctx),
                    }
                }
                </main>
            </div>
        }
    }
}

// Rendering methods
impl Model {
    fn render_home(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <div class="columns">
                    <div class="column">
                        { render_header() }
                        <div class="info-box">
                            <h3>{"📌 How It Works"}</h3>
                            <ol>
                                <li>{"Upload a retina fundus image (JPG/PNG)"}</li>
                                <li>{"Our AI analyzes the image in seconds"}</li>
                                <li>{"Get instant results with severity assessment"}</li>
                                <li>{"Receive recommendations based on findings"}</li>
                            </ol>
                        </div>
                    </div>
                    <figure class="column">
                        <img class="landing-image" src={LANDING_IMAGE_URL} alt="Retina scan" />
                        <figcaption>{"Advanced Retina Scanning Technology"}</figcaption>
                    </figure>
                </div>
                <hr />
                <h2>{"📁 Upload Retina Image"}</h2>
                { render_upload_section(self, ctx) }
                { render_error_message(self) }
                { render_preview_area(self, ctx) }
                { render_results(self) }
            </>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
