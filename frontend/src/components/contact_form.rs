use super::super::{ContactStatus, Model, Msg};
use shared::{ContactField, ContactSubject};
use std::str::FromStr;
use strum::IntoEnumIterator;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub fn render_contact_page(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let on_name = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::ContactInput(ContactField::Name, input.value())
    });
    let on_email = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::ContactInput(ContactField::Email, input.value())
    });
    let on_message = link.callback(|e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::ContactInput(ContactField::Message, input.value())
    });
    let on_subject = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetSubject(ContactSubject::from_str(&select.value()).unwrap_or_default())
    });
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::SubmitContact
    });

    let form = &model.contact;

    html! {
        <div class="contact">
            <h1 class="title">{"Contact Us"}</h1>
            <p class="subtitle">{"Have questions or feedback? We'd love to hear from you!"}</p>

            <form class="info-box" onsubmit={on_submit}>
                <h3>{"✉️ Send Us a Message"}</h3>

                <label for="contact-name">{"Your Name"}</label>
                <input id="contact-name" type="text" value={form.name.clone()} oninput={on_name} />

                <label for="contact-email">{"Your Email"}</label>
                <input id="contact-email" type="text" value={form.email.clone()} oninput={on_email} />

                <label for="contact-subject">{"Subject"}</label>
                <select id="contact-subject" onchange={on_subject}>
                    { for ContactSubject::iter().map(|subject| html! {
                        <option value={subject.to_string()} selected={subject == form.subject}>
                            { subject.to_string() }
                        </option>
                    })}
                </select>

                <label for="contact-message">{"Your Message"}</label>
                <textarea id="contact-message" rows="6" value={form.message.clone()} oninput={on_message} />

                <button type="submit" class="analyze-btn" disabled={model.contact_sending}>
                    {"Send Message"}
                </button>
            </form>

            { render_contact_status(model.contact_status.as_ref()) }
        </div>
    }
}

fn render_contact_status(status: Option<&ContactStatus>) -> Html {
    match status {
        Some(ContactStatus::Sent(message)) => html! {
            <div class="alert alert-success"><p>{ message }</p></div>
        },
        Some(ContactStatus::Warning(message)) => html! {
            <div class="alert alert-warning"><p>{ message }</p></div>
        },
        Some(ContactStatus::Failed(message)) => html! {
            <div class="alert alert-error"><p>{ message }</p></div>
        },
        None => html! {},
    }
}
