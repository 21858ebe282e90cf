use super::super::{Model, Msg};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(image) = &model.image else {
        return html! {};
    };

    let link = ctx.link().clone();
    let file_name = image.file.name();

    html! {
        <div id="preview-container">
            {
                if let Some(url) = &image.preview_url {
                    html! {
                        <figure>
                            <img id="actual-image-preview"
                                src={url.to_string()}
                                alt="Uploaded Retina Image"
                                style="max-width:100%; max-height: 400px; object-fit: contain;" />
                            <figcaption>{ format!("Uploaded Retina Image ({})", file_name) }</figcaption>
                        </figure>
                    }
                } else {
                    html! { <div class="preview-placeholder"><p>{"Loading preview..."}</p></div> }
                }
            }
            <div class="button-container">
                <button
                    class="analyze-btn secondary"
                    disabled={model.loading}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearImage)
                    })}
                >
                    {"✖ Remove"}
                </button>
                <button
                    id="analyze-btn"
                    class="analyze-btn"
                    disabled={model.loading}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::AnalyzeImage)
                    })}
                >
                    {
                        if model.loading {
                            html! { {"🧠 AI is analyzing your retina image..."} }
                        } else {
                            html! { {"🔍 Analyze Image"} }
                        }
                    }
                </button>
            </div>
        </div>
    }
}
