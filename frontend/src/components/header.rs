use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1 class="title">{"RetinaScan Pro"}</h1>
            <p class="subtitle">{"Advanced AI-powered Diabetic Retinopathy Detection System"}</p>
        </header>
    }
}
