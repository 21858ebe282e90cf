use yew::prelude::*;

pub fn render_about_page() -> Html {
    html! {
        <div class="about">
            <h1 class="title">{"About RetinaScan Pro"}</h1>
            <p class="subtitle">{"Revolutionizing diabetic retinopathy detection through artificial intelligence"}</p>

            <h2>{"Our Mission"}</h2>
            <p>
                {"At RetinaScan Pro, we're committed to early detection of diabetic retinopathy to prevent vision loss. \
                  Our AI-powered platform provides accurate, instant assessments of retina images, helping both patients \
                  and healthcare providers identify potential issues before they become serious."}
            </p>

            <h2>{"Technology"}</h2>
            <p>
                {"Our system uses a deep learning model trained on retina images from diverse populations. \
                  It classifies diabetic retinopathy into five severity stages. Images are resized to 224x224 \
                  before analysis, so very wide or tall photos are stretched."}
            </p>

            <hr />
            <h2>{"✨ Key Features"}</h2>
            <div class="columns">
                <div class="column">
                    <h3>{"AI-Powered Detection"}</h3>
                    <p>{"Our deep learning model classifies diabetic retinopathy into five stages, from No DR to Proliferative DR."}</p>
                </div>
                <div class="column">
                    <h3>{"Rapid Analysis"}</h3>
                    <p>{"Get results in seconds, enabling timely interventions when they matter most."}</p>
                </div>
            </div>
        </div>
    }
}
