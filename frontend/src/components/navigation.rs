use super::super::{Model, Msg, Page};
use yew::prelude::*;

const NAV_ITEMS: [(Page, &str); 3] = [
    (Page::Home, "🏠 Home"),
    (Page::About, "ℹ️ About Us"),
    (Page::Contact, "📞 Contact Us"),
];

pub fn render_sidebar(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <aside class="sidebar">
            <h2>{"🔍 Navigation"}</h2>
            <nav>
                { for NAV_ITEMS.iter().map(|&(page, label)| html! {
                    <div
                        class={classes!("nav-item", (model.page == page).then_some("active"))}
                        onclick={link.callback(move |_| Msg::Navigate(page))}
                    >
                        { label }
                    </div>
                })}
            </nav>
            <hr />
            <div class="info-box">
                <h3>{"ℹ️ About Diabetic Retinopathy"}</h3>
                <p>{"Diabetic retinopathy is a diabetes complication that affects eyes. It's caused by damage to the blood vessels of the light-sensitive tissue at the back of the eye (retina)."}</p>
                <p><strong>{"Early detection can prevent vision loss."}</strong></p>
            </div>
        </aside>
    }
}
