use super::super::Model;
use shared::SeverityClass;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(result) = &model.result else {
        return html! {};
    };

    let severity = result.severity;
    let info = severity.info();
    let recommendation = &info.recommendation;

    html! {
        <div class="results-container">
            <h2>{"📊 Analysis Results"}</h2>
            <div class={classes!("result-card", format!("severity-{}", severity.index()))}>
                <div class="result-title">
                    <span class="stage-indicator" style={format!("background-color: {};", info.color)}></span>
                    <h3 style={format!("color: {};", info.color)}>{ info.name }</h3>
                </div>
                <p class="result-description">{ info.description }</p>
            </div>

            <h2>{"📝 Recommendations"}</h2>
            <div class={classes!("alert", recommendation.level.css_class())}>
                <p><strong>{ recommendation.headline }</strong></p>
                <p>{ recommendation.detail }</p>
            </div>

            { render_scores(&result.predictions) }
        </div>
    }
}

/// Raw model scores, shown for transparency; only the top class drives the result.
fn render_scores(predictions: &[f32]) -> Html {
    html! {
        <details class="detailed-results">
            <summary>{"Model scores"}</summary>
            <div class="result-bars">
                { for predictions.iter().enumerate().map(|(i, &v)| {
                    let (class_name, color) = SeverityClass::from_index(i)
                        .map(|class| (class.name(), class.info().color))
                        .unwrap_or(("Unknown Class", "#95a5a6"));
                    let percentage = score_percentage(v);
                    html! {
                        <div class="result-item">
                            <div class="result-label">{ class_name }</div>
                            <div class="result-bar-container">
                                <div class="result-bar" style={format!("width: {}%; background-color: {};", percentage.unwrap_or(0.0), color)}></div>
                            </div>
                            <div class="result-value">{ format_score(percentage) }</div>
                        </div>
                    }
                })}
            </div>
        </details>
    }
}

/// NaN scores are skipped by the backend argmax and shown as "n/a".
fn score_percentage(score: f32) -> Option<f32> {
    (!score.is_nan()).then(|| (score * 100.0).clamp(0.0, 100.0))
}

fn format_score(percentage: Option<f32>) -> String {
    percentage
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| "n/a".to_string())
}
