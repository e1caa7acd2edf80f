//! Step 5: review before generation.

#[cfg(test)]
#[path = "step5_test.rs"]
mod step5_test;

use leptos::prelude::*;
use wire::WizardData;

use crate::state::wizard::WizardState;

/// One line per area: name and the labels placed in it.
fn area_summaries(data: &WizardData) -> Vec<(String, String)> {
    data.step2
        .layout_areas
        .iter()
        .map(|area| {
            let labels: Vec<&str> = data
                .step3
                .components
                .iter()
                .filter(|c| c.area_id == area.id)
                .map(|c| c.label.as_str())
                .collect();
            let placed = if labels.is_empty() { "(empty)".to_owned() } else { labels.join(", ") };
            (area.name.clone(), placed)
        })
        .collect()
}

fn modal_count(data: &WizardData) -> usize {
    data.step4.interactions.iter().filter(|i| i.modal_config.is_some()).count()
}

#[component]
pub fn ReviewStep() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let data = move || wizard.with(|w| w.wizard.data().clone());

    view! {
        <section class="wizard-step">
            <h2>"Review"</h2>
            <dl class="review">
                <dt>"Screen"</dt>
                <dd>{move || data().step1.screen_name}</dd>
                <dt>"Description"</dt>
                <dd>{move || data().step1.description}</dd>
                <dt>"Layout"</dt>
                <dd>
                    {move || data().step2.selected_layout.map_or("(none)", |l| l.as_str())}
                </dd>
                <dt>"Areas"</dt>
                <dd>
                    <ul>
                        {move || {
                            area_summaries(&data())
                                .into_iter()
                                .map(|(name, placed)| view! { <li><strong>{name}</strong>": " {placed}</li> })
                                .collect_view()
                        }}
                    </ul>
                </dd>
                <dt>"Interactions"</dt>
                <dd>
                    {move || {
                        let data = data();
                        format!("{} interactions, {} modals", data.step4.interactions.len(), modal_count(&data))
                    }}
                </dd>
            </dl>
            <Show when=move || !wizard.with(|w| w.wizard.can_generate())>
                <p class="field__hint">"Complete the screen name and layout before generating."</p>
            </Show>
        </section>
    }
}
