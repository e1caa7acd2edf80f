//! Step 1: screen name and description.

use leptos::prelude::*;

use crate::state::wizard::WizardState;

#[component]
pub fn OverviewStep() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let step1 = move || wizard.with(|w| w.wizard.data().step1.clone());

    let set_name = move |ev| {
        let value = event_target_value(&ev);
        wizard.update(|w| {
            let mut step1 = w.wizard.data().step1.clone();
            step1.screen_name = value;
            w.wizard.update_step1(step1);
        });
    };
    let set_description = move |ev| {
        let value = event_target_value(&ev);
        wizard.update(|w| {
            let mut step1 = w.wizard.data().step1.clone();
            step1.description = value;
            w.wizard.update_step1(step1);
        });
    };

    view! {
        <section class="wizard-step">
            <h2>"Overview"</h2>
            <label class="field">
                <span class="field__label">"Screen name"</span>
                <input
                    class="field__input"
                    type="text"
                    placeholder="e.g. Work order list"
                    prop:value=move || step1().screen_name
                    on:input=set_name
                />
            </label>
            <Show when=move || step1().screen_name.trim().is_empty()>
                <p class="field__hint">"A screen name is required to continue."</p>
            </Show>
            <label class="field">
                <span class="field__label">"Description"</span>
                <textarea
                    class="field__input"
                    rows="5"
                    placeholder="What is this screen for, and who uses it?"
                    prop:value=move || step1().description
                    on:input=set_description
                ></textarea>
            </label>
        </section>
    }
}
