//! Step indicator and navigation footer.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::*;
use wire::wizard::{StepStatus, WizardStep};

use crate::state::wizard::WizardState;

fn step_class(step: &WizardStep) -> &'static str {
    match step.status {
        StepStatus::Completed => "wizard-steps__item wizard-steps__item--completed",
        StepStatus::Current => "wizard-steps__item wizard-steps__item--current",
        StepStatus::Pending => "wizard-steps__item",
    }
}

fn step_marker(step: &WizardStep) -> String {
    match step.status {
        StepStatus::Completed => "✓".to_owned(),
        StepStatus::Current | StepStatus::Pending => step.id.to_string(),
    }
}

/// Clickable list of the five steps.
#[component]
pub fn StepIndicator() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();

    view! {
        <ol class="wizard-steps">
            {move || {
                wizard
                    .with(|w| w.wizard.steps())
                    .into_iter()
                    .map(|step| {
                        let id = step.id;
                        view! {
                            <li class=step_class(&step) on:click=move |_| wizard.update(|w| w.wizard.go_to_step(id))>
                                <span class="wizard-steps__marker">{step_marker(&step)}</span>
                                <span class="wizard-steps__title">{step.title}</span>
                                <span class="wizard-steps__description">{step.description}</span>
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ol>
    }
}

/// Previous / next / save draft, and Generate on the review step.
#[component]
pub fn WizardFooter(on_generate: Callback<()>) -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();

    let current = move || wizard.with(|w| w.wizard.current_step());
    let is_last = move || wizard.with(|w| w.wizard.is_last_step());
    let can_advance = move || wizard.with(|w| w.wizard.is_step_valid(w.wizard.current_step()));
    let can_generate = move || wizard.with(|w| w.wizard.can_generate());

    let on_save = move |_| {
        if !wizard.try_update(WizardState::begin_save).unwrap_or(false) {
            return;
        }
        let (screen_id, data) = wizard.with_untracked(|w| (w.screen_id, w.wizard.data().clone()));
        let Some(screen_id) = screen_id else {
            return;
        };
        leptos::task::spawn_local(async move {
            match crate::net::api::save_draft(screen_id, &data).await {
                Ok(response) => wizard.update(|w| w.draft_saved(&response)),
                Err(e) => wizard.update(|w| w.draft_failed(e)),
            }
        });
    };

    view! {
        <footer class="wizard__footer">
            <button
                class="btn"
                disabled=move || current() == 1
                on:click=move |_| wizard.update(|w| w.wizard.prev_step())
            >
                "Previous"
            </button>

            <button
                class="btn"
                disabled=move || wizard.with(|w| w.saving || w.screen_id.is_none())
                on:click=on_save
            >
                {move || if wizard.with(|w| w.saving) { "Saving..." } else { "Save draft" }}
            </button>

            <span class="wizard__footer-spacer"></span>

            <Show
                when=is_last
                fallback=move || {
                    view! {
                        <button
                            class="btn btn--primary"
                            disabled=move || !can_advance()
                            on:click=move |_| wizard.update(|w| w.wizard.next_step())
                        >
                            "Next"
                        </button>
                    }
                }
            >
                <button
                    class="btn btn--primary"
                    disabled=move || !can_generate()
                    title="Generate the prototype from this specification"
                    on:click=move |_| on_generate.run(())
                >
                    "Generate"
                </button>
            </Show>
        </footer>
    }
}
