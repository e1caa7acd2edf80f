//! Five-step screen wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `WizardPanel` shows the restore prompt for a saved draft, the step
//! indicator, the body of the current step and the navigation footer. All
//! edits go through `WizardState` so the `wire::Wizard` rules apply.

pub mod navigation;
pub mod step1;
pub mod step2;
pub mod step3;
pub mod step4;
pub mod step5;

use leptos::prelude::*;

use crate::state::wizard::WizardState;
use navigation::{StepIndicator, WizardFooter};

/// Wizard body for the open screen. `on_generate` fires from the review step.
#[component]
pub fn WizardPanel(on_generate: Callback<()>) -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let current = move || wizard.with(|w| w.wizard.current_step());

    view! {
        <div class="wizard">
            <Show when=move || wizard.with(|w| w.pending_draft.is_some())>
                <div class="wizard__draft-prompt" role="alertdialog">
                    <p>
                        "A saved draft exists for this screen"
                        {move || {
                            wizard
                                .with(|w| w.pending_draft.as_ref().and_then(|d| d.saved_at.clone()))
                                .map(|at| format!(" (saved {at})"))
                                .unwrap_or_default()
                        }}
                        ". Restore it or start over?"
                    </p>
                    <button class="btn btn--primary" on:click=move |_| wizard.update(WizardState::restore_draft)>
                        "Restore draft"
                    </button>
                    <button class="btn" on:click=move |_| wizard.update(WizardState::discard_draft)>
                        "Start new"
                    </button>
                </div>
            </Show>

            <StepIndicator/>

            <Show when=move || wizard.with(|w| w.error.is_some())>
                <p class="wizard__error">{move || wizard.with(|w| w.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || wizard.with(|w| w.notice.is_some())>
                <p class="wizard__notice">{move || wizard.with(|w| w.notice.clone().unwrap_or_default())}</p>
            </Show>

            <div class="wizard__body">
                {move || match current() {
                    1 => view! { <step1::OverviewStep/> }.into_any(),
                    2 => view! { <step2::LayoutStep/> }.into_any(),
                    3 => view! { <step3::ComponentsStep/> }.into_any(),
                    4 => view! { <step4::InteractionsStep/> }.into_any(),
                    _ => view! { <step5::ReviewStep/> }.into_any(),
                }}
            </div>

            <WizardFooter on_generate=on_generate/>
        </div>
    }
}
