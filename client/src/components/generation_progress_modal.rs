//! Modal showing generation progress while the backend works.
//!
//! Shows the status label, a progress bar, the four-step checklist and the
//! quota retry count. It can be closed at any time; closing mid-run stops
//! polling.

use leptos::prelude::*;
use wire::status::StepProgress;

use crate::state::generation::GenerationView;

fn step_class(progress: StepProgress) -> &'static str {
    match progress {
        StepProgress::Completed => "progress-steps__item progress-steps__item--done",
        StepProgress::InProgress => "progress-steps__item progress-steps__item--active",
        StepProgress::Pending => "progress-steps__item",
    }
}

#[component]
pub fn GenerationProgressModal() -> impl IntoView {
    let generation = expect_context::<RwSignal<GenerationView>>();

    let headline = move || generation.with(GenerationView::headline);
    let progress = move || generation.with(GenerationView::progress);
    let detail = move || {
        generation.with(|g| {
            g.error
                .clone()
                .or_else(|| g.latest().and_then(|s| s.generation_message.clone()))
                .or_else(|| g.ack_message.clone())
                .unwrap_or_default()
        })
    };
    let retry = move || generation.with(|g| g.latest().and_then(wire::GenerationStatus::retry_label));
    let poll_error = move || generation.with(|g| g.tracker.last_error().map(str::to_owned));
    let on_close = move |_| generation.update(GenerationView::close);

    view! {
        <Show when=move || generation.with(|g| g.dialog_open)>
            <div class="generation-modal__backdrop">
                <div class="generation-modal" role="dialog" aria-live="polite">
                    <div class=move || format!("generation-modal__header generation-modal__header--{}", headline().1)>
                        <h2>{move || headline().0}</h2>
                        <span class="generation-modal__percent">{move || format!("{}%", progress())}</span>
                    </div>
                    <div class="generation-modal__bar">
                        <div
                            class=move || format!("generation-modal__fill generation-modal__fill--{}", headline().1)
                            style:width=move || format!("{}%", progress())
                        ></div>
                    </div>
                    <ol class="progress-steps">
                        {move || {
                            generation
                                .with(GenerationView::checklist)
                                .into_iter()
                                .map(|(step, state)| view! { <li class=step_class(state)>{step.name}</li> })
                                .collect_view()
                        }}
                    </ol>
                    <p class="generation-modal__message">{detail}</p>
                    {move || retry().map(|label| view! { <p class="generation-modal__retry">{label}</p> })}
                    {move || {
                        poll_error()
                            .map(|e| view! { <p class="generation-modal__poll-error">"Status check failed: " {e}</p> })
                    }}
                    <button class="btn" on:click=on_close>
                        {move || if generation.with(GenerationView::is_settled) { "Close" } else { "Stop watching" }}
                    </button>
                </div>
            </div>
        </Show>
    }
}
