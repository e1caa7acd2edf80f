//! Sandboxed live preview of the generated prototype.
//!
//! SYSTEM CONTEXT
//! ==============
//! The generated source is turned into a standalone document by
//! `preview::RenderCycle` and loaded through `srcdoc` into an `<iframe>`
//! sandboxed without `allow-same-origin`. The frame mounts the component on
//! its own and reports its phase back with `PREVIEW_STATUS`; this component
//! mirrors that phase into `WorkspaceState` and forwards every other frame
//! message to `util::frame_bridge`.
//!
//! DESIGN
//! ======
//! The frame is rebuilt only when the content key of the source changes, so
//! re-renders of the workspace with identical source keep the running frame.

#[cfg(test)]
#[path = "code_preview_test.rs"]
mod code_preview_test;

use leptos::prelude::*;
use preview::{MountPolicy, RenderCycle, RenderPhase, SANDBOX_FLAGS};

use crate::state::workspace::WorkspaceState;

/// Label for a manual capture: the typed text, or a numbered default.
fn manual_label(input: &str, existing: usize) -> String {
    let input = input.trim();
    if input.is_empty() { format!("Capture {}", existing + 1) } else { input.to_owned() }
}

fn phase_text(phase: RenderPhase, attempts: u32, component: &str) -> String {
    match phase {
        RenderPhase::AwaitingRegistration => format!("{} ({attempts})", phase.label()),
        RenderPhase::Mounted if !component.is_empty() => format!("{} <{component}/>", phase.label()),
        _ => phase.label().to_owned(),
    }
}

fn phase_tone(phase: RenderPhase) -> &'static str {
    match phase {
        RenderPhase::Mounted => "ok",
        RenderPhase::NotFound | RenderPhase::DiagnosticShown | RenderPhase::Failed => "error",
        _ => "busy",
    }
}

#[component]
pub fn CodePreview(#[prop(into)] source: Signal<Option<String>>) -> impl IntoView {
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let cycle = StoredValue::new(RenderCycle::new(MountPolicy::default()));
    let srcdoc = RwSignal::new(None::<String>);
    let component = RwSignal::new(String::new());
    let frame_ref = NodeRef::<leptos::html::Iframe>::new();
    let capture_label = RwSignal::new(String::new());

    Effect::new(move || {
        let text = source.get().unwrap_or_default();
        match cycle.try_update_value(|c| c.begin(&text)).flatten() {
            Some(document) => {
                component.set(document.component_name);
                srcdoc.set(Some(document.html));
            }
            None if text.trim().is_empty() => {
                component.set(String::new());
                srcdoc.set(None);
            }
            None => {}
        }
        let (phase, attempts) = cycle.with_value(|c| (c.phase(), c.attempts()));
        workspace.update(|w| w.preview_status(phase, attempts));
    });

    #[cfg(feature = "hydrate")]
    {
        use preview::FrameMessage;
        use wasm_bindgen::JsValue;

        use crate::util::frame_bridge;

        Effect::new(move || {
            if let Some(frame) = frame_ref.get() {
                frame_bridge::attach(frame);
            }
        });

        let handle = window_event_listener(leptos::ev::message, move |ev: web_sys::MessageEvent| {
            let source = ev.source().map_or(JsValue::NULL, JsValue::from);
            if !frame_bridge::is_frame_source(&source) {
                return;
            }
            let Some(json) = js_sys::JSON::stringify(&ev.data()).ok().and_then(|s| s.as_string()) else {
                return;
            };
            match FrameMessage::parse(&json) {
                Ok(FrameMessage::PreviewStatus { phase, attempts, key }) => {
                    if cycle.try_update_value(|c| c.observe(&key, phase, attempts)).unwrap_or(false) {
                        workspace.update(|w| w.preview_status(phase, attempts));
                    }
                }
                Ok(reply) => frame_bridge::dispatch(&reply),
                Err(e) => log::debug!("preview: ignoring frame message: {e}"),
            }
        });
        on_cleanup(move || {
            handle.remove();
            frame_bridge::detach();
        });
    }

    let on_capture = move |_| {
        let label = manual_label(&capture_label.get_untracked(), workspace.with_untracked(|w| w.manual_shots.len()));
        capture_label.set(String::new());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let step = preview::bridge::CaptureStep { label, modal_id: None };
            match crate::util::frame_bridge::capture(&step).await {
                Ok(shot) => workspace.update(|w| w.add_manual_shot(shot)),
                Err(e) => workspace.update(|w| w.error = Some(e.to_string())),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = label;
    };

    view! {
        <div class="code-preview">
            <div class="code-preview__toolbar">
                <span class=move || format!("code-preview__phase code-preview__phase--{}", workspace.with(|w| phase_tone(w.preview_phase)))>
                    {move || workspace.with(|w| phase_text(w.preview_phase, w.preview_attempts, &component.get()))}
                </span>
                <span class="code-preview__spacer"></span>
                <input
                    class="field__input code-preview__capture-label"
                    type="text"
                    placeholder="Screenshot label"
                    prop:value=move || capture_label.get()
                    on:input=move |ev| capture_label.set(event_target_value(&ev))
                />
                <button
                    class="btn"
                    disabled=move || !workspace.with(WorkspaceState::can_capture)
                    title="Add a screenshot of the current preview to the design document"
                    on:click=on_capture
                >
                    "Capture"
                </button>
            </div>
            <Show
                when=move || srcdoc.with(Option::is_some)
                fallback=|| view! { <div class="code-preview__empty">{RenderPhase::Idle.label()}</div> }
            >
                <iframe
                    node_ref=frame_ref
                    class="code-preview__frame"
                    title="Prototype preview"
                    sandbox=SANDBOX_FLAGS
                    srcdoc=move || srcdoc.get().unwrap_or_default()
                ></iframe>
            </Show>
        </div>
    }
}
