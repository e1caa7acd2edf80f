//! Document panel: design document, test plan and user manual.
//!
//! SYSTEM CONTEXT
//! ==============
//! The design document is built by the backend from screenshots of the
//! running preview. The panel walks the capture plan (main screen, then each
//! modal configured in the wizard) through `util::frame_bridge`, appends the
//! screenshots the user captured by hand, uploads them and saves the returned
//! `.docx`. Test plans and manuals come back as markdown, rendered in place
//! and downloadable as `.md`.
//!
//! ERROR HANDLING
//! ==============
//! Capture failures skip the affected screenshot. Request failures end up in
//! `WorkspaceState::error` via `document_failed`.

#[cfg(test)]
#[path = "document_panel_test.rs"]
mod document_panel_test;

use std::collections::HashSet;

use leptos::prelude::*;
use preview::bridge::{CaptureStep, Screenshot, capture_plan};
use wire::WizardData;

use crate::net::api;
use crate::state::wizard::WizardState;
use crate::state::workspace::{DocumentKind, WorkspaceState};
use crate::util::{download, markdown};

/// Capture steps for the modals configured in the wizard, each modal once.
fn capture_steps(data: &WizardData) -> Vec<CaptureStep> {
    let mut seen = HashSet::new();
    let modals = data
        .step4
        .interactions
        .iter()
        .filter_map(|i| i.modal_config.as_ref())
        .filter(|m| seen.insert(m.id.as_str()))
        .map(|m| (m.id.as_str(), m.title.as_str()));
    capture_plan(modals)
}

/// Name and bytes for saving a markdown document.
fn markdown_download(kind: DocumentKind, screen_name: &str, text: &str) -> Option<(String, Vec<u8>)> {
    let suffix = kind.markdown_kind()?;
    Some((wire::api::markdown_filename(screen_name, suffix), text.as_bytes().to_vec()))
}

fn upload_summary(planned: usize, manual: usize) -> String {
    match manual {
        0 => format!("{planned} automatic screenshot(s)"),
        n => format!("{planned} automatic + {n} manual screenshot(s)"),
    }
}

async fn automatic_shots(plan: Vec<CaptureStep>) -> Vec<Screenshot> {
    #[cfg(feature = "hydrate")]
    {
        crate::util::frame_bridge::capture_all(&plan).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = plan;
        Vec::new()
    }
}

#[component]
pub fn DocumentPanel() -> impl IntoView {
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let wizard = expect_context::<RwSignal<WizardState>>();

    let busy = move || workspace.with(|w| w.busy.is_some());
    let plan_len = move || wizard.with(|w| capture_steps(w.wizard.data()).len());

    let on_design = move |_| {
        let Some(screen_id) = workspace.with_untracked(WorkspaceState::screen_id) else {
            return;
        };
        if !workspace.try_update(|w| w.begin_document(DocumentKind::Design)).unwrap_or(false) {
            return;
        }
        let plan = wizard.with_untracked(|w| capture_steps(w.wizard.data()));
        let screen_name = workspace.with_untracked(|w| w.screen_name().to_owned());
        leptos::task::spawn_local(async move {
            let mut shots = automatic_shots(plan).await;
            shots.extend(workspace.with_untracked(|w| w.manual_shots.clone()));
            log::info!("documents: uploading {} screenshot(s) for screen {screen_id}", shots.len());
            let saved = match api::design_document(screen_id, &screen_name, &shots).await {
                Ok(doc) => download::save(&doc.filename, &doc.bytes).map(|()| doc.filename),
                Err(e) => Err(e),
            };
            workspace.update(|w| match saved {
                Ok(filename) => w.document_saved(DocumentKind::Design, &filename),
                Err(e) => w.document_failed(DocumentKind::Design, e),
            });
        });
    };

    let on_stored = move |_| {
        let Some(screen_id) = workspace.with_untracked(WorkspaceState::screen_id) else {
            return;
        };
        if !workspace.try_update(|w| w.begin_document(DocumentKind::StoredDesign)).unwrap_or(false) {
            return;
        }
        let screen_name = workspace.with_untracked(|w| w.screen_name().to_owned());
        leptos::task::spawn_local(async move {
            let saved = match api::download_design_document(screen_id, &screen_name).await {
                Ok(doc) => download::save(&doc.filename, &doc.bytes).map(|()| doc.filename),
                Err(e) => Err(e),
            };
            workspace.update(|w| match saved {
                Ok(filename) => w.document_saved(DocumentKind::StoredDesign, &filename),
                Err(e) => w.document_failed(DocumentKind::StoredDesign, e),
            });
        });
    };

    let run_markdown = move |kind: DocumentKind| {
        let Some(path) = kind.generate_path() else {
            return;
        };
        let menu_name = workspace.with_untracked(|w| w.menu_name.clone());
        let Some(request) = wizard.with_untracked(|w| w.generate_request(&menu_name)) else {
            workspace.update(|w| w.error = Some("Complete the wizard before generating documents".to_owned()));
            return;
        };
        if !workspace.try_update(|w| w.begin_document(kind)).unwrap_or(false) {
            return;
        }
        leptos::task::spawn_local(async move {
            let result = api::generate_document(path, &request).await.and_then(|resp| {
                resp.document_text()
                    .map(str::to_owned)
                    .ok_or_else(|| "the backend returned an empty document".to_owned())
            });
            workspace.update(|w| match result {
                Ok(text) => w.markdown_ready(kind, text),
                Err(e) => w.document_failed(kind, e),
            });
        });
    };

    let on_save_markdown = move |_| {
        let target = workspace.with_untracked(|w| {
            w.markdown.as_ref().and_then(|(kind, text)| markdown_download(*kind, w.screen_name(), text))
        });
        let Some((filename, bytes)) = target else {
            return;
        };
        if let Err(e) = download::save(&filename, &bytes) {
            workspace.update(|w| w.error = Some(e));
        }
    };

    view! {
        <div class="document-panel">
            <div class="document-panel__actions">
                <button
                    class="btn btn--primary"
                    disabled=move || busy() || workspace.with(|w| w.prototype().is_none())
                    title="Capture the preview and generate a design document"
                    on:click=on_design
                >
                    "Generate design document"
                </button>
                <button class="btn" disabled=busy on:click=on_stored>
                    "Download stored design document"
                </button>
                <button class="btn" disabled=busy on:click=move |_| run_markdown(DocumentKind::TestPlan)>
                    "Generate test plan"
                </button>
                <button class="btn" disabled=busy on:click=move |_| run_markdown(DocumentKind::Manual)>
                    "Generate user manual"
                </button>
            </div>

            <p class="document-panel__summary">
                {move || upload_summary(plan_len(), workspace.with(|w| w.manual_shots.len()))}
            </p>

            <Show when=move || workspace.with(|w| !w.manual_shots.is_empty())>
                <ul class="document-panel__shots">
                    {move || {
                        workspace
                            .with(|w| w.manual_shots.iter().map(|s| s.label.clone()).collect::<Vec<_>>())
                            .into_iter()
                            .enumerate()
                            .map(|(index, label)| {
                                view! {
                                    <li class="document-panel__shot">
                                        <span>{label}</span>
                                        <button
                                            class="btn btn--small"
                                            disabled=busy
                                            on:click=move |_| workspace.update(|w| w.remove_manual_shot(index))
                                        >
                                            "Remove"
                                        </button>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </Show>

            <Show when=move || workspace.with(|w| w.busy.is_some())>
                <p class="document-panel__busy">
                    {move || workspace.with(|w| w.busy.map(|k| format!("{}...", k.label())).unwrap_or_default())}
                </p>
            </Show>
            <Show when=move || workspace.with(|w| w.notice.is_some())>
                <p class="document-panel__notice">{move || workspace.with(|w| w.notice.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || workspace.with(|w| w.error.is_some())>
                <p class="document-panel__error">{move || workspace.with(|w| w.error.clone().unwrap_or_default())}</p>
            </Show>

            {move || {
                workspace
                    .with(|w| w.markdown.clone())
                    .map(|(kind, text)| {
                        let rendered = markdown::render_html(&text);
                        view! {
                            <section class="document-panel__markdown">
                                <header class="document-panel__markdown-header">
                                    <h3>{kind.label()}</h3>
                                    <button class="btn" on:click=on_save_markdown>"Download .md"</button>
                                </header>
                                <div class="document-panel__markdown-body" inner_html=rendered></div>
                            </section>
                        }
                    })
            }}
        </div>
    }
}
