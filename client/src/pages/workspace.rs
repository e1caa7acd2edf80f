//! Screen workspace: wizard, live preview and documents for one screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/screen/:id`. On entry the page loads the screen record, its menu
//! name, the saved wizard draft and the wizard catalog. Generation is started
//! from the wizard's review step; `net::status_poll` then polls the status
//! endpoint, first right away and then on every interval, until the job
//! completes, fails, or the dialog is closed.
//!
//! DESIGN
//! ======
//! The preview stays mounted while the wizard tab is shown (moved off-screen
//! by CSS) so the frame keeps its mounted component and the document panel
//! can capture it at any time.

#[cfg(test)]
#[path = "workspace_test.rs"]
mod workspace_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::code_preview::CodePreview;
use crate::components::document_panel::DocumentPanel;
use crate::components::generation_progress_modal::GenerationProgressModal;
use crate::components::wizard::WizardPanel;
use crate::net::api;
#[cfg(feature = "hydrate")]
use crate::net::status_poll::{PollHost, poll_job};
use crate::state::catalog::CatalogState;
use crate::state::generation::GenerationView;
use crate::state::wizard::WizardState;
use crate::state::workspace::{WorkspaceState, WorkspaceTab};

const TABS: [WorkspaceTab; 3] = [WorkspaceTab::Wizard, WorkspaceTab::Preview, WorkspaceTab::Documents];

fn parse_screen_param(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|id| *id > 0)
}

fn tab_label(tab: WorkspaceTab) -> &'static str {
    match tab {
        WorkspaceTab::Wizard => "Wizard",
        WorkspaceTab::Preview => "Preview",
        WorkspaceTab::Documents => "Documents",
    }
}

/// The wizard tab hides the preview; the other tabs show it.
fn preview_visible(tab: WorkspaceTab) -> bool {
    tab != WorkspaceTab::Wizard
}

async fn load_screen(
    screen_id: i64,
    workspace: RwSignal<WorkspaceState>,
    wizard: RwSignal<WizardState>,
    catalog: RwSignal<CatalogState>,
) {
    workspace.update(WorkspaceState::begin_loading);
    let screen = match api::fetch_screen(screen_id).await {
        Ok(screen) => screen,
        Err(e) => {
            log::warn!("workspace: screen {screen_id} failed to load: {e}");
            workspace.update(|w| w.load_failed(e));
            return;
        }
    };
    let menu_name = match api::fetch_menu(screen.menu_id).await {
        Ok(menu) => menu.menu.name,
        Err(e) => {
            log::warn!("workspace: menu {} failed to load: {e}", screen.menu_id);
            String::new()
        }
    };
    wizard.update(|w| w.open_screen(screen_id, &screen.name));
    workspace.update(|w| w.open(screen, menu_name));

    match api::load_draft(screen_id).await {
        Ok(draft) => {
            wizard.update(|w| {
                w.offer_draft(draft);
            });
        }
        Err(e) => log::debug!("workspace: no draft for screen {screen_id}: {e}"),
    }

    if catalog.try_update(CatalogState::begin_load).unwrap_or(false) {
        match api::fetch_wizard_resources().await {
            Ok(resources) => catalog.update(|c| c.loaded(&resources)),
            Err(e) => catalog.update(|c| c.load_failed(&e)),
        }
    }
}

#[cfg(feature = "hydrate")]
struct BrowserPoll {
    generation: RwSignal<GenerationView>,
    alive: Arc<AtomicBool>,
}

#[cfg(feature = "hydrate")]
impl PollHost for BrowserPoll {
    fn keeps_polling(&self, epoch: u64) -> bool {
        self.alive.load(Ordering::Relaxed) && self.generation.with_untracked(|g| g.keeps_polling(epoch))
    }

    fn apply(&self, epoch: u64, status: wire::GenerationStatus) -> wire::Transition {
        self.generation.try_update(|g| g.apply(epoch, status)).unwrap_or(wire::Transition::Stale)
    }

    fn poll_failed(&self, epoch: u64, error: &str) {
        self.generation.update(|g| g.poll_failed(epoch, error));
    }

    async fn fetch(&self, screen_id: i64) -> Result<wire::GenerationStatus, String> {
        api::fetch_status(screen_id).await
    }

    async fn pause(&self, delay: std::time::Duration) {
        gloo_timers::future::sleep(delay).await;
    }
}

#[cfg(feature = "hydrate")]
async fn poll_status(screen_id: i64, epoch: u64, generation: RwSignal<GenerationView>, alive: Arc<AtomicBool>) {
    use wire::{PollPolicy, Transition};

    let policy = PollPolicy::default();
    let host = BrowserPoll { generation, alive: alive.clone() };
    match poll_job(&host, screen_id, epoch, &policy).await {
        Some(Transition::Completed) => {
            log::info!("workspace: generation for screen {screen_id} completed");
            gloo_timers::future::sleep(policy.completion_linger).await;
            if alive.load(Ordering::Relaxed) && generation.with_untracked(|g| g.tracker.epoch() == epoch) {
                generation.update(GenerationView::close);
            }
        }
        Some(Transition::Failed(message)) => {
            log::warn!("workspace: generation for screen {screen_id} failed: {message:?}");
        }
        _ => {}
    }
}

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let workspace = expect_context::<RwSignal<WorkspaceState>>();
    let wizard = expect_context::<RwSignal<WizardState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();
    let generation = expect_context::<RwSignal<GenerationView>>();

    let params = use_params_map();
    let screen_id = Memo::new(move |_| parse_screen_param(params.read().get("id").as_deref()));

    let alive = Arc::new(AtomicBool::new(true));
    let alive_cleanup = alive.clone();
    on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

    Effect::new(move || match screen_id.get() {
        Some(id) => leptos::task::spawn_local(load_screen(id, workspace, wizard, catalog)),
        None => workspace.update(|w| w.load_failed("Invalid screen id".to_owned())),
    });

    // Reload the record after each completed run so the preview and documents
    // see the new prototype.
    Effect::new(move |previous: Option<u64>| {
        let seq = generation.with(|g| g.completed_seq);
        if previous.is_some_and(|p| p != seq) {
            if let Some(id) = workspace.with_untracked(WorkspaceState::screen_id) {
                leptos::task::spawn_local(async move {
                    match api::fetch_screen(id).await {
                        Ok(screen) => workspace.update(|w| w.refresh(screen)),
                        Err(e) => log::warn!("workspace: reload after generation failed: {e}"),
                    }
                });
            }
        }
        seq
    });

    let on_generate = Callback::new(move |()| {
        let menu_name = workspace.with_untracked(|w| w.menu_name.clone());
        let Some(request) = wizard.with_untracked(|w| w.generate_request(&menu_name)) else {
            wizard.update(|w| w.error = Some("Complete every step before generating".to_owned()));
            return;
        };
        let Some(epoch) = generation.try_update(|g| g.begin(request.screen_id)) else {
            return;
        };
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            match api::start_generation(&request).await {
                Ok(reply) => {
                    if let Some(source) = generation.try_update(|g| g.started(epoch, reply)).flatten() {
                        workspace.update(|w| w.set_prototype(source));
                    }
                }
                Err(e) => {
                    log::warn!("workspace: generate request failed: {e}");
                    generation.update(|g| g.start_failed(epoch, e));
                    return;
                }
            }
            #[cfg(feature = "hydrate")]
            poll_status(request.screen_id, epoch, generation, alive).await;
            #[cfg(not(feature = "hydrate"))]
            let _ = alive;
        });
    });

    let prototype = Signal::derive(move || workspace.with(|w| w.prototype().map(str::to_owned)));
    let tab = move || workspace.with(|w| w.tab);

    view! {
        <div class="workspace-page">
            <header class="workspace-page__header toolbar">
                <a class="btn" href="/">"Menus"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <span class="toolbar__menu-name">{move || workspace.with(|w| w.menu_name.clone())}</span>
                <span class="toolbar__screen-name">{move || workspace.with(|w| w.screen_name().to_owned())}</span>
                <span class="toolbar__spacer"></span>
                <nav class="workspace-page__tabs">
                    {TABS
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tab"
                                    class:tab--active=move || tab() == t
                                    on:click=move |_| workspace.update(|w| w.tab = t)
                                >
                                    {tab_label(t)}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
            </header>

            <Show when=move || workspace.with(|w| w.loading)>
                <p class="workspace-page__loading">"Loading screen..."</p>
            </Show>
            <Show when=move || workspace.with(|w| w.screen.is_none() && !w.loading && w.error.is_some())>
                <p class="workspace-page__error">{move || workspace.with(|w| w.error.clone().unwrap_or_default())}</p>
            </Show>

            <Show when=move || workspace.with(|w| w.screen.is_some())>
                <div class="workspace-page__body">
                    <Show when=move || tab() == WorkspaceTab::Wizard>
                        <WizardPanel on_generate=on_generate/>
                    </Show>
                    <div class="workspace-page__preview" class:workspace-page__preview--hidden=move || !preview_visible(tab())>
                        <CodePreview source=prototype/>
                    </div>
                    <Show when=move || tab() == WorkspaceTab::Documents>
                        <DocumentPanel/>
                    </Show>
                </div>
            </Show>

            <GenerationProgressModal/>
        </div>
    }
}
