//! Step 2: layout selection.

use leptos::prelude::*;

use crate::state::catalog::CatalogState;
use crate::state::wizard::WizardState;

#[component]
pub fn LayoutStep() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();
    let selected = move || wizard.with(|w| w.wizard.data().step2.selected_layout);

    view! {
        <section class="wizard-step">
            <h2>"Layout"</h2>
            <Show when=move || catalog.with(|c| c.notice.is_some())>
                <p class="wizard__notice">{move || catalog.with(|c| c.notice.clone().unwrap_or_default())}</p>
            </Show>
            <div class="layout-grid">
                {move || {
                    catalog
                        .with(|c| c.catalog.layouts.clone())
                        .into_iter()
                        .map(|option| {
                            let layout = option.layout;
                            let areas = option.areas.clone();
                            let area_names = option.areas.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(" / ");
                            view! {
                                <button
                                    class="layout-card"
                                    class:layout-card--selected=move || selected() == Some(layout)
                                    on:click=move |_| wizard.update(|w| w.wizard.select_layout(layout, areas.clone()))
                                >
                                    <span class="layout-card__name">{option.name}</span>
                                    <span class="layout-card__description">{option.description}</span>
                                    <span class="layout-card__areas">{area_names}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || selected().is_none()>
                <p class="field__hint">"Choose a layout to continue."</p>
            </Show>
        </section>
    }
}
