//! Step 3: place components into layout areas.

use leptos::prelude::*;
use wire::catalog::ComponentCategory;
use wire::wizard::{ComponentType, LayoutArea};

use crate::state::catalog::CatalogState;
use crate::state::wizard::WizardState;

#[component]
pub fn ComponentsStep() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();

    let picked = RwSignal::new(None::<ComponentType>);
    let label = RwSignal::new(String::new());

    let areas = move || wizard.with(|w| w.wizard.data().step2.layout_areas.clone());
    let selected_area = move || wizard.with(|w| w.wizard.data().step3.selected_area_id.clone());

    let on_add = move |_| {
        let Some(component_type) = picked.get_untracked() else {
            return;
        };
        let text = label.get_untracked();
        if wizard.try_update(|w| w.edit(|wz| wz.add_component(component_type, &text))).flatten().is_some() {
            label.set(String::new());
        }
    };

    view! {
        <section class="wizard-step wizard-step--split">
            <div class="area-list">
                <h2>"Areas"</h2>
                <Show when=move || areas().is_empty()>
                    <p class="field__hint">"Choose a layout first."</p>
                </Show>
                {move || {
                    areas()
                        .into_iter()
                        .map(|area| view! { <AreaCard area=area selected=Signal::derive(selected_area)/> })
                        .collect_view()
                }}
            </div>

            <div class="component-palette">
                <h2>"Components"</h2>
                {ComponentCategory::ALL
                    .into_iter()
                    .map(|category| {
                        view! {
                            <h3 class="component-palette__category">{category.title()}</h3>
                            <div class="component-palette__items">
                                {move || {
                                    catalog
                                        .with(|c| {
                                            c.catalog
                                                .components_in_category(category.as_str())
                                                .into_iter()
                                                .map(|o| (o.component_type, o.name.clone(), o.description.clone()))
                                                .collect::<Vec<_>>()
                                        })
                                        .into_iter()
                                        .map(|(component_type, name, description)| {
                                            let default_label = name.clone();
                                            view! {
                                                <button
                                                    class="component-palette__item"
                                                    class:component-palette__item--picked=move || picked.get() == Some(component_type)
                                                    title=description
                                                    on:click=move |_| {
                                                        picked.set(Some(component_type));
                                                        if label.get_untracked().trim().is_empty() {
                                                            label.set(default_label.clone());
                                                        }
                                                    }
                                                >
                                                    {name}
                                                </button>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        }
                    })
                    .collect_view()}

                <div class="component-palette__add">
                    <input
                        class="field__input"
                        type="text"
                        placeholder="Label"
                        prop:value=move || label.get()
                        on:input=move |ev| label.set(event_target_value(&ev))
                    />
                    <button
                        class="btn btn--primary"
                        disabled=move || picked.get().is_none() || selected_area().is_empty()
                        on:click=on_add
                    >
                        "Add to area"
                    </button>
                </div>
            </div>
        </section>
    }
}

/// One layout area with the components placed in it.
#[component]
fn AreaCard(area: LayoutArea, selected: Signal<String>) -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let area_id = area.id.clone();
    let is_selected = {
        let area_id = area_id.clone();
        move || selected.get() == area_id
    };
    let select_id = area_id.clone();
    let suggestions = area.suggested_components.clone().unwrap_or_default().join(", ");

    view! {
        <div
            class="area-card"
            class:area-card--selected=is_selected
            on:click=move |_| {
                let id = select_id.clone();
                wizard.update(|w| {
                    w.edit(|wz| wz.select_area(&id));
                });
            }
        >
            <div class="area-card__header">
                <span class="area-card__name">{area.name.clone()}</span>
                <span class="area-card__description">{area.description.clone()}</span>
            </div>
            <Show when={
                let suggestions = suggestions.clone();
                move || !suggestions.is_empty()
            }>
                <span class="area-card__suggested">"Suggested: " {suggestions.clone()}</span>
            </Show>
            <ul class="area-card__components">
                {move || {
                    wizard
                        .with(|w| {
                            w.wizard
                                .components_in_area(&area_id)
                                .into_iter()
                                .map(|c| (c.id.clone(), c.label.clone(), c.component_type.as_str()))
                                .collect::<Vec<_>>()
                        })
                        .into_iter()
                        .map(|(id, label, kind)| {
                            view! {
                                <li class="area-card__component">
                                    <span>{label}</span>
                                    <span class="area-card__kind">{kind}</span>
                                    <button
                                        class="area-card__remove"
                                        title="Remove component"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            wizard.update(|w| w.wizard.remove_component(&id));
                                        }
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
