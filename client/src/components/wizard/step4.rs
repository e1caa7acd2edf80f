//! Step 4: trigger -> action interactions.

#[cfg(test)]
#[path = "step4_test.rs"]
mod step4_test;

use leptos::prelude::*;
use wire::catalog::{needs_modal, needs_target_area, trigger_event_label};
use wire::wizard::{ComponentType, InteractionDraft, ModalField, ModalKind, ModalSize, TriggerEvent};

use crate::state::catalog::CatalogState;
use crate::state::wizard::WizardState;

const MODAL_SIZES: [(ModalSize, &str); 5] = [
    (ModalSize::Sm, "Small"),
    (ModalSize::Md, "Medium"),
    (ModalSize::Lg, "Large"),
    (ModalSize::Xl, "Extra large"),
    (ModalSize::Full, "Full screen"),
];

const MODAL_KINDS: [(ModalKind, &str); 4] = [
    (ModalKind::Form, "Input form"),
    (ModalKind::Detail, "Detail view"),
    (ModalKind::Confirm, "Confirmation"),
    (ModalKind::Custom, "Custom"),
];

/// Form-modal fields, one label per line. A trailing `*` marks the field
/// required; blank lines are skipped.
fn parse_modal_fields(text: &str) -> Vec<ModalField> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| {
            let (label, required) = match line.strip_suffix('*') {
                Some(rest) => (rest.trim_end(), true),
                None => (line, false),
            };
            ModalField {
                id: format!("field-{}", index + 1),
                label: label.to_owned(),
                field_type: ComponentType::Textbox,
                required,
                placeholder: None,
                options: None,
            }
        })
        .collect()
}

fn size_from_index(raw: &str) -> ModalSize {
    raw.parse::<usize>().ok().and_then(|i| MODAL_SIZES.get(i)).map_or(ModalSize::Md, |(size, _)| *size)
}

fn kind_from_index(raw: &str) -> ModalKind {
    raw.parse::<usize>().ok().and_then(|i| MODAL_KINDS.get(i)).map_or(ModalKind::Form, |(kind, _)| *kind)
}

#[component]
pub fn InteractionsStep() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();

    let trigger = RwSignal::new(String::new());
    let event = RwSignal::new(TriggerEvent::default());
    let action = RwSignal::new(String::new());
    let target_area = RwSignal::new(String::new());
    let modal_title = RwSignal::new(String::new());
    let modal_size = RwSignal::new(ModalSize::Md);
    let modal_kind = RwSignal::new(ModalKind::Form);
    let modal_fields = RwSignal::new(String::new());
    let modal_content = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let triggers = move || {
        wizard.with(|w| {
            w.wizard
                .interactable_components()
                .into_iter()
                .map(|c| (c.id.clone(), c.label.clone(), c.component_type))
                .collect::<Vec<_>>()
        })
    };
    let trigger_events = move || {
        let id = trigger.get();
        let component_type = triggers().into_iter().find(|(cid, _, _)| *cid == id).map(|(_, _, t)| t);
        component_type.map_or_else(Vec::new, |t| catalog.with(|c| c.catalog.events_for(t)))
    };

    let on_add = move |_| {
        let draft = InteractionDraft {
            trigger_component_id: trigger.get_untracked(),
            trigger_event: event.get_untracked(),
            action_type: action.get_untracked(),
            target_area_id: Some(target_area.get_untracked()).filter(|a| !a.is_empty()),
            modal_title: modal_title.get_untracked(),
            modal_size: modal_size.get_untracked(),
            modal_kind: modal_kind.get_untracked(),
            modal_fields: parse_modal_fields(&modal_fields.get_untracked()),
            modal_content: modal_content.get_untracked(),
            description: description.get_untracked(),
        };
        if wizard.try_update(|w| w.edit(|wz| wz.add_interaction(draft))).flatten().is_some() {
            modal_title.set(String::new());
            modal_fields.set(String::new());
            modal_content.set(String::new());
            description.set(String::new());
        }
    };

    view! {
        <section class="wizard-step">
            <h2>"Interactions"</h2>
            <Show when=move || triggers().is_empty()>
                <p class="field__hint">"Place an interactive component in step 3 to define interactions."</p>
            </Show>

            <div class="interaction-form">
                <label class="field">
                    <span class="field__label">"When"</span>
                    <select
                        class="field__input"
                        on:change=move |ev| {
                            trigger.set(event_target_value(&ev));
                            event.set(trigger_events().first().copied().unwrap_or_default());
                        }
                    >
                        <option value="" selected=move || trigger.get().is_empty()>"Select a component"</option>
                        {move || {
                            triggers()
                                .into_iter()
                                .map(|(id, label, kind)| {
                                    let selected_id = id.clone();
                                    view! {
                                        <option value=id selected=move || trigger.get() == selected_id>
                                            {format!("{label} ({})", kind.as_str())}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>

                <label class="field">
                    <span class="field__label">"Event"</span>
                    <select
                        class="field__input"
                        on:change=move |ev| {
                            if let Some(parsed) = TriggerEvent::parse(&event_target_value(&ev)) {
                                event.set(parsed);
                            }
                        }
                    >
                        {move || {
                            trigger_events()
                                .into_iter()
                                .map(|e| {
                                    view! {
                                        <option value=e.as_str() selected=move || event.get() == e>
                                            {trigger_event_label(e)}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>

                <label class="field">
                    <span class="field__label">"Action"</span>
                    <select class="field__input" on:change=move |ev| action.set(event_target_value(&ev))>
                        <option value="" selected=move || action.get().is_empty()>"Select an action"</option>
                        {move || {
                            catalog
                                .with(|c| c.catalog.actions.clone())
                                .into_iter()
                                .map(|a| {
                                    let selected_id = a.id.clone();
                                    view! {
                                        <option value=a.id title=a.description selected=move || action.get() == selected_id>
                                            {a.name}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>

                <Show when=move || needs_target_area(&action.get())>
                    <label class="field">
                        <span class="field__label">"Target area"</span>
                        <select class="field__input" on:change=move |ev| target_area.set(event_target_value(&ev))>
                            <option value="">"Select an area"</option>
                            {move || {
                                wizard
                                    .with(|w| w.wizard.data().step2.layout_areas.clone())
                                    .into_iter()
                                    .map(|area| {
                                        let selected_id = area.id.clone();
                                        view! {
                                            <option value=area.id selected=move || target_area.get() == selected_id>
                                                {area.name}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                </Show>

                <Show when=move || needs_modal(&action.get())>
                    <fieldset class="interaction-form__modal">
                        <legend>"Modal"</legend>
                        <input
                            class="field__input"
                            type="text"
                            placeholder="Modal title"
                            prop:value=move || modal_title.get()
                            on:input=move |ev| modal_title.set(event_target_value(&ev))
                        />
                        <select class="field__input" on:change=move |ev| modal_size.set(size_from_index(&event_target_value(&ev)))>
                            {MODAL_SIZES
                                .iter()
                                .enumerate()
                                .map(|(i, (size, name))| {
                                    let size = *size;
                                    view! { <option value=i.to_string() selected=move || modal_size.get() == size>{*name}</option> }
                                })
                                .collect_view()}
                        </select>
                        <select class="field__input" on:change=move |ev| modal_kind.set(kind_from_index(&event_target_value(&ev)))>
                            {MODAL_KINDS
                                .iter()
                                .enumerate()
                                .map(|(i, (kind, name))| {
                                    let kind = *kind;
                                    view! { <option value=i.to_string() selected=move || modal_kind.get() == kind>{*name}</option> }
                                })
                                .collect_view()}
                        </select>
                        <Show
                            when=move || modal_kind.get() == ModalKind::Form
                            fallback=move || {
                                view! {
                                    <textarea
                                        class="field__input"
                                        rows="3"
                                        placeholder="Modal content"
                                        prop:value=move || modal_content.get()
                                        on:input=move |ev| modal_content.set(event_target_value(&ev))
                                    ></textarea>
                                }
                            }
                        >
                            <textarea
                                class="field__input"
                                rows="4"
                                placeholder="One field label per line, end with * if required"
                                prop:value=move || modal_fields.get()
                                on:input=move |ev| modal_fields.set(event_target_value(&ev))
                            ></textarea>
                        </Show>
                    </fieldset>
                </Show>

                <input
                    class="field__input"
                    type="text"
                    placeholder="Description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <button
                    class="btn btn--primary"
                    disabled=move || trigger.get().is_empty() || action.get().is_empty()
                    on:click=on_add
                >
                    "Add interaction"
                </button>
            </div>

            <InteractionList/>
        </section>
    }
}

#[component]
fn InteractionList() -> impl IntoView {
    let wizard = expect_context::<RwSignal<WizardState>>();
    let catalog = expect_context::<RwSignal<CatalogState>>();

    let rows = move || {
        wizard.with(|w| {
            let data = w.wizard.data();
            data.step4
                .interactions
                .iter()
                .map(|i| {
                    let trigger = data
                        .step3
                        .components
                        .iter()
                        .find(|c| c.id == i.trigger_component_id)
                        .map_or_else(|| i.trigger_component_id.clone(), |c| c.label.clone());
                    let action = catalog
                        .with_untracked(|c| c.catalog.action(&i.action_type).map(|a| a.name.clone()))
                        .unwrap_or_else(|| i.action_type.clone());
                    let detail = match (&i.target_area_id, &i.modal_config) {
                        (Some(area), _) => format!("-> {area}"),
                        (None, Some(modal)) => format!("-> {} ({})", modal.title, modal.id),
                        (None, None) => String::new(),
                    };
                    (i.id.clone(), format!("{trigger} / {}", trigger_event_label(i.trigger_event)), action, detail)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <ul class="interaction-list">
            {move || {
                rows()
                    .into_iter()
                    .map(|(id, when, action, detail)| {
                        view! {
                            <li class="interaction-list__item">
                                <span class="interaction-list__when">{when}</span>
                                <span class="interaction-list__action">{action}</span>
                                <span class="interaction-list__detail">{detail}</span>
                                <button
                                    class="interaction-list__remove"
                                    title="Remove interaction"
                                    on:click=move |_| wizard.update(|w| w.wizard.remove_interaction(&id))
                                >
                                    "✕"
                                </button>
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ul>
    }
}
