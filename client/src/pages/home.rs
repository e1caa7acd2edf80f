//! Landing page: menu tree and the screens under the selected menu.
//!
//! Top-level entries are folders. A selected folder takes new menus, a
//! selected menu takes new screens; creating a screen opens its workspace.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wire::api::{MenuCreate, MenuWithScreens, ScreenCreate, ScreenStatus, flatten_menus};
use wire::Menu;

use crate::net::api;

fn status_label(status: ScreenStatus) -> &'static str {
    match status {
        ScreenStatus::Draft => "Draft",
        ScreenStatus::InReview => "In review",
        ScreenStatus::Approved => "Approved",
    }
}

/// Screen id typed into the "open by id" box.
fn parse_screen_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Visible menu rows as `(depth, id, name, is_folder)`.
fn menu_rows(menus: &[Menu]) -> Vec<(usize, i64, String, bool)> {
    flatten_menus(menus)
        .into_iter()
        .map(|(depth, m)| (depth, m.id, m.name.clone(), m.is_folder))
        .collect()
}

/// Depth-first search of the menu tree.
fn find_menu(tree: &[Menu], menu_id: i64) -> Option<&Menu> {
    tree.iter().find_map(|m| {
        if m.id == menu_id {
            Some(m)
        } else {
            m.children.as_deref().and_then(|children| find_menu(children, menu_id))
        }
    })
}

/// Body for a menu under the selected folder. Menus only nest under folders.
fn child_menu_request(tree: &[Menu], selected: Option<&MenuWithScreens>, name: &str) -> Result<MenuCreate, String> {
    let parent = selected
        .filter(|s| s.menu.is_folder)
        .map(|s| find_menu(tree, s.menu.id).unwrap_or(&s.menu))
        .ok_or_else(|| "Select a folder first".to_owned())?;
    MenuCreate::child(name, parent).map_err(|e| e.to_string())
}

/// Body for a screen under the selected menu. Folders hold menus, not screens.
fn screen_request(selected: Option<&MenuWithScreens>, name: &str, description: &str) -> Result<ScreenCreate, String> {
    let menu = selected
        .filter(|s| !s.menu.is_folder)
        .ok_or_else(|| "Select a menu first".to_owned())?;
    ScreenCreate::new(menu.menu.id, name, description).map_err(|e| e.to_string())
}

async fn reload_menus(menus: RwSignal<Vec<Menu>>, error: RwSignal<Option<String>>) {
    match api::fetch_menus().await {
        Ok(list) => menus.set(list),
        Err(e) => {
            log::warn!("home: menu fetch failed: {e}");
            error.set(Some(e));
        }
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let menus = RwSignal::new(Vec::<Menu>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let selected = RwSignal::new(None::<MenuWithScreens>);
    let screen_input = RwSignal::new(String::new());
    let folder_name = RwSignal::new(String::new());
    let menu_name = RwSignal::new(String::new());
    let screen_name = RwSignal::new(String::new());
    let screen_description = RwSignal::new(String::new());
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        reload_menus(menus, error).await;
        loading.set(false);
    });

    let open_menu = move |menu_id: i64| {
        error.set(None);
        leptos::task::spawn_local(async move {
            match api::fetch_menu(menu_id).await {
                Ok(menu) => selected.set(Some(menu)),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let created_screen = RwSignal::new(None::<i64>);
    let navigate_created = navigate.clone();
    Effect::new(move || {
        if let Some(screen_id) = created_screen.get() {
            created_screen.set(None);
            navigate_created(&format!("/screen/{screen_id}"), NavigateOptions::default());
        }
    });

    let open_screen = move |_| match parse_screen_id(&screen_input.get_untracked()) {
        Some(id) => navigate(&format!("/screen/{id}"), NavigateOptions::default()),
        None => error.set(Some("Enter a numeric screen id".to_owned())),
    };

    let create_folder = move |_| {
        let body = match menus.with_untracked(|tree| MenuCreate::folder(&folder_name.get_untracked(), tree)) {
            Ok(body) => body,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        leptos::task::spawn_local(async move {
            match api::create_menu(&body).await {
                Ok(folder) => {
                    log::info!("home: created folder {} ({})", folder.name, folder.id);
                    folder_name.set(String::new());
                    reload_menus(menus, error).await;
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let create_menu = move |_| {
        let body = selected.with_untracked(|s| {
            menus.with_untracked(|tree| child_menu_request(tree, s.as_ref(), &menu_name.get_untracked()))
        });
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        leptos::task::spawn_local(async move {
            match api::create_menu(&body).await {
                Ok(menu) => {
                    log::info!("home: created menu {} ({})", menu.name, menu.id);
                    menu_name.set(String::new());
                    reload_menus(menus, error).await;
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let create_screen = move |_| {
        let body = selected.with_untracked(|s| {
            screen_request(s.as_ref(), &screen_name.get_untracked(), &screen_description.get_untracked())
        });
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        leptos::task::spawn_local(async move {
            match api::create_screen(&body).await {
                Ok(screen) => {
                    log::info!("home: created screen {} under menu {}", screen.id, screen.menu_id);
                    screen_name.set(String::new());
                    screen_description.set(String::new());
                    created_screen.set(Some(screen.id));
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let delete_menu = move |_| {
        let Some(menu_id) = selected.with_untracked(|s| s.as_ref().map(|m| m.menu.id)) else {
            return;
        };
        error.set(None);
        leptos::task::spawn_local(async move {
            match api::delete_menu(menu_id).await {
                Ok(()) => {
                    log::info!("home: deleted menu {menu_id}");
                    selected.set(None);
                    reload_menus(menus, error).await;
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let selected_is_folder = move || selected.with(|s| s.as_ref().map(|m| m.menu.is_folder));

    view! {
        <div class="home-page">
            <header class="home-page__header toolbar">
                <span class="toolbar__title">"ForgeFlow"</span>
                <span class="toolbar__spacer"></span>
                <input
                    class="field__input"
                    type="text"
                    placeholder="Screen id"
                    prop:value=move || screen_input.get()
                    on:input=move |ev| screen_input.set(event_target_value(&ev))
                />
                <button class="btn" on:click=open_screen>"Open screen"</button>
            </header>

            <Show when=move || error.with(Option::is_some)>
                <p class="home-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="home-page__body">
                <nav class="menu-tree">
                    <div class="menu-tree__create">
                        <input
                            class="field__input"
                            type="text"
                            placeholder="New folder"
                            prop:value=move || folder_name.get()
                            on:input=move |ev| folder_name.set(event_target_value(&ev))
                        />
                        <button class="btn btn--small" on:click=create_folder>"Add folder"</button>
                    </div>
                    <Show when=move || !loading.get() fallback=|| view! { <p>"Loading menus..."</p> }>
                        {move || {
                            menus
                                .with(|m| menu_rows(m))
                                .into_iter()
                                .map(|(depth, id, name, is_folder)| {
                                    view! {
                                        <button
                                            class="menu-tree__item"
                                            class:menu-tree__item--folder=is_folder
                                            class:menu-tree__item--active=move || {
                                                selected.with(|s| s.as_ref().is_some_and(|m| m.menu.id == id))
                                            }
                                            style=format!("padding-left: calc(0.5rem + {depth}rem)")
                                            on:click=move |_| open_menu(id)
                                        >
                                            {name}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </Show>
                </nav>

                <section class="screen-list">
                    <Show when=move || selected_is_folder().is_some()>
                        <div class="screen-list__actions">
                            <Show
                                when=move || selected_is_folder() == Some(true)
                                fallback=move || {
                                    view! {
                                        <input
                                            class="field__input"
                                            type="text"
                                            placeholder="Screen name"
                                            prop:value=move || screen_name.get()
                                            on:input=move |ev| screen_name.set(event_target_value(&ev))
                                        />
                                        <input
                                            class="field__input"
                                            type="text"
                                            placeholder="Description (optional)"
                                            prop:value=move || screen_description.get()
                                            on:input=move |ev| screen_description.set(event_target_value(&ev))
                                        />
                                        <button class="btn btn--primary" on:click=create_screen>"Add screen"</button>
                                    }
                                }
                            >
                                <input
                                    class="field__input"
                                    type="text"
                                    placeholder="New menu"
                                    prop:value=move || menu_name.get()
                                    on:input=move |ev| menu_name.set(event_target_value(&ev))
                                />
                                <button class="btn btn--primary" on:click=create_menu>"Add menu"</button>
                            </Show>
                            <button class="btn btn--danger" on:click=delete_menu>"Delete"</button>
                        </div>
                    </Show>
                    {move || match selected.get() {
                        None => view! { <p class="screen-list__empty">"Select a menu"</p> }.into_any(),
                        Some(menu) if menu.screens.is_empty() => {
                            view! { <p class="screen-list__empty">{format!("No screens under {}", menu.menu.name)}</p> }
                                .into_any()
                        }
                        Some(menu) => {
                            view! {
                                <h2 class="screen-list__title">{menu.menu.name.clone()}</h2>
                                <ul class="screen-list__items">
                                    {menu
                                        .screens
                                        .into_iter()
                                        .map(|screen| {
                                            view! {
                                                <li class="screen-list__item">
                                                    <a href=format!("/screen/{}", screen.id)>{screen.name}</a>
                                                    <span class="screen-list__status">{status_label(screen.status)}</span>
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                                .into_any()
                        }
                    }}
                </section>
            </div>
        </div>
    }
}
