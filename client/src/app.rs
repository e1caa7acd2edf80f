//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{home::HomePage, workspace::WorkspacePage};
use crate::state::{
    catalog::CatalogState, generation::GenerationView, wizard::WizardState, workspace::WorkspaceState,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let wizard = RwSignal::new(WizardState::default());
    let catalog = RwSignal::new(CatalogState::default());
    let generation = RwSignal::new(GenerationView::default());
    let workspace = RwSignal::new(WorkspaceState::default());

    provide_context(wizard);
    provide_context(catalog);
    provide_context(generation);
    provide_context(workspace);

    view! {
        <Stylesheet id="leptos" href="/pkg/forgeflow.css"/>
        <Title text="ForgeFlow"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("screen"), ParamSegment("id")) view=WorkspacePage/>
            </Routes>
        </Router>
    }
}
