//! クイックフィルタパネル

use leptos::prelude::*;
use photo_studio_common::catalog::{PanelEvent, PANEL_SUBTITLE, PANEL_TITLE};
use photo_studio_common::catalog::TransformationPanel as PanelState;
use photo_studio_common::{FilterType, FILTER_CATALOG};

#[component]
pub fn TransformationPanel<F>(
    #[prop(into)] active: Signal<FilterType>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(FilterType) + 'static + Clone,
{
    let buttons = FILTER_CATALOG
        .iter()
        .map(|entry| {
            let filter = entry.filter;
            let on_select = on_select.clone();
            view! {
                <button
                    class=move || if active.get() == filter { "filter-btn active" } else { "filter-btn" }
                    on:click=move |_| {
                        let PanelEvent::Selected(filter) = PanelState::new(active.get_untracked()).click(filter);
                        on_select(filter);
                    }
                >
                    <span class="filter-icon">{entry.icon}</span>
                    <span class="filter-name">{entry.name}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="panel transformation-panel">
            <h2>{PANEL_TITLE}</h2>
            <p class="text-muted">{PANEL_SUBTITLE}</p>
            <div class="filter-grid">{buttons}</div>
        </section>
    }
}
