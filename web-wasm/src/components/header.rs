//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Photo Studio"</h1>
            <p class="subtitle">"Transform your photos with filters and AI"</p>
        </header>
    }
}
