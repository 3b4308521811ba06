//! AI変換プロンプト入力コンポーネント
//!
//! バックエンドが無効な間は入力・送信・候補ボタンすべて無効。

use leptos::prelude::*;
use photo_studio_common::prompt::{is_submit_key, PANEL_TITLE, PLACEHOLDER};
use photo_studio_common::PromptInput as PromptState;
use photo_studio_common::SUGGESTIONS;
use web_sys::KeyboardEvent;

#[component]
pub fn PromptInput<F>(
    disabled: bool,
    #[prop(into)] processing: Signal<bool>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone,
{
    let (state, set_state) = signal(PromptState::new(disabled));

    let on_keydown = {
        let on_submit = on_submit.clone();
        move |ev: KeyboardEvent| {
            if is_submit_key(&ev.key(), ev.shift_key()) {
                ev.prevent_default();
            }
            let submitted = state.with_untracked(|s| {
                s.key_down(&ev.key(), ev.shift_key(), processing.get_untracked())
            });
            if let Some(prompt) = submitted {
                on_submit(prompt);
            }
        }
    };

    let on_send = {
        let on_submit = on_submit.clone();
        move |_| {
            if let Some(prompt) = state.with_untracked(|s| s.submit(processing.get_untracked())) {
                on_submit(prompt);
            }
        }
    };

    let suggestions = SUGGESTIONS
        .iter()
        .map(|&suggestion| {
            let on_submit = on_submit.clone();
            view! {
                <button
                    class="suggestion"
                    disabled=move || !state.with(|s| s.is_interactive(processing.get()))
                    on:click=move |_| {
                        let mut submitted = None;
                        set_state.update(|s| {
                            submitted = s.click_suggestion(suggestion, processing.get_untracked());
                        });
                        if let Some(prompt) = submitted {
                            on_submit(prompt);
                        }
                    }
                >
                    {suggestion}
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="panel prompt-input">
            <h2>"✨ " {PANEL_TITLE}</h2>
            <textarea
                rows="3"
                placeholder=PLACEHOLDER
                prop:value=move || state.with(|s| s.text().to_string())
                disabled=move || !state.with(|s| s.is_interactive(processing.get()))
                on:input=move |ev| set_state.update(|s| s.set_text(event_target_value(&ev)))
                on:keydown=on_keydown
            ></textarea>
            <button
                class="send-btn"
                disabled=move || !state.with(|s| s.can_send(processing.get()))
                on:click=on_send
            >
                "➤"
            </button>
            <p class="text-muted">"Try these:"</p>
            <div class="suggestions">{suggestions}</div>
        </section>
    }
}
