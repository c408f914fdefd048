//! Analysis result card and follow-up conversation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the upload state. Assistant messages are markdown rendered with raw
//! HTML stripped; questions are handed back to the page through `on_ask`,
//! which owns the network call.

use leptos::prelude::*;

use crate::state::bills::format_rupees;
use crate::state::upload::{MessageRole, UploadState};
use crate::util::markdown::render_markdown_html;

#[component]
pub fn AnalysisReport(upload: RwSignal<UploadState>, on_ask: Callback<String>) -> impl IntoView {
    let question = RwSignal::new(String::new());

    let send = move || {
        let text = question.get_untracked();
        if text.trim().is_empty() || upload.get_untracked().busy {
            return;
        }
        question.set(String::new());
        on_ask.run(text);
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <section class="report">
            {move || {
                upload
                    .get()
                    .summary
                    .map(|summary| {
                        view! {
                            <div class="report__summary">
                                <div class="report__figure">
                                    <span class="report__label">"Verdict"</span>
                                    <span class="report__value">{summary.verdict.clone()}</span>
                                </div>
                                <div class="report__figure">
                                    <span class="report__label">"Overcharge"</span>
                                    <span class="report__value">{format_rupees(summary.total_overcharge)}</span>
                                </div>
                                <div class="report__figure">
                                    <span class="report__label">"Confidence"</span>
                                    <span class="report__value">{format!("{:.0}%", summary.confidence_score)}</span>
                                </div>
                            </div>
                        }
                    })
            }}

            <div class="report__messages">
                {move || {
                    upload
                        .get()
                        .messages
                        .into_iter()
                        .map(|msg| {
                            let is_assistant = msg.role == MessageRole::Assistant;
                            view! {
                                <div class="report__message" class:report__message--assistant=is_assistant>
                                    {if is_assistant {
                                        let rendered = render_markdown_html(&msg.content);
                                        view! { <div class="report__markdown" inner_html=rendered></div> }.into_any()
                                    } else {
                                        view! { <span>{msg.content}</span> }.into_any()
                                    }}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                {move || upload.get().busy.then(|| view! { <div class="report__loading">"Analyzing..."</div> })}
            </div>

            <Show when=move || upload.get().summary.is_some()>
                <div class="report__input-row">
                    <input
                        class="report__input"
                        type="text"
                        placeholder="Ask about this bill..."
                        disabled=move || upload.get().busy
                        prop:value=move || question.get()
                        on:input=move |ev| question.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button
                        class="btn btn--primary"
                        on:click=move |_| send()
                        disabled=move || upload.get().busy || question.get().trim().is_empty()
                    >
                        "Send"
                    </button>
                </div>
            </Show>
        </section>
    }
}
