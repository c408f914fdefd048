//! Bill upload and analysis page.
//!
//! SYSTEM CONTEXT
//! ==============
//! A file picked or dropped here is validated, given a `doc_id`, and sent
//! base64-encoded to the analysis service with the chosen settings. The bill
//! is tracked in `BillsState` through upload, processing and outcome.
//!
//! On success the page moves to the dashboard after 2 s unless the user starts
//! asking follow-up questions, which go to the enhanced endpoint with the same
//! document and settings.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use authflow::driver::Liveness;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::analysis_report::AnalysisReport;
use crate::config::ClientConfig;
use crate::net::types::{AnalysisRequest, AnalysisSettings, INSURANCE_OPTIONS, LANGUAGE_OPTIONS, STATE_OPTIONS};
use crate::state::auth::AuthState;
use crate::state::bills::BillsState;
use crate::state::upload::{ANALYSIS_SUCCESS_TEXT, UploadState};
use crate::util::auth::install_unauth_redirect;
use crate::util::file::{ACCEPT_ATTR, SelectedFile, format_file_size};

/// Delay before leaving for the dashboard after a successful analysis.
pub const REDIRECT_AFTER_SUCCESS: std::time::Duration = std::time::Duration::from_secs(2);

pub(crate) fn analysis_request(
    file_content: String,
    doc_id: &str,
    user_id: &str,
    file: &SelectedFile,
    settings: &AnalysisSettings,
    query: Option<String>,
) -> AnalysisRequest {
    AnalysisRequest {
        file_content,
        doc_id: doc_id.to_owned(),
        user_id: user_id.to_owned(),
        language: settings.language.clone(),
        state_code: settings.state_code.clone(),
        insurance_type: settings.insurance_type.clone(),
        file_format: file.format.as_str().to_owned(),
        query,
    }
}

/// Whether the success timer may still move to the dashboard. `stay` is
/// `None` once the page's signal has been disposed.
pub(crate) fn leave_after_success(page_alive: bool, stay: Option<bool>) -> bool {
    page_alive && stay == Some(false)
}

fn options_view(options: &'static [(&'static str, &'static str)]) -> impl IntoView {
    options
        .iter()
        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
        .collect::<Vec<_>>()
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let bills = expect_context::<RwSignal<BillsState>>();
    let upload = expect_context::<RwSignal<UploadState>>();
    install_unauth_redirect(auth, use_navigate());

    // Set once the user asks a follow-up; cancels the dashboard redirect.
    let stay = RwSignal::new(false);
    let file_content = StoredValue::new(None::<String>);
    let analysis_base = config.analysis_base.clone();

    // Requests outlive the page; page-owned values are off limits once this
    // flips. `upload` and `bills` are app-wide and stay valid.
    let mounted = Liveness::new();
    on_cleanup({
        let mounted = mounted.clone();
        move || mounted.cancel()
    });

    #[cfg(feature = "hydrate")]
    let selected = StoredValue::new_local(None::<web_sys::File>);
    #[cfg(feature = "hydrate")]
    let orchestrator = StoredValue::new_local(crate::auth::host::browser_orchestrator());

    #[cfg(feature = "hydrate")]
    let accept_file = move |file: web_sys::File| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = file.size().max(0.0) as u64;
        match crate::util::file::validate(&file.name(), &file.type_(), size) {
            Ok(meta) => {
                upload.update(|s| s.select(meta, crate::util::file::generate_doc_id()));
                file_content.set_value(None);
                stay.set(false);
                selected.set_value(Some(file));
            }
            Err(e) => {
                upload.update(|s| s.reject(&e));
                selected.set_value(None);
            }
        }
    };

    let on_input_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                accept_file(file);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_drag_over = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        upload.update(|s| s.drag_active = true);
    };
    let on_drag_leave = move |_ev: leptos::ev::DragEvent| upload.update(|s| s.drag_active = false);
    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        upload.update(|s| s.drag_active = false);
        #[cfg(feature = "hydrate")]
        {
            if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)) {
                accept_file(file);
            }
        }
    };

    let base_for_analyze = analysis_base.clone();
    let on_analyze = move |_| {
        let Some(user_id) = auth.get_untracked().user.map(|u| u.id) else {
            return;
        };
        let mut started = false;
        upload.update(|s| started = s.begin_analysis());
        if !started {
            return;
        }
        let state = upload.get_untracked();
        let (Some(meta), Some(doc_id)) = (state.file, state.doc_id) else {
            upload.update(|s| s.fail("Upload failed".to_owned()));
            return;
        };
        bills.update(|b| {
            b.track(crate::state::bills::BillRecord {
                id: doc_id.clone(),
                file_name: meta.name.clone(),
                size_bytes: meta.size,
                uploaded_at_ms: crate::util::storage::now_ms(),
                status: crate::state::bills::BillStatus::Uploading,
                summary: None,
            });
        });

        #[cfg(feature = "hydrate")]
        {
            use crate::state::bills::BillStatus;

            let base = base_for_analyze.clone();
            let settings = state.settings;
            let mounted = mounted.clone();
            let Some(file) = selected.get_value() else {
                upload.update(|s| s.fail("Upload failed".to_owned()));
                bills.update(|b| b.set_status(&doc_id, BillStatus::Error));
                return;
            };
            leptos::task::spawn_local(async move {
                let content = match crate::util::file::read_base64(&file).await {
                    Ok(content) => content,
                    Err(e) => {
                        upload.update(|s| s.fail(e.to_string()));
                        bills.update(|b| b.set_status(&doc_id, BillStatus::Error));
                        return;
                    }
                };
                bills.update(|b| b.set_status(&doc_id, BillStatus::Processing));
                let request = analysis_request(content.clone(), &doc_id, &user_id, &meta, &settings, None);
                match crate::net::analysis::analyze(&base, &request).await {
                    Ok(summary) => {
                        bills.update(|b| b.complete(&doc_id, summary.clone()));
                        upload.update(|s| s.finish_analysis(summary));
                        if !mounted.is_alive() {
                            return;
                        }
                        file_content.set_value(Some(content));
                        gloo_timers::future::sleep(REDIRECT_AFTER_SUCCESS).await;
                        if leave_after_success(mounted.is_alive(), stay.try_get_untracked()) {
                            orchestrator.try_with_value(|o| o.navigate_to_dashboard());
                        }
                    }
                    Err(e) => {
                        leptos::logging::warn!("bill analysis failed: {e}");
                        bills.update(|b| b.set_status(&doc_id, BillStatus::Error));
                        upload.update(|s| s.fail(e.to_string()));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&base_for_analyze, &mounted, user_id, meta, doc_id);
    };

    let on_ask = Callback::new(move |question: String| {
        let mut queued = None;
        upload.update(|s| queued = s.ask(&question));
        let Some(query) = queued else {
            return;
        };
        stay.set(true);
        let state = upload.get_untracked();
        let user_id = auth.get_untracked().user.map(|u| u.id).unwrap_or_default();
        let (Some(meta), Some(doc_id), Some(content)) = (state.file, state.doc_id, file_content.get_value()) else {
            upload.update(|s| s.fail("Analyze a bill before asking about it".to_owned()));
            return;
        };
        let request = analysis_request(content, &doc_id, &user_id, &meta, &state.settings, Some(query));
        #[cfg(feature = "hydrate")]
        {
            let base = analysis_base.clone();
            leptos::task::spawn_local(async move {
                match crate::net::analysis::ask(&base, &request).await {
                    Ok(reply) => upload.update(|s| s.answer(reply)),
                    Err(e) => upload.update(|s| s.fail(e.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&analysis_base, request);
    });

    let file_meta = move || upload.get().file;
    let success_text = move || {
        if stay.get() { "Bill analyzed successfully!" } else { ANALYSIS_SUCCESS_TEXT }
    };

    view! {
        <div class="upload-page">
            <header class="upload-page__header">
                <h1>"Medical Bill Assistant"</h1>
                <p>"Upload bills and get instant analysis"</p>
                <button class="btn btn--ghost" on:click=move |_| upload.update(|s| s.show_settings = !s.show_settings)>
                    "Settings"
                </button>
            </header>

            <Show when=move || upload.get().show_settings>
                <div class="upload-settings">
                    <h2>"Analysis Settings"</h2>
                    <label>
                        "Language"
                        <select
                            prop:value=move || upload.get().settings.language
                            on:change=move |ev| upload.update(|s| s.settings.language = event_target_value(&ev))
                        >
                            {options_view(LANGUAGE_OPTIONS)}
                        </select>
                    </label>
                    <label>
                        "State"
                        <select
                            prop:value=move || upload.get().settings.state_code
                            on:change=move |ev| upload.update(|s| s.settings.state_code = event_target_value(&ev))
                        >
                            {options_view(STATE_OPTIONS)}
                        </select>
                    </label>
                    <label>
                        "Insurance Type"
                        <select
                            prop:value=move || upload.get().settings.insurance_type
                            on:change=move |ev| upload.update(|s| s.settings.insurance_type = event_target_value(&ev))
                        >
                            {options_view(INSURANCE_OPTIONS)}
                        </select>
                    </label>
                </div>
            </Show>

            <div
                class="dropzone"
                class:dropzone--active=move || upload.get().drag_active
                on:dragenter=on_drag_over
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                {move || match file_meta() {
                    Some(meta) => {
                        view! {
                            <div class="dropzone__file">
                                <span class="dropzone__name">{meta.name}</span>
                                <span class="dropzone__size">{format_file_size(meta.size)}</span>
                                <button
                                    class="btn btn--ghost"
                                    disabled=move || upload.get().busy
                                    on:click=move |_| upload.update(UploadState::remove_file)
                                >
                                    "Remove"
                                </button>
                            </div>
                        }
                            .into_any()
                    }
                    None => {
                        view! {
                            <label class="dropzone__prompt">
                                <span>"Drop your bill here or click to browse"</span>
                                <input type="file" accept=ACCEPT_ATTR on:change=on_input_change/>
                            </label>
                        }
                            .into_any()
                    }
                }}
                <p class="dropzone__hint">"Supported files: PDF, JPEG, PNG (max 10MB)"</p>
            </div>

            {move || upload.get().error.map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || upload.get().success.then(|| view! { <div class="alert alert--success">{success_text}</div> })}

            <button
                class="btn btn--primary upload-page__analyze"
                disabled=move || { let s = upload.get(); s.busy || s.file.is_none() }
                on:click=on_analyze
            >
                {move || if upload.get().busy { "Analyzing..." } else { "Analyze Bill" }}
            </button>

            <AnalysisReport upload=upload on_ask=on_ask/>
        </div>
    }
}
