//! Dashboard listing this session's bills and their analysis outcomes.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route; the login flows all end here.
//! Figures are derived from the bills analyzed in this browser session.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::bills::{BillRecord, BillsState, format_rupees};
use crate::state::language::{Label, Language};
use crate::util::auth::install_unauth_redirect;
use crate::util::file::format_file_size;

/// Bills shown in the recent list.
const RECENT_LIMIT: usize = 5;

/// `2.5 MB • Analysis Complete`.
pub(crate) fn bill_caption(bill: &BillRecord) -> String {
    format!("{} • {}", format_file_size(bill.size_bytes), bill.status.label())
}

/// Dashboard page. Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let bills = expect_context::<RwSignal<BillsState>>();
    let language = expect_context::<RwSignal<Language>>();
    install_unauth_redirect(auth, use_navigate());

    let stats = Memo::new(move |_| bills.get().stats());
    let name = move || auth.get().display_name().unwrap_or_default();

    view! {
        <Show
            when=move || auth.get().is_authenticated()
            fallback=move || view! { <div class="dashboard__loading">"Loading..."</div> }
        >
            <div class="dashboard">
                <header class="dashboard__header">
                    <div>
                        <h1>{move || format!("Welcome back, {}", name())}</h1>
                        <p>"Track your medical bill analyses and savings."</p>
                    </div>
                    <a href="/upload" class="btn btn--primary">{move || language.get().label(Label::UploadBill)}</a>
                </header>

                <div class="dashboard__stats">
                    <div class="stat-card">
                        <h3>{move || stats.get().total_bills}</h3>
                        <p>"Total Bills"</p>
                    </div>
                    <div class="stat-card">
                        <h3>{move || format_rupees(stats.get().total_savings)}</h3>
                        <p>"Total Savings"</p>
                    </div>
                    <div class="stat-card">
                        <h3>{move || stats.get().pending}</h3>
                        <p>"Pending Analysis"</p>
                    </div>
                    <div class="stat-card">
                        <h3>{move || stats.get().avg_processing_time}</h3>
                        <p>"Avg. Processing Time"</p>
                    </div>
                </div>

                <section class="dashboard__recent">
                    <h2>"Recent Bills"</h2>
                    {move || {
                        let state = bills.get();
                        if state.bills.is_empty() {
                            return view! {
                                <div class="dashboard__empty">
                                    <p>"No bills uploaded yet."</p>
                                    <a href="/upload">"Upload your first bill"</a>
                                </div>
                            }
                                .into_any();
                        }
                        state
                            .recent(RECENT_LIMIT)
                            .iter()
                            .map(|bill| {
                                let caption = bill_caption(bill);
                                let summary = bill.summary.clone();
                                view! {
                                    <div class="bill-row">
                                        <div class="bill-row__main">
                                            <h3>{bill.file_name.clone()}</h3>
                                            <p>{caption}</p>
                                        </div>
                                        {summary
                                            .map(|s| {
                                                view! {
                                                    <div class="bill-row__result">
                                                        <span class="bill-row__saved">
                                                            {format!("{} saved", format_rupees(s.total_overcharge))}
                                                        </span>
                                                        <span>{s.verdict}</span>
                                                        <span>{format!("{:.0}%", s.confidence_score)}</span>
                                                    </div>
                                                }
                                            })}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </section>
            </div>
        </Show>
    }
}
