use contracts::dashboards::d400_vendor_comparison::RiskAnalysis;
use contracts::enums::RiskLevel;
use contracts::shared::format::format_percentage;
use leptos::prelude::*;

#[component]
fn ScoreBar(label: &'static str, #[prop(into)] value: Signal<f64>) -> impl IntoView {
    view! {
        <div class="score-bar">
            <div class="score-bar__label">
                <span>{label}</span>
                <span class="score-bar__value">{move || format!("{:.0}", value.get())}</span>
            </div>
            <div class="score-bar__track">
                <div
                    class="score-bar__fill"
                    style=move || format!("width: {:.0}%;", value.get().clamp(0.0, 100.0))
                ></div>
            </div>
        </div>
    }
}

/// Risk distribution, average scores and leverage profile
#[component]
pub fn RiskAnalysisPanel(#[prop(into)] analysis: Signal<RiskAnalysis>) -> impl IntoView {
    let body = move || {
        if analysis.with(|a| a.is_empty()) {
            return view! {
                <div class="risk-panel__empty">"No vendor data available for risk analysis."</div>
            }
            .into_any();
        }

        let distribution = move || {
            let a = analysis.get();
            RiskLevel::all()
                .into_iter()
                .map(|level| {
                    let count = a.distribution.count(level);
                    let share = a.distribution.share(level);
                    view! {
                        <div class="risk-distribution__row">
                            <span class=level.badge_class()>{level.display_name()}</span>
                            <span class="risk-distribution__count">{count}</span>
                            <span class="risk-distribution__share">{format_percentage(share)}</span>
                        </div>
                    }
                })
                .collect_view()
        };

        let buckets = move || {
            analysis
                .get()
                .debt_equity_buckets
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(bucket, count)| {
                    view! {
                        <li class="leverage-list__item">
                            <span>{bucket.display_name()}</span>
                            <span class="leverage-list__count">{count}</span>
                        </li>
                    }
                })
                .collect_view()
        };

        let highest = move || {
            let symbols = analysis.get().highest_risk;
            if symbols.is_empty() {
                "None".to_string()
            } else {
                symbols.join(", ")
            }
        };

        view! {
            <div class="risk-panel__grid">
                <div class="risk-panel__block">
                    <h3>"Risk Distribution"</h3>
                    {distribution}
                </div>
                <div class="risk-panel__block">
                    <h3>"Average Scores"</h3>
                    <ScoreBar label="Financial Health" value=Signal::derive(move || analysis.get().average_scores.financial_health) />
                    <ScoreBar label="Market Stability" value=Signal::derive(move || analysis.get().average_scores.market_stability) />
                    <ScoreBar label="Growth Prospects" value=Signal::derive(move || analysis.get().average_scores.growth_prospects) />
                    <ScoreBar label="Financial Stability" value=Signal::derive(move || analysis.get().average_scores.financial_stability) />
                </div>
                <div class="risk-panel__block">
                    <h3>"Debt/Equity Profile"</h3>
                    <ul class="leverage-list">{buckets}</ul>
                    <div class="risk-panel__highest">
                        <span>"Highest risk: "</span>
                        <strong>{highest}</strong>
                    </div>
                </div>
            </div>
        }
        .into_any()
    };

    view! {
        <section class="dashboard-section risk-panel">
            <h2 class="dashboard-section__title">"Risk Analysis"</h2>
            {body}
        </section>
    }
}
