use crate::shared::icons::icon;
use contracts::dashboards::d400_vendor_comparison::Recommendation;
use leptos::prelude::*;

#[component]
pub fn RecommendationsPanel(
    #[prop(into)] recommendations: Signal<Vec<Recommendation>>,
) -> impl IntoView {
    let body = move || {
        let recs = recommendations.get();
        if recs.is_empty() {
            return view! {
                <div class="recommendations__healthy">
                    {icon("check-circle")}
                    <div>
                        <h3>"Excellent Portfolio Health"</h3>
                        <p>"No risk flags detected across the vendor portfolio. Continue regular monitoring."</p>
                    </div>
                </div>
            }
            .into_any();
        }
        recs.into_iter()
            .map(|rec| {
                let affected = rec.affected_symbols.join(", ");
                view! {
                    <article class="recommendation" data-rule=rec.id.clone()>
                        <header class="recommendation__header">
                            <span class=rec.priority.badge_class()>{rec.priority.display_name()}</span>
                            <h3 class="recommendation__title">{rec.title.clone()}</h3>
                        </header>
                        <p class="recommendation__description">{rec.description.clone()}</p>
                        <p class="recommendation__action">
                            <strong>"Action: "</strong>
                            {rec.action.clone()}
                        </p>
                        <p class="recommendation__affected">{format!("Affected: {}", affected)}</p>
                    </article>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <section class="dashboard-section recommendations">
            <h2 class="dashboard-section__title">"Recommendations"</h2>
            {body}
        </section>
    }
}
