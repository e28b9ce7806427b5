use super::view_model::DashboardViewModel;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn NotificationStack(vm: DashboardViewModel) -> impl IntoView {
    view! {
        <div class="notification-stack" aria-live="polite">
            <For
                each=move || vm.notifications.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class()>
                            <span class="notification__message">{n.message.clone()}</span>
                            <button
                                class="button button--icon notification__close"
                                on:click=move |_| vm.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
