use yew::prelude::*;

use crate::components::accessibility_widget::AccessibilityWidget;
use crate::components::navigation_indicator::NavigationIndicator;
use crate::config::SECTIONS;

/// Single-page layout: one anchor per navigation section.
#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="landing-page">
            <NavigationIndicator />
            {
                SECTIONS.iter().map(|section| html! {
                    <section id={section.key} key={section.key} class={classes!("page-section", section.key)}>
                        <h2>{section.label}</h2>
                    </section>
                }).collect::<Html>()
            }
            <AccessibilityWidget />
            <style>
                {r#"
                    .page-section {
                        min-height: 100vh;
                        padding: 6rem 1.5rem;
                    }
                "#}
            </style>
        </div>
    }
}
