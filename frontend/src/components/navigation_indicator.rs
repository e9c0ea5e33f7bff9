use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use yew::prelude::*;

use crate::config::{ScrollConfig, Section, SECTIONS};
use crate::scroll::listener::ScrollSubscription;
use crate::scroll::tracker::{scroll_to_section, ScrollSnapshot, ScrollTracker};
use crate::scroll::viewport::WebViewport;

#[derive(Properties, PartialEq)]
pub struct NavigationIndicatorProps {
    #[prop_or(SECTIONS)]
    pub sections: &'static [Section],
    #[prop_or_default]
    pub config: ScrollConfig,
}

/// Top progress bar plus the side dot navigation.
#[function_component(NavigationIndicator)]
pub fn navigation_indicator(props: &NavigationIndicatorProps) -> Html {
    let sections = props.sections;
    let snapshot = use_state(|| ScrollSnapshot {
        progress: 0.0,
        active_section: sections.first().map(|s| s.key),
    });

    {
        let snapshot = snapshot.clone();
        use_effect_with_deps(
            move |(sections, config): &(&'static [Section], ScrollConfig)| {
                let on_change = Callback::from(move |update: ScrollSnapshot| snapshot.set(update));
                let subscription = WebViewport::new().and_then(|viewport| {
                    let tracker = ScrollTracker::starting_at(sections, config.clone(), viewport.scroll_y());
                    ScrollSubscription::start(Rc::new(RefCell::new(tracker)), viewport, on_change)
                });
                let subscription = match subscription {
                    Ok(subscription) => Some(subscription),
                    Err(e) => {
                        warn!("Scroll tracking disabled: {}", e);
                        None
                    }
                };
                move || {
                    if let Some(subscription) = subscription {
                        subscription.stop();
                    }
                }
            },
            (sections, props.config.clone()),
        );
    }

    let scroll_to = Callback::from(|key: &'static str| match WebViewport::new() {
        Ok(viewport) => {
            scroll_to_section(&viewport, key);
        }
        Err(e) => warn!("Cannot scroll to '{}': {}", key, e),
    });

    let bar_style = format!("width: {:.2}%;", snapshot.progress);

    html! {
        <>
            <div class="scroll-progress" role="progressbar"
                aria-valuemin="0" aria-valuemax="100"
                aria-valuenow={format!("{:.0}", snapshot.progress)}>
                <div class="scroll-progress-fill" style={bar_style}></div>
            </div>
            <aside role="complementary" aria-label="Section navigation">
                <nav class="section-dots" role="navigation" aria-label="Page sections">
                    {
                        sections.iter().map(|section| {
                            let key = section.key;
                            let is_active = snapshot.active_section == Some(key);
                            let onclick = {
                                let scroll_to = scroll_to.clone();
                                Callback::from(move |_: MouseEvent| scroll_to.emit(key))
                            };
                            html! {
                                <button
                                    key={key}
                                    class={classes!("section-dot", is_active.then(|| "active"))}
                                    aria-label={format!("Go to {}", section.label)}
                                    aria-current={is_active.then(|| "true")}
                                    {onclick}
                                >
                                    <span class="section-dot-tooltip">{section.label}</span>
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </nav>
            </aside>
            <style>
                {r#"
                    .scroll-progress {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        height: 4px;
                        background: rgba(229, 231, 235, 0.3);
                        z-index: 50;
                    }
                    .scroll-progress-fill {
                        height: 100%;
                        background: linear-gradient(to right, #eab308, #f97316, #ef4444);
                        box-shadow: 0 0 10px rgba(245, 158, 11, 0.5);
                        transition: width 0.1s ease-out;
                    }
                    .section-dots {
                        position: fixed;
                        right: 1.5rem;
                        top: 50%;
                        transform: translateY(-50%);
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                        z-index: 40;
                    }
                    .section-dot {
                        position: relative;
                        width: 12px;
                        height: 12px;
                        border: none;
                        border-radius: 50%;
                        background: #d1d5db;
                        cursor: pointer;
                        transition: all 0.3s;
                    }
                    .section-dot.active {
                        background: #eab308;
                        transform: scale(1.25);
                    }
                    .section-dot-tooltip {
                        position: absolute;
                        right: 1.5rem;
                        top: 50%;
                        transform: translateY(-50%);
                        padding: 0.25rem 0.75rem;
                        background: #111827;
                        color: white;
                        font-size: 0.875rem;
                        border-radius: 0.5rem;
                        white-space: nowrap;
                        opacity: 0;
                        visibility: hidden;
                        transition: all 0.2s;
                    }
                    .section-dot.active .section-dot-tooltip,
                    .section-dot:hover .section-dot-tooltip {
                        opacity: 1;
                        visibility: visible;
                    }
                    .reduced-motion .scroll-progress-fill,
                    .reduced-motion .section-dot {
                        transition: none;
                    }
                    @media (max-width: 1024px) {
                        .section-dots {
                            display: none;
                        }
                    }
                "#}
            </style>
        </>
    }
}
