use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

use crate::accessibility::{AccessibilitySettings, Adjustment, Flag, Profile, SettingsChange};
use crate::scroll::viewport::ViewportError;

fn page_elements() -> Result<(HtmlElement, HtmlElement), ViewportError> {
    let document = web_sys::window()
        .ok_or(ViewportError::NoWindow)?
        .document()
        .ok_or(ViewportError::NoDocument)?;
    let root = document
        .document_element()
        .ok_or(ViewportError::NoDocument)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ViewportError::NoDocument)?;
    let body = document.body().ok_or(ViewportError::NoBody)?;
    Ok((root, body))
}

fn apply_settings(settings: &AccessibilitySettings) -> Result<(), ViewportError> {
    let (root, body) = page_elements()?;
    let style_err = |e| ViewportError::dom("set style", e);

    root.style()
        .set_property("font-size", &settings.root_font_size())
        .map_err(style_err)?;
    let body_style = body.style();
    body_style
        .set_property("line-height", &settings.body_line_height())
        .map_err(style_err)?;
    body_style
        .set_property("letter-spacing", &settings.body_letter_spacing())
        .map_err(style_err)?;
    body_style
        .set_property("filter", settings.body_filter())
        .map_err(style_err)?;

    let classes = body.class_list();
    for (class, on) in settings.body_classes() {
        classes
            .toggle_with_force(class, on)
            .map_err(|e| ViewportError::dom("toggle body class", e))?;
    }
    Ok(())
}

fn clear_settings() {
    let Ok((root, body)) = page_elements() else {
        return;
    };
    let _ = root.style().remove_property("font-size");
    let body_style = body.style();
    for property in ["line-height", "letter-spacing", "filter"] {
        let _ = body_style.remove_property(property);
    }
    let classes = body.class_list();
    for (class, _) in AccessibilitySettings::default().body_classes() {
        let _ = classes.remove_1(class);
    }
}

#[derive(Clone, Copy, PartialEq)]
enum WidgetTab {
    Quick,
    Advanced,
}

#[function_component(AccessibilityWidget)]
pub fn accessibility_widget() -> Html {
    let is_open = use_state(|| false);
    let active_tab = use_state(|| WidgetTab::Quick);
    let settings = use_state(AccessibilitySettings::default);

    use_effect_with_deps(
        |settings: &AccessibilitySettings| {
            if let Err(e) = apply_settings(settings) {
                warn!("Failed to apply accessibility settings: {}", e);
            }
            || clear_settings()
        },
        (*settings).clone(),
    );

    let update = {
        let settings = settings.clone();
        Callback::from(move |change: SettingsChange| {
            let mut next = (*settings).clone();
            next.apply(change);
            settings.set(next);
        })
    };

    let toggle_open = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let select_tab = |tab: WidgetTab| {
        let active_tab = active_tab.clone();
        Callback::from(move |_: MouseEvent| active_tab.set(tab))
    };

    let emit = |change: SettingsChange| {
        let update = update.clone();
        Callback::from(move |_: MouseEvent| update.emit(change))
    };

    let adjuster = |label: &'static str, value: String, adjustment: Adjustment| {
        html! {
            <div class="a11y-adjuster">
                <span>{label}</span>
                <div class="a11y-adjuster-controls">
                    <button aria-label={format!("Decrease {}", label)}
                        onclick={emit(SettingsChange::Decrease(adjustment))}>{"−"}</button>
                    <span class="a11y-value">{value}</span>
                    <button aria-label={format!("Increase {}", label)}
                        onclick={emit(SettingsChange::Increase(adjustment))}>{"+"}</button>
                </div>
            </div>
        }
    };

    let panel = if *is_open {
        let body = match *active_tab {
            WidgetTab::Quick => html! {
                <div class="a11y-profiles">
                    {
                        Profile::ALL.iter().map(|&profile| html! {
                            <button class="a11y-profile" onclick={emit(SettingsChange::Profile(profile))}>
                                {profile.label()}
                            </button>
                        }).collect::<Html>()
                    }
                </div>
            },
            WidgetTab::Advanced => html! {
                <>
                    {adjuster("Font size", settings.root_font_size(), Adjustment::FontSize)}
                    {adjuster("Line height", settings.body_line_height(), Adjustment::LineHeight)}
                    {adjuster("Letter spacing", settings.body_letter_spacing(), Adjustment::LetterSpacing)}
                    <div class="a11y-flags">
                        {
                            Flag::ALL.iter().map(|&flag| {
                                let onchange = {
                                    let update = update.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        update.emit(SettingsChange::Set(flag, input.checked()));
                                    })
                                };
                                html! {
                                    <label class="a11y-flag">
                                        <input type="checkbox" checked={settings.flag(flag)} {onchange} />
                                        <span>{flag.label()}</span>
                                    </label>
                                }
                            }).collect::<Html>()
                        }
                    </div>
                </>
            },
        };
        html! {
            <div class="a11y-panel" role="dialog" aria-label="Accessibility settings">
                <div class="a11y-tabs">
                    <button class={classes!("a11y-tab", (*active_tab == WidgetTab::Quick).then(|| "active"))}
                        onclick={select_tab(WidgetTab::Quick)}>{"Profiles"}</button>
                    <button class={classes!("a11y-tab", (*active_tab == WidgetTab::Advanced).then(|| "active"))}
                        onclick={select_tab(WidgetTab::Advanced)}>{"Advanced"}</button>
                </div>
                {body}
                <button class="a11y-reset" onclick={emit(SettingsChange::Reset)}>{"Reset"}</button>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="a11y-widget">
            <button class="a11y-toggle" aria-label="Accessibility settings"
                aria-expanded={(*is_open).to_string()} onclick={toggle_open}>
                {"♿"}
            </button>
            {panel}
            <style>
                {r#"
                    .a11y-widget {
                        position: fixed;
                        bottom: 1.5rem;
                        left: 1.5rem;
                        z-index: 50;
                    }
                    .a11y-toggle {
                        width: 3.5rem;
                        height: 3.5rem;
                        border: none;
                        border-radius: 50%;
                        background: linear-gradient(to right, #eab308, #f97316);
                        color: white;
                        font-size: 1.5rem;
                        cursor: pointer;
                    }
                    .a11y-panel {
                        position: absolute;
                        bottom: 4.5rem;
                        left: 0;
                        width: 20rem;
                        max-height: 70vh;
                        overflow-y: auto;
                        padding: 1rem;
                        background: white;
                        color: #111827;
                        border-radius: 1rem;
                        box-shadow: 0 16px 32px rgba(0, 0, 0, 0.3);
                    }
                    .a11y-tabs, .a11y-adjuster, .a11y-adjuster-controls {
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        gap: 0.5rem;
                        margin-bottom: 0.75rem;
                    }
                    .a11y-tab.active {
                        border-bottom: 2px solid #eab308;
                    }
                    .a11y-profiles, .a11y-flags {
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        gap: 0.5rem;
                    }
                    .a11y-reset {
                        margin-top: 1rem;
                        width: 100%;
                    }
                "#}
            </style>
        </div>
    }
}
