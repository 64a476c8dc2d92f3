use yew::prelude::*;

use crate::catalog::CatalogState;
use crate::model::SubscriptionPlan;

#[derive(Properties, PartialEq)]
pub struct PlanCardProps {
    pub plan: SubscriptionPlan,
    #[prop_or_default]
    pub selected: bool,
    #[prop_or_default]
    pub disabled: bool,
    pub on_pick: Callback<()>,
    pub action: AttrValue,
}

#[function_component(PlanCard)]
pub fn plan_card(props: &PlanCardProps) -> Html {
    let plan = &props.plan;
    let onclick = {
        let on_pick = props.on_pick.clone();
        Callback::from(move |_: MouseEvent| on_pick.emit(()))
    };

    let class = classes!("plan-card", props.selected.then_some("selected"));

    html! {
        <div {class}>
            if props.selected {
                <div class="check" aria-label="Selected">{ "✓" }</div>
            }
            <h3 class="plan-name">{ plan.name.clone() }</h3>
            <div class="price">
                <span class="amount">{ plan.price_label() }</span>
                <span class="per">{ format!(" / {}", plan.duration_label()) }</span>
            </div>
            if plan.details.is_empty() {
                <p class="small">{ "No details available." }</p>
            } else {
                <ul class="perks">
                    { for plan.details.iter().map(|d| html! {
                        <li key={d.id.to_string()}>{ format!("✓ {}", d.text) }</li>
                    }) }
                </ul>
            }
            <button type="button" class="btn" disabled={props.disabled} {onclick}>
                { props.action.to_string() }
            </button>
        </div>
    }
}

/// Loading / failed / empty states shared by every view that shows the catalog.
/// Returns `None` when there are plans to render.
pub fn catalog_notice(state: &CatalogState, on_retry: Callback<MouseEvent>) -> Option<Html> {
    match state {
        CatalogState::Loading => Some(html! {
            <div class="small">{ "Loading plans…" }</div>
        }),
        CatalogState::Failed(msg) => Some(html! {
            <div class="err">
                <div>{ format!("Couldn't load plans: {msg}") }</div>
                <button type="button" class="btn secondary" onclick={on_retry}>{ "Try again" }</button>
            </div>
        }),
        CatalogState::Loaded(plans) if plans.is_empty() => Some(html! {
            <div class="empty">{ "No plans are available right now. Please check back soon." }</div>
        }),
        CatalogState::Loaded(_) => None,
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub autocomplete: AttrValue,
    #[prop_or_default]
    pub multiline: bool,
    #[prop_or_default]
    pub invalid: bool,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<String>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_change.emit(input.value());
            } else if let Some(area) = e.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                on_change.emit(area.value());
            }
        })
    };

    let class = classes!("field", props.invalid.then_some("invalid"));

    html! {
        <label {class}>
            <span class="label">{ props.label.to_string() }</span>
            if props.multiline {
                <textarea
                    rows="3"
                    required=true
                    value={props.value.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            } else {
                <input
                    type={props.input_type.clone()}
                    required=true
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    autocomplete={props.autocomplete.clone()}
                    disabled={props.disabled}
                    {oninput}
                />
            }
        </label>
    }
}
