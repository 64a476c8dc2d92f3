use std::rc::Rc;

use gloo_file::{File, FileList, ObjectUrl};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::widgets::{catalog_notice, PlanCard, TextField};
use super::{notify, reload_page, use_app, use_catalog, use_mounted};
use crate::attachments::{MediaAttachments, MediaKind};
use crate::catalog::CatalogState;
use crate::registration::{send_registration, Field, FlowAction, Phase, RegistrationFlow};
use crate::route::Route;

/// Object URLs are revoked when the last clone of the `Rc` drops.
type Media = MediaAttachments<File, Rc<ObjectUrl>>;

fn preview_of(file: &File) -> Rc<ObjectUrl> {
    Rc::new(ObjectUrl::from((**file).clone()))
}

fn src(url: &str) -> AttrValue {
    AttrValue::from(url.to_string())
}

/// Files picked in an `<input type="file">`, then clears it so the same file
/// can be picked again.
fn take_files(e: &Event) -> Vec<File> {
    let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
        return Vec::new();
    };
    let files = input
        .files()
        .map(|list| FileList::from(list).to_vec())
        .unwrap_or_default();
    input.set_value("");
    files
}

#[derive(Properties, PartialEq)]
pub struct PlanDetailsProps {
    /// Route segment: a plan id or name slug.
    pub plan: AttrValue,
}

#[function_component(PlanDetailsPage)]
pub fn plan_details_page(props: &PlanDetailsProps) -> Html {
    let ctx = use_app();
    let catalog = use_catalog();
    let mounted = use_mounted();
    let flow = {
        let hint = props.plan.to_string();
        use_reducer(move || RegistrationFlow::new(Some(hint)))
    };
    // Catalog in -> editing.
    {
        let flow = flow.clone();
        use_effect_with(catalog.clone(), move |state| {
            if let CatalogState::Loaded(plans) = state {
                flow.dispatch(FlowAction::CatalogLoaded(plans.clone()));
            }
            || ()
        });
    }

    // Deep link matched nothing loaded: ask the backend for that one plan.
    {
        let flow = flow.clone();
        let client = ctx.client.clone();
        let mounted = mounted.clone();
        use_effect_with(flow.unresolved_hint().map(str::to_string), move |hint| {
            if let Some(hint) = hint.clone() {
                spawn_local(async move {
                    match client.plan(&hint).await {
                        Ok(plan) if mounted.get() => {
                            flow.dispatch(FlowAction::AdoptLookedUpPlan(plan.id))
                        }
                        Ok(_) => {}
                        Err(e) => log::warn!("no plan for deep link '{hint}': {e}"),
                    }
                });
            }
            || ()
        });
    }

    // Send whatever the flow queued. At most one at a time.
    {
        let flow = flow.clone();
        let client = ctx.client.clone();
        let mounted = mounted.clone();
        use_effect_with(flow.in_flight().cloned(), move |request| {
            if let Some(request) = request.clone() {
                spawn_local(async move {
                    let result = send_registration(&client, &request).await;
                    if !mounted.get() {
                        return;
                    }
                    if let Err(e) = &result {
                        notify(&format!("Failed to register gym. {}", e.user_message()));
                    }
                    flow.dispatch(FlowAction::Finished(result));
                });
            }
            || ()
        });
    }

    {
        let navigate = ctx.navigate.clone();
        use_effect_with(flow.phase(), move |phase| {
            if *phase == Phase::Submitted {
                navigate.emit(Route::Payment);
            }
            || ()
        });
    }

    let submitting = flow.phase() == Phase::Submitting;

    let onsubmit = {
        let flow = flow.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            flow.dispatch(FlowAction::Submit);
        })
    };

    let dismiss = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| flow.dispatch(FlowAction::DismissError))
    };

    let plan_grid = match catalog_notice(&catalog, Callback::from(|_| reload_page())) {
        Some(notice) => notice,
        None => html! {
            <div class="plans">
                { for flow.plans().iter().map(|plan| {
                    let selected = flow.is_selected(&plan.id);
                    let on_pick = {
                        let flow = flow.clone();
                        let id = plan.id.clone();
                        Callback::from(move |_: ()| {
                            flow.dispatch(FlowAction::SelectPlan(id.clone()))
                        })
                    };
                    html! {
                        <PlanCard
                            key={plan.id.to_string()}
                            plan={plan.clone()}
                            {selected}
                            disabled={submitting}
                            action={if selected { "Selected" } else { "Select" }}
                            {on_pick}
                        />
                    }
                }) }
            </div>
        },
    };

    let fields = Field::TEXT.into_iter().map(|field| {
        let on_change = {
            let flow = flow.clone();
            Callback::from(move |v: String| flow.dispatch(FlowAction::Edit(field, v)))
        };
        html! {
            <TextField
                label={field.label()}
                value={flow.draft().value(field).to_string()}
                input_type={field.input_type()}
                multiline={field == Field::Address}
                invalid={flow.invalid_fields().contains(&field)}
                disabled={submitting}
                {on_change}
            />
        }
    });

    let banner = match flow.selected_plan() {
        Some(plan) => format!("Selected Plan: {}", plan.name),
        None => "No plan selected".to_string(),
    };

    html! {
        <div class="wrap">
            <header class="hero">
                <h1>{ "Complete Your Registration" }</h1>
                <div class="badge">{ banner }</div>
                <p class="small">{ "Fill in your details to get started." }</p>
            </header>

            if let Some(err) = flow.error() {
                <div class="err" role="alert">
                    <span>{ err.to_string() }</span>
                    <button type="button" class="btn secondary" onclick={dismiss}>{ "Dismiss" }</button>
                </div>
            }

            <form {onsubmit}>
                <section class="card">
                    <h2><span class="step">{ "1" }</span>{ "Confirm or Change Your Plan" }</h2>
                    { plan_grid }
                    if flow.invalid_fields().contains(&Field::Plan) {
                        <div class="err">{ "Please pick a plan." }</div>
                    }
                </section>

                <section class="card">
                    <h2><span class="step">{ "2" }</span>{ "Basic Information" }</h2>
                    <div class="form-grid">{ for fields }</div>
                </section>

                <section class="card">
                    <h2><span class="step">{ "3" }</span>{ "Logo, Photos & Videos" }</h2>
                    <p class="small">{ "Optional. Previews stay on this device." }</p>
                    <MediaPicker disabled={submitting} />
                </section>

                <div class="actions">
                    <button type="submit" class="btn" disabled={submitting || flow.phase() != Phase::Editing}>
                        { if submitting { "Submitting…" } else { "Proceed to Payment" } }
                    </button>
                </div>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MediaPickerProps {
    disabled: bool,
}

/// Local-only previews; nothing here is sent with the registration.
#[function_component(MediaPicker)]
fn media_picker(props: &MediaPickerProps) -> Html {
    let media = use_state(Media::default);

    let on_logo = {
        let media = media.clone();
        Callback::from(move |e: Event| {
            let Some(file) = take_files(&e).into_iter().next() else {
                return;
            };
            let mut next = (*media).clone();
            let preview = preview_of(&file);
            // Dropping the old pair revokes its object URL.
            drop(next.set_logo(file, preview));
            media.set(next);
        })
    };

    let clear_logo = {
        let media = media.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*media).clone();
            drop(next.clear_logo());
            media.set(next);
        })
    };

    let on_add = |kind: MediaKind| {
        let media = media.clone();
        Callback::from(move |e: Event| {
            let files = take_files(&e);
            if files.is_empty() {
                return;
            }
            let mut next = (*media).clone();
            next.list_mut(kind)
                .extend(files.into_iter().map(|f| {
                    let preview = preview_of(&f);
                    (f, preview)
                }));
            media.set(next);
        })
    };

    let on_remove = |kind: MediaKind, index: usize| {
        let media = media.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*media).clone();
            drop(next.list_mut(kind).remove(index));
            media.set(next);
        })
    };

    let gallery = |kind: MediaKind| {
        let list = media.list(kind);
        if list.is_empty() {
            return html! { <div class="small">{ "None added yet." }</div> };
        }
        html! {
            <div class="thumbs">
                { for list.iter().enumerate().map(|(i, (file, url))| {
                    let preview = src(url);
                    html! {
                        <div class="thumb" key={format!("{i}-{}", file.name())}>
                            if kind == MediaKind::Photos {
                                <img src={preview} alt={file.name()} />
                            } else {
                                <video src={preview} controls=true />
                            }
                            <button type="button" class="remove" aria-label="Remove"
                                disabled={props.disabled}
                                onclick={on_remove(kind, i)}>{ "✕" }</button>
                        </div>
                    }
                }) }
            </div>
        }
    };

    html! {
        <div class="media">
            <label class="field">
                <span class="label">{ "Logo" }</span>
                <input type="file" accept="image/*" disabled={props.disabled} onchange={on_logo} />
            </label>
            if let Some((file, url)) = media.logo() {
                <div class="thumb">
                    <img src={src(url)} alt={file.name()} />
                    <button type="button" class="remove" aria-label="Remove logo"
                        disabled={props.disabled}
                        onclick={clear_logo}>{ "✕" }</button>
                </div>
            }

            <label class="field">
                <span class="label">{ format!("Photos ({})", media.list(MediaKind::Photos).len()) }</span>
                <input type="file" multiple=true accept={MediaKind::Photos.accept()}
                    disabled={props.disabled} onchange={on_add(MediaKind::Photos)} />
            </label>
            { gallery(MediaKind::Photos) }

            <label class="field">
                <span class="label">{ format!("Videos ({})", media.list(MediaKind::Videos).len()) }</span>
                <input type="file" multiple=true accept={MediaKind::Videos.accept()}
                    disabled={props.disabled} onchange={on_add(MediaKind::Videos)} />
            </label>
            { gallery(MediaKind::Videos) }
        </div>
    }
}
