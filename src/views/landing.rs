use yew::prelude::*;

use super::widgets::{catalog_notice, PlanCard};
use super::{reload_page, use_app, use_catalog};
use crate::landing::{Accordion, MenuState, ProcessSection, CONTACT, FEATURES};
use crate::route::Route;

fn scroll_to(id: &str) {
    let target = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id));
    if let Some(el) = target {
        el.scroll_into_view();
    }
}

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    let ctx = use_app();
    let catalog = use_catalog();
    let menu = use_state(MenuState::default);
    let accordion = use_state(Accordion::default);

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.toggled()))
    };

    let jump = {
        let menu = menu.clone();
        move |id: &'static str| {
            let menu = menu.clone();
            Callback::from(move |_: MouseEvent| {
                scroll_to(id);
                menu.set(MenuState::Closed);
            })
        }
    };

    let nav_links = html! {
        <>
            <button class="chip" onclick={jump("features")}>{ "Features" }</button>
            <button class="chip" onclick={jump("pricing")}>{ "Pricing" }</button>
            <button class="chip" onclick={jump("contact")}>{ "Contact" }</button>
        </>
    };

    let pricing = match catalog_notice(&catalog, Callback::from(|_| reload_page())) {
        Some(notice) => notice,
        None => {
            let plans = catalog.plans().unwrap_or_default();
            html! {
                <div class="plans">
                    { for plans.iter().map(|plan| {
                        let navigate = ctx.navigate.clone();
                        let slug = plan.slug();
                        let on_pick = Callback::from(move |_: ()| {
                            navigate.emit(Route::PlanDetails(slug.clone()))
                        });
                        html! {
                            <PlanCard
                                key={plan.id.to_string()}
                                plan={plan.clone()}
                                action="Choose Plan"
                                {on_pick}
                            />
                        }
                    }) }
                </div>
            }
        }
    };

    let process = html! {
        <div class="accordion">
            { for ProcessSection::ALL.into_iter().map(|section| {
                let accordion = accordion.clone();
                let open = accordion.expanded() == Some(section);
                let onclick = Callback::from(move |_: MouseEvent| {
                    accordion.set(accordion.toggled(section))
                });
                html! {
                    <button class={classes!("acc-head", open.then_some("open"))} {onclick}>
                        { section.title() }
                        <span class="chev">{ if open { "▴" } else { "▾" } }</span>
                    </button>
                }
            }) }
            if let Some(section) = accordion.expanded() {
                <p class="acc-body">{ section.body() }</p>
            }
        </div>
    };

    html! {
        <div class="wrap">
            <nav class="topbar">
                <div class="brand">{ "T2G Gym Software" }</div>
                <div class="nav-desktop">{ nav_links.clone() }</div>
                <button class="menu-toggle" aria-label="Toggle menu" onclick={toggle_menu.clone()}>
                    { if menu.is_open() { "✕" } else { "☰" } }
                </button>
            </nav>

            if menu.is_open() {
                <div class="menu-overlay" onclick={toggle_menu}></div>
                <div class="mobile-menu">{ nav_links }</div>
            }

            <header class="hero">
                <h1>{ "Run your gym, not spreadsheets" }</h1>
                <p>{ "Memberships, payments, attendance and staff in one place." }</p>
                <button class="btn" onclick={jump("pricing")}>{ "See plans" }</button>
            </header>

            <section class="card">
                <h2>{ "Member Registration Process" }</h2>
                <p class="small">
                    { "Give your members self-service tools to sign up and manage their own profiles." }
                </p>
                { process }
            </section>

            <section id="features" class="card">
                <h2>{ "Smart Fitness Features" }</h2>
                <div class="grid">
                    { for FEATURES.iter().map(|f| html! {
                        <div class="feature">
                            <h3>{ f.title }</h3>
                            <p class="small">{ f.description }</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="pricing" class="card">
                <h2>{ "Membership Plans" }</h2>
                { pricing }
            </section>

            <section id="contact" class="card">
                <h2>{ "Get in Touch" }</h2>
                <p>{ format!("📍 {}", CONTACT.address) }</p>
                <p>{ format!("📞 {}", CONTACT.phone) }</p>
                <p>{ format!("✉️ {}", CONTACT.email) }</p>
                { for CONTACT.hours.iter().map(|h| html! { <p class="small">{ *h }</p> }) }
            </section>

            <footer class="footer">{ "© T2G Gym Software" }</footer>
        </div>
    }
}
