use gloo::history::{BrowserHistory, History};
use yew::prelude::*;

use super::landing::LandingPage;
use super::payment::PaymentPage;
use super::plan_details::PlanDetailsPage;
use super::AppContext;
use crate::api::GymClient;
use crate::config::ApiConfig;
use crate::route::Route;

#[function_component(App)]
pub fn app() -> Html {
    let history = use_memo((), |_| BrowserHistory::new());
    let client = use_memo((), |_| GymClient::browser(ApiConfig::from_environment()));
    let route = {
        let history = history.clone();
        use_state(move || Route::parse(history.location().path()))
    };

    // Back/forward and our own pushes both land here.
    {
        let history = history.clone();
        let route = route.clone();
        use_effect_with((), move |_| {
            let reader = (*history).clone();
            let listener = history.listen(move || {
                let next = Route::parse(reader.location().path());
                log::info!("route -> {}", next.path());
                route.set(next);
            });
            move || drop(listener)
        });
    }

    let navigate = use_callback(history.clone(), |to: Route, history| {
        history.push(to.path());
        if let Some(w) = web_sys::window() {
            w.scroll_to_with_x_and_y(0.0, 0.0);
        }
    });

    let ctx = AppContext {
        client: (*client).clone(),
        navigate,
    };

    let page = match (*route).clone() {
        Route::Landing => html! { <LandingPage /> },
        Route::PlanDetails(plan) => {
            let key = plan.clone();
            html! { <PlanDetailsPage key={key} {plan} /> }
        }
        Route::Payment => html! { <PaymentPage /> },
        Route::NotFound => {
            let go_home = {
                let navigate = ctx.navigate.clone();
                Callback::from(move |_: MouseEvent| navigate.emit(Route::Landing))
            };
            html! {
                <div class="wrap">
                    <div class="hero">
                        <h1>{ "Page not found" }</h1>
                        <button class="btn" onclick={go_home}>{ "Back to home" }</button>
                    </div>
                </div>
            }
        }
    };

    html! {
        <ContextProvider<AppContext> context={ctx}>
            { page }
        </ContextProvider<AppContext>>
    }
}
