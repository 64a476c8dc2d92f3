pub mod app;
pub mod landing;
pub mod payment;
pub mod plan_details;
pub mod widgets;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::GymClient;
use crate::catalog::{self, CatalogState};
use crate::route::Route;

/// Shared by every view: backend client + navigation.
#[derive(Clone, PartialEq, Default)]
pub struct AppContext {
    pub client: GymClient,
    pub navigate: Callback<Route>,
}

#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().unwrap_or_default()
}

/// `false` once the component is gone; async work checks it before touching state.
#[hook]
pub fn use_mounted() -> Rc<Cell<bool>> {
    let flag = use_memo((), |_| Rc::new(Cell::new(true)));
    {
        let flag = (*flag).clone();
        use_effect_with((), move |_| move || flag.set(false));
    }
    (*flag).clone()
}

/// Fetches the catalog once when the calling view mounts.
#[hook]
pub fn use_catalog() -> CatalogState {
    let ctx = use_app();
    let state = use_state(CatalogState::default);
    let mounted = use_mounted();

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let next = catalog::load(&ctx.client).await;
                if mounted.get() {
                    state.set(next);
                } else {
                    log::debug!("view gone, dropping catalog response");
                }
            });
            || ()
        });
    }

    (*state).clone()
}

/// Blocking browser notification.
pub fn notify(message: &str) {
    gloo::dialogs::alert(message);
}

pub fn reload_page() {
    if let Some(w) = web_sys::window() {
        if let Err(e) = w.location().reload() {
            log::error!("reload failed: {e:?}");
        }
    }
}
