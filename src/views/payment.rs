use yew::prelude::*;

use super::widgets::TextField;
use super::{notify, use_app};
use crate::payment::{CardField, MockProcessor, PaymentDetails, PaymentOutcome, PaymentProcessor};
use crate::route::Route;

#[function_component(PaymentPage)]
pub fn payment_page() -> Html {
    let ctx = use_app();
    let details = use_state(PaymentDetails::default);
    let err = use_state(|| None::<String>);

    let onsubmit = {
        let details = details.clone();
        let err = err.clone();
        let navigate = ctx.navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match MockProcessor.pay(&details) {
                Ok(PaymentOutcome::Succeeded) => {
                    err.set(None);
                    notify("Payment processed successfully!");
                    navigate.emit(Route::Landing);
                }
                Err(e) => err.set(Some(e.to_string())),
            }
        })
    };

    let fields = CardField::ALL.into_iter().map(|field| {
        let on_change = {
            let details = details.clone();
            Callback::from(move |v: String| {
                let mut next = (*details).clone();
                next.set(field, v);
                details.set(next);
            })
        };
        html! {
            <TextField
                label={field.label()}
                value={details.value(field).to_string()}
                placeholder={field.placeholder()}
                autocomplete={field.autocomplete()}
                {on_change}
            />
        }
    });

    html! {
        <div class="wrap narrow">
            <header class="hero">
                <h1>{ "Complete Payment" }</h1>
            </header>

            <form class="card" {onsubmit}>
                <div class="form-grid">{ for fields }</div>
                if let Some(e) = (*err).clone() {
                    <div class="err">{ e }</div>
                }
                <button type="submit" class="btn wide">{ "Pay Now" }</button>
            </form>
        </div>
    }
}
