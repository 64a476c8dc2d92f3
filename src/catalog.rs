use std::rc::Rc;

use crate::api::{GymClient, Transport};
use crate::model::SubscriptionPlan;

/// What the catalog looks like to the views. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    /// May be empty; that is a real answer, not an error.
    Loaded(Rc<Vec<SubscriptionPlan>>),
    Failed(String),
}

impl CatalogState {
    pub fn plans(&self) -> Option<&[SubscriptionPlan]> {
        match self {
            CatalogState::Loaded(plans) => Some(plans.as_slice()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }
}

/// One network read, no retries. A retry is a reload of the hosting view.
pub async fn load<T: Transport>(client: &GymClient<T>) -> CatalogState {
    log::info!("loading subscription catalog");
    match client.catalog().await {
        Ok(plans) => {
            log::info!("catalog loaded: {} plan(s)", plans.len());
            CatalogState::Loaded(Rc::new(plans))
        }
        Err(e) => {
            log::error!("catalog load failed: {e}");
            CatalogState::Failed(e.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::testing::{client, FakeTransport};
    use crate::error::ApiError;

    fn plan_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "subscriptionId": id,
            "subscriptionName": name,
            "subscriptionAmount": 100 * id,
            "subscriptionMonths": id,
            "details": [{ "subscriptionDetailsId": id, "details": format!("{name} perk") }]
        })
    }

    #[test]
    fn starts_loading() {
        assert!(CatalogState::default().is_loading());
        assert_eq!(CatalogState::default().plans(), None);
    }

    #[test]
    fn arrays_of_any_length_load() {
        for n in 0..4 {
            let body = serde_json::Value::Array(
                (1..=n).map(|i| plan_json(i, &format!("Plan {i}"))).collect(),
            );
            let fake = FakeTransport::default().reply(200, body.to_string());
            let state = block_on(load(&client(fake)));

            let plans = state.plans().expect("loaded");
            assert_eq!(plans.len(), n as usize);
            for (i, p) in plans.iter().enumerate() {
                assert_eq!(p.name, format!("Plan {}", i + 1));
            }
        }
    }

    #[test]
    fn exactly_one_request_per_load() {
        let fake = FakeTransport::default().reply(200, "[]").reply(200, "[]");
        block_on(load(&client(fake.clone())));
        assert_eq!(fake.calls().len(), 1);
    }

    #[test]
    fn every_failure_has_a_message() {
        let cases = vec![
            FakeTransport::default().reply(200, r#"{"plans":[]}"#),
            FakeTransport::default().reply(200, "null"),
            FakeTransport::default().reply(500, ""),
            FakeTransport::default().reply(404, r#"{"message":"No catalog"}"#),
            FakeTransport::default().fail(ApiError::Transport("Failed to fetch".into())),
            FakeTransport::default().fail(ApiError::Transport(String::new())),
        ];

        for fake in cases {
            match block_on(load(&client(fake))) {
                CatalogState::Failed(msg) => assert!(!msg.trim().is_empty()),
                other => panic!("expected failure, got {other:?}"),
            }
        }
    }

    #[test]
    fn server_message_is_preferred() {
        let fake = FakeTransport::default().reply(404, r#"{"message":"No catalog"}"#);
        assert_eq!(
            block_on(load(&client(fake))),
            CatalogState::Failed("No catalog".into())
        );
    }
}
