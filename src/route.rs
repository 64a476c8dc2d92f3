use urlencoding::{decode, encode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    /// `/plan-details/:plan`; the segment seeds the plan selection. Held decoded.
    PlanDetails(String),
    Payment,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["index.html"] => Route::Landing,
            ["plan-details", plan] => Route::PlanDetails(
                decode(plan).map_or_else(|_| plan.to_string(), |p| p.into_owned()),
            ),
            ["payment"] => Route::Payment,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing | Route::NotFound => "/".to_string(),
            Route::PlanDetails(plan) => format!("/plan-details/{}", encode(plan)),
            Route::Payment => "/payment".to_string(),
        }
    }
}
