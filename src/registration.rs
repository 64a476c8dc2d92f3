use std::rc::Rc;

use thiserror::Error;
use yew::Reducible;

use crate::api::{GymClient, Transport};
use crate::error::{ApiError, ValidationError};
use crate::model::{slugify, PlanId, RegistrationRequest, SubscriptionPlan, SubscriptionRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Plan,
    GymName,
    ContactName,
    Email,
    Phone,
    OfficeNumber,
    Address,
}

impl Field {
    /// Free-text fields, in form order.
    pub const TEXT: [Field; 6] = [
        Field::GymName,
        Field::ContactName,
        Field::Email,
        Field::Phone,
        Field::OfficeNumber,
        Field::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Plan => "Plan",
            Field::GymName => "Gym name",
            Field::ContactName => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone number",
            Field::OfficeNumber => "Office number",
            Field::Address => "Address",
        }
    }

    /// HTML input type hint.
    pub fn input_type(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Phone | Field::OfficeNumber => "tel",
            _ => "text",
        }
    }
}

/// In-progress form state. Lives only as long as the registration view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrationDraft {
    pub selected_plan: Option<PlanId>,
    pub gym_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub office_number: String,
    pub address: String,
}

impl RegistrationDraft {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Plan => "",
            Field::GymName => &self.gym_name,
            Field::ContactName => &self.contact_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::OfficeNumber => &self.office_number,
            Field::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Plan => {}
            Field::GymName => self.gym_name = value,
            Field::ContactName => self.contact_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::OfficeNumber => self.office_number = value,
            Field::Address => self.address = value,
        }
    }

    /// Whitespace-only counts as empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.selected_plan.is_none() {
            missing.push(Field::Plan);
        }
        missing.extend(
            Field::TEXT
                .into_iter()
                .filter(|f| self.value(*f).trim().is_empty()),
        );
        missing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingCatalog,
    Editing,
    Submitting,
    Submitted,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitBlocked {
    #[error("cannot submit while {0:?}")]
    WrongPhase(Phase),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowAction {
    CatalogLoaded(Rc<Vec<SubscriptionPlan>>),
    SelectPlan(PlanId),
    /// Result of resolving an unknown deep-link hint via the single-plan endpoint.
    AdoptLookedUpPlan(PlanId),
    Edit(Field, String),
    Submit,
    Finished(Result<(), ApiError>),
    DismissError,
}

/// Plan selection + contact form + submission, as one state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationFlow {
    phase: Phase,
    plan_hint: Option<String>,
    hint_resolved: bool,
    plans: Rc<Vec<SubscriptionPlan>>,
    draft: RegistrationDraft,
    in_flight: Option<RegistrationRequest>,
    invalid: Vec<Field>,
    error: Option<String>,
}

impl RegistrationFlow {
    pub fn new(plan_hint: Option<String>) -> Self {
        Self {
            phase: Phase::AwaitingCatalog,
            plan_hint: plan_hint.filter(|h| !h.trim().is_empty()),
            hint_resolved: false,
            plans: Rc::default(),
            draft: RegistrationDraft::default(),
            in_flight: None,
            invalid: Vec::new(),
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn invalid_fields(&self) -> &[Field] {
        &self.invalid
    }

    /// Request waiting to be sent. Only set while `Submitting`.
    pub fn in_flight(&self) -> Option<&RegistrationRequest> {
        self.in_flight.as_ref()
    }

    pub fn selected_plan(&self) -> Option<&SubscriptionPlan> {
        let id = self.draft.selected_plan.as_ref()?;
        self.plans.iter().find(|p| &p.id == id)
    }

    pub fn is_selected(&self, id: &PlanId) -> bool {
        self.draft.selected_plan.as_ref() == Some(id)
    }

    /// Deep-link hint that matched nothing in the catalog by id or name.
    pub fn unresolved_hint(&self) -> Option<&str> {
        if self.phase == Phase::Editing && !self.hint_resolved {
            self.plan_hint.as_deref()
        } else {
            None
        }
    }

    pub fn apply(&mut self, action: FlowAction) {
        match action {
            FlowAction::CatalogLoaded(plans) => self.catalog_loaded(plans),
            FlowAction::SelectPlan(id) => {
                self.select_plan(&id);
            }
            FlowAction::AdoptLookedUpPlan(id) => self.adopt_looked_up_plan(&id),
            FlowAction::Edit(field, value) => self.edit(field, value),
            FlowAction::Submit => {
                if let Err(e) = self.begin_submit() {
                    log::warn!("submit blocked: {e}");
                }
            }
            FlowAction::Finished(result) => self.finish_submit(result),
            FlowAction::DismissError => self.error = None,
        }
    }

    fn catalog_loaded(&mut self, plans: Rc<Vec<SubscriptionPlan>>) {
        if self.phase != Phase::AwaitingCatalog {
            return;
        }
        self.plans = plans;
        self.phase = Phase::Editing;

        let Some(hint) = self.plan_hint.as_deref() else {
            self.hint_resolved = true;
            return;
        };

        let by_id = self.plans.iter().find(|p| p.id.matches(hint));
        let wanted = slugify(hint);
        let by_name = || self.plans.iter().find(|p| p.slug() == wanted);
        match by_id.or_else(by_name) {
            Some(plan) => {
                log::debug!("deep link '{hint}' selects plan {}", plan.id);
                self.draft.selected_plan = Some(plan.id.clone());
                self.hint_resolved = true;
            }
            None => log::info!("deep link '{hint}' matches no loaded plan"),
        }
    }

    /// Returns whether the selection changed. Ignored until the catalog is in
    /// and while a submission is outstanding.
    pub fn select_plan(&mut self, id: &PlanId) -> bool {
        if self.phase != Phase::Editing {
            log::debug!("ignoring plan selection during {:?}", self.phase);
            return false;
        }
        if !self.plans.iter().any(|p| &p.id == id) || self.is_selected(id) {
            return false;
        }

        log::info!("plan {id} selected");
        self.draft.selected_plan = Some(id.clone());
        self.hint_resolved = true;
        self.invalid.retain(|f| *f != Field::Plan);
        true
    }

    fn adopt_looked_up_plan(&mut self, id: &PlanId) {
        if self.hint_resolved || self.draft.selected_plan.is_some() {
            return;
        }
        self.select_plan(id);
        self.hint_resolved = true;
    }

    fn edit(&mut self, field: Field, value: String) {
        if matches!(self.phase, Phase::Submitting | Phase::Submitted) {
            return;
        }
        if !value.trim().is_empty() {
            self.invalid.retain(|f| *f != field);
        }
        self.draft.set(field, value);
    }

    /// Validates and builds the request. Only one submission may be in flight.
    pub fn begin_submit(&mut self) -> Result<&RegistrationRequest, SubmitBlocked> {
        if self.phase != Phase::Editing {
            return Err(SubmitBlocked::WrongPhase(self.phase));
        }

        let mut missing = self.draft.missing_fields();
        if self.selected_plan().is_none() && !missing.contains(&Field::Plan) {
            // Selected id no longer in the catalog.
            missing.insert(0, Field::Plan);
        }
        let request = match self.build_request() {
            Some(request) if missing.is_empty() => request,
            _ => {
                self.invalid = missing.clone();
                return Err(ValidationError { missing }.into());
            }
        };

        self.invalid.clear();
        self.error = None;
        self.phase = Phase::Submitting;
        Ok(&*self.in_flight.insert(request))
    }

    fn build_request(&self) -> Option<RegistrationRequest> {
        let plan = self.selected_plan()?;
        let d = &self.draft;
        Some(RegistrationRequest {
            name: d.contact_name.trim().to_string(),
            gym_name: d.gym_name.trim().to_string(),
            email: d.email.trim().to_string(),
            plan_type: plan.name.clone(),
            phone_number: d.phone.trim().to_string(),
            office_number: d.office_number.trim().to_string(),
            location: d.address.trim().to_string(),
            active: true,
            subscription: SubscriptionRef {
                subscription_id: plan.id.clone(),
            },
        })
    }

    /// Failure keeps the draft so the user can retry without retyping.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) {
        if self.phase != Phase::Submitting {
            return;
        }
        self.in_flight = None;
        match result {
            Ok(()) => self.phase = Phase::Submitted,
            Err(e) => {
                self.error = Some(e.user_message());
                self.phase = Phase::Editing;
            }
        }
    }
}

impl Reducible for RegistrationFlow {
    type Action = FlowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub async fn send_registration<T: Transport>(
    client: &GymClient<T>,
    request: &RegistrationRequest,
) -> Result<(), ApiError> {
    log::info!("registering gym for plan {}", request.subscription.subscription_id);
    let result = client.register(request).await;
    match &result {
        Ok(()) => log::info!("gym registration accepted"),
        Err(e) => log::error!("gym registration failed: {e}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::testing::{client, Call, FakeTransport};
    use crate::model::{parse_catalog, RecordId};
    use crate::route::Route;

    fn catalog() -> Rc<Vec<SubscriptionPlan>> {
        let body = json!([
            { "subscriptionId": 1, "subscriptionName": "Basic", "subscriptionAmount": 499,
              "subscriptionMonths": 1, "details": [{ "subscriptionDetailsId": 1, "details": "Gym floor" }] },
            { "subscriptionId": 2, "subscriptionName": "Premium", "subscriptionAmount": 899,
              "subscriptionMonths": 3, "details": [] },
            { "subscriptionId": 3, "subscriptionName": "Elite", "subscriptionAmount": 1499,
              "subscriptionMonths": 12, "details": [] }
        ])
        .to_string();
        Rc::new(parse_catalog(&body).expect("fixture"))
    }

    fn editing(hint: Option<&str>) -> RegistrationFlow {
        let mut flow = RegistrationFlow::new(hint.map(str::to_string));
        flow.apply(FlowAction::CatalogLoaded(catalog()));
        flow
    }

    /// Same sequence the registration view runs: begin, send, finish.
    fn drive_submit(
        flow: &mut RegistrationFlow,
        c: &GymClient<FakeTransport>,
    ) -> Result<(), SubmitBlocked> {
        let request = flow.begin_submit()?.clone();
        let result = block_on(send_registration(c, &request));
        flow.apply(FlowAction::Finished(result));
        Ok(())
    }

    fn fill(flow: &mut RegistrationFlow) {
        for (field, value) in [
            (Field::GymName, "Iron Temple"),
            (Field::ContactName, "Ana Ruiz"),
            (Field::Email, "ana@example.com"),
            (Field::Phone, "555-0100"),
            (Field::OfficeNumber, "555-0101"),
            (Field::Address, "1 Main St"),
        ] {
            flow.apply(FlowAction::Edit(field, value.to_string()));
        }
    }

    #[test]
    fn waits_for_catalog_before_editing() {
        let mut flow = RegistrationFlow::new(None);
        assert_eq!(flow.phase(), Phase::AwaitingCatalog);

        // Selection racing ahead of the catalog is a no-op.
        assert!(!flow.select_plan(&RecordId::Number(1)));
        assert_eq!(flow.draft().selected_plan, None);

        flow.apply(FlowAction::CatalogLoaded(catalog()));
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.plans().len(), 3);
    }

    #[test]
    fn hint_resolves_by_id_or_name() {
        assert_eq!(editing(Some("2")).selected_plan().map(|p| p.name.as_str()), Some("Premium"));
        assert_eq!(editing(Some("elite")).selected_plan().map(|p| p.name.as_str()), Some("Elite"));
        assert_eq!(editing(Some("BASIC")).selected_plan().map(|p| p.name.as_str()), Some("Basic"));
    }

    #[test]
    fn landing_links_select_plans_with_reserved_characters() {
        let body = json!([
            { "subscriptionId": 7, "subscriptionName": "Gold/Silver", "subscriptionAmount": 10,
              "subscriptionMonths": 1, "details": [] },
            { "subscriptionId": 8, "subscriptionName": "#1 Plan", "subscriptionAmount": 20,
              "subscriptionMonths": 1, "details": [] },
            { "subscriptionId": 9, "subscriptionName": "Café Plus", "subscriptionAmount": 30,
              "subscriptionMonths": 1, "details": [] }
        ])
        .to_string();
        let plans = Rc::new(parse_catalog(&body).expect("fixture"));

        for plan in plans.iter() {
            let Route::PlanDetails(hint) = Route::parse(&Route::PlanDetails(plan.slug()).path())
            else {
                panic!("{} did not route to plan details", plan.name);
            };
            let mut flow = RegistrationFlow::new(Some(hint));
            flow.apply(FlowAction::CatalogLoaded(plans.clone()));
            assert_eq!(flow.selected_plan().map(|p| &p.id), Some(&plan.id), "{}", plan.name);
            assert_eq!(flow.unresolved_hint(), None);
        }
    }

    #[test]
    fn unknown_hint_leaves_nothing_selected() {
        let flow = editing(Some("platinum"));
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.selected_plan(), None);
        assert_eq!(flow.unresolved_hint(), Some("platinum"));
    }

    #[test]
    fn looked_up_plan_is_adopted_only_if_in_catalog() {
        let mut flow = editing(Some("legacy-3"));
        flow.apply(FlowAction::AdoptLookedUpPlan(RecordId::Number(99)));
        assert_eq!(flow.selected_plan(), None);
        assert_eq!(flow.unresolved_hint(), None);

        let mut flow = editing(Some("legacy-3"));
        flow.apply(FlowAction::AdoptLookedUpPlan(RecordId::Number(3)));
        assert_eq!(flow.selected_plan().map(|p| p.name.as_str()), Some("Elite"));
    }

    #[test]
    fn looked_up_plan_never_overrides_user_choice() {
        let mut flow = editing(Some("legacy-3"));
        flow.apply(FlowAction::SelectPlan(RecordId::Number(1)));
        flow.apply(FlowAction::AdoptLookedUpPlan(RecordId::Number(3)));
        assert_eq!(flow.selected_plan().map(|p| p.name.as_str()), Some("Basic"));
    }

    #[test]
    fn selection_is_exclusive_and_idempotent() {
        let mut flow = editing(None);
        assert!(flow.select_plan(&RecordId::Number(1)));
        assert!(flow.select_plan(&RecordId::Number(2)));
        assert!(flow.is_selected(&RecordId::Number(2)));
        assert!(!flow.is_selected(&RecordId::Number(1)));

        let before = flow.clone();
        assert!(!flow.select_plan(&RecordId::Number(2)));
        assert_eq!(flow, before);
    }

    #[test]
    fn selecting_unknown_plan_is_ignored() {
        let mut flow = editing(Some("1"));
        assert!(!flow.select_plan(&RecordId::Text("ghost".into())));
        assert!(flow.is_selected(&RecordId::Number(1)));
    }

    #[test]
    fn any_empty_required_field_blocks_the_network() {
        for skip in Field::TEXT {
            let fake = FakeTransport::default().reply(200, "{}");
            let mut flow = editing(Some("basic"));
            fill(&mut flow);
            flow.apply(FlowAction::Edit(skip, "   ".into()));

            match drive_submit(&mut flow, &client(fake.clone())) {
                Err(SubmitBlocked::Invalid(e)) => assert_eq!(e.missing, vec![skip]),
                other => panic!("{skip:?}: expected validation error, got {other:?}"),
            }
            assert_eq!(flow.phase(), Phase::Editing);
            assert_eq!(flow.in_flight(), None);
            assert_eq!(flow.invalid_fields(), [skip]);
            assert!(fake.calls().is_empty());
        }
    }

    #[test]
    fn missing_plan_is_a_validation_error() {
        let mut flow = editing(None);
        fill(&mut flow);
        let Err(SubmitBlocked::Invalid(e)) = flow.begin_submit() else {
            panic!("expected validation error");
        };
        assert_eq!(e.missing, vec![Field::Plan]);
    }

    #[test]
    fn submission_payload_and_success() {
        let fake = FakeTransport::default().reply(201, "");
        let c = client(fake.clone());
        let mut flow = editing(Some("basic"));
        fill(&mut flow);

        let request = flow.begin_submit().expect("valid").clone();
        assert_eq!(flow.phase(), Phase::Submitting);

        let result = block_on(send_registration(&c, &request));
        flow.apply(FlowAction::Finished(result));
        assert_eq!(flow.phase(), Phase::Submitted);
        assert_eq!(flow.in_flight(), None);

        assert_eq!(
            fake.calls(),
            vec![Call::Post(
                "http://gym.test/api/gyms/register".into(),
                json!({
                    "name": "Ana Ruiz",
                    "gymName": "Iron Temple",
                    "email": "ana@example.com",
                    "planType": "Basic",
                    "phoneNumber": "555-0100",
                    "officeNumber": "555-0101",
                    "location": "1 Main St",
                    "active": true,
                    "subscription": { "subscriptionId": 1 }
                })
            )]
        );
    }

    #[test]
    fn no_overlapping_submissions() {
        let mut flow = editing(Some("basic"));
        fill(&mut flow);
        flow.begin_submit().expect("first");

        assert_eq!(
            flow.begin_submit().unwrap_err(),
            SubmitBlocked::WrongPhase(Phase::Submitting)
        );

        // Edits and re-selection are frozen while in flight.
        flow.apply(FlowAction::Edit(Field::GymName, "Other".into()));
        flow.apply(FlowAction::SelectPlan(RecordId::Number(2)));
        assert_eq!(flow.draft().gym_name, "Iron Temple");
        assert!(flow.is_selected(&RecordId::Number(1)));
    }

    #[test]
    fn server_500_returns_to_editing_with_draft_intact() {
        let fake = FakeTransport::default().reply(500, r#"{"message":"Registration service down"}"#);
        let c = client(fake);
        let mut flow = editing(Some("basic"));
        fill(&mut flow);

        drive_submit(&mut flow, &c).expect("valid");

        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.error(), Some("Registration service down"));
        assert_eq!(flow.draft().gym_name, "Iron Temple");
        assert!(flow.is_selected(&RecordId::Number(1)));

        // Retry goes straight through without retyping.
        assert!(flow.begin_submit().is_ok());
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn transport_failure_surfaces_a_message() {
        let mut flow = editing(Some("basic"));
        fill(&mut flow);
        flow.begin_submit().expect("valid");
        flow.apply(FlowAction::Finished(Err(ApiError::Transport("Failed to fetch".into()))));

        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.error(), Some("Failed to fetch"));
        flow.apply(FlowAction::DismissError);
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn late_completion_outside_submitting_is_ignored() {
        let mut flow = editing(None);
        flow.apply(FlowAction::Finished(Ok(())));
        assert_eq!(flow.phase(), Phase::Editing);
    }
}
