//! Payment step. There is no gateway behind it yet: [`MockProcessor`] accepts
//! any non-empty card details. Swap in a real [`PaymentProcessor`] later
//! without touching the view.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Number,
    Expiry,
    Cvv,
    Holder,
}

impl CardField {
    pub const ALL: [CardField; 4] = [
        CardField::Number,
        CardField::Expiry,
        CardField::Cvv,
        CardField::Holder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CardField::Number => "Card Number",
            CardField::Expiry => "Expiry Date",
            CardField::Cvv => "CVV",
            CardField::Holder => "Name on Card",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            CardField::Number => "1234 5678 9012 3456",
            CardField::Expiry => "MM/YY",
            CardField::Cvv => "123",
            CardField::Holder => "John Doe",
        }
    }

    pub fn autocomplete(self) -> &'static str {
        match self {
            CardField::Number => "cc-number",
            CardField::Expiry => "cc-exp",
            CardField::Cvv => "cc-csc",
            CardField::Holder => "cc-name",
        }
    }
}

#[derive(Clone, PartialEq, Default)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder: String,
}

// Card data never goes to logs.
impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails").finish_non_exhaustive()
    }
}

impl PaymentDetails {
    pub fn value(&self, field: CardField) -> &str {
        match field {
            CardField::Number => &self.card_number,
            CardField::Expiry => &self.expiry,
            CardField::Cvv => &self.cvv,
            CardField::Holder => &self.holder,
        }
    }

    pub fn set(&mut self, field: CardField, value: String) {
        match field {
            CardField::Number => self.card_number = value,
            CardField::Expiry => self.expiry = value,
            CardField::Cvv => self.cvv = value,
            CardField::Holder => self.holder = value,
        }
    }

    pub fn missing(&self) -> Vec<CardField> {
        CardField::ALL
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("Please fill in: {}", .0.iter().map(|c| c.label()).collect::<Vec<_>>().join(", "))]
    Incomplete(Vec<CardField>),
}

pub trait PaymentProcessor {
    fn pay(&self, details: &PaymentDetails) -> Result<PaymentOutcome, PaymentError>;
}

/// Placeholder until a real processor is wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MockProcessor;

impl PaymentProcessor for MockProcessor {
    fn pay(&self, details: &PaymentDetails) -> Result<PaymentOutcome, PaymentError> {
        let missing = details.missing();
        if !missing.is_empty() {
            return Err(PaymentError::Incomplete(missing));
        }
        log::info!("mock payment accepted");
        Ok(PaymentOutcome::Succeeded)
    }
}
