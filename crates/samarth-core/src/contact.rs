//! Contact form rules: required fields, email shape, the JSON submission
//! payload, the `mailto:` fallback, and product-based prefill.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detail::resolve;
use crate::product::{populated, Product};
use crate::uri::encode_component;

/// Tag sent with every endpoint submission.
pub const SUBMISSION_SOURCE: &str = "website";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingField(&'static str),

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl ContactError {
    /// The form field that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ContactError::MissingField(field) => field,
            ContactError::InvalidEmail => "email",
        }
    }
}

/// The contact form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub product_interest: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields and the email shape, trimming every field.
    ///
    /// # Errors
    ///
    /// - [`ContactError::MissingField`] for the first blank required field
    ///   (`name`, `company`, `email`, `message`, in that order).
    /// - [`ContactError::InvalidEmail`] if the email is not `local@domain.tld`.
    pub fn validate(&self) -> Result<ValidContact, ContactError> {
        let form = ContactForm {
            name: self.name.trim().to_owned(),
            company: self.company.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            product_interest: self.product_interest.trim().to_owned(),
            message: self.message.trim().to_owned(),
        };

        for (field, value) in [
            ("name", &form.name),
            ("company", &form.company),
            ("email", &form.email),
            ("message", &form.message),
        ] {
            if value.is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        if !EMAIL_RE.is_match(&form.email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ValidContact(form))
    }
}

/// A contact form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact(ContactForm);

/// JSON body POSTed to the contact endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission<'a> {
    #[serde(flatten)]
    pub form: &'a ContactForm,
    pub source: &'static str,
    pub submitted_at: DateTime<Utc>,
}

impl ValidContact {
    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.0
    }

    #[must_use]
    pub fn submission(&self, submitted_at: DateTime<Utc>) -> ContactSubmission<'_> {
        ContactSubmission {
            form: &self.0,
            source: SUBMISSION_SOURCE,
            submitted_at,
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        format!("Export inquiry from {} ({})", self.0.name, self.0.company)
    }

    #[must_use]
    pub fn body(&self) -> String {
        let form = &self.0;
        let mut lines = vec![
            format!("Name: {}", form.name),
            format!("Company: {}", form.company),
            format!("Email: {}", form.email),
        ];
        if !form.phone.is_empty() {
            lines.push(format!("Phone: {}", form.phone));
        }
        if !form.product_interest.is_empty() {
            lines.push(format!("Product interest: {}", form.product_interest));
        }
        lines.push(String::new());
        lines.push(form.message.clone());
        lines.join("\n")
    }

    /// An email draft addressed to `recipient` with subject and body filled in.
    #[must_use]
    pub fn mailto_uri(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&self.subject()),
            encode_component(&self.body())
        )
    }
}

/// Form values derived from a product id in the page's query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPrefill {
    pub product_id: String,
    pub product_interest: &'static str,
    pub message: String,
}

/// Selection value for the product-interest field.
#[must_use]
pub fn interest_for_category(category: Option<&str>) -> &'static str {
    match category.map(str::trim) {
        Some("Rice") => "rice",
        Some("Confectionery") => "confectionery",
        Some("Spices") => "spices",
        Some("Agricultural") => "agricultural",
        _ => "other",
    }
}

/// Resolve `product_id` once against the working list.
///
/// Returns `None` when the id is blank or unknown; the form then starts empty.
#[must_use]
pub fn prefill(products: &[Product], product_id: &str) -> Option<ContactPrefill> {
    let product = resolve(products, product_id.trim())?;
    Some(ContactPrefill {
        product_id: product.id.clone(),
        product_interest: interest_for_category(populated(product.category.as_ref())),
        message: format!(
            "I am interested in {} ({}). Please share pricing and MOQ details.",
            product.name, product.id
        ),
    })
}
