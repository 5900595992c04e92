//! Card Form Page
//!
//! Renders the HTML form a customer fills in for a pending payment.

use billing_core::PendingPayment;
use minijinja::{Environment, context};

const CARD_FORM_TEMPLATE: &str = include_str!("templates/card_form.html");

/// Template name; the `.html` suffix turns on auto-escaping
const CARD_FORM: &str = "card_form.html";

/// Template engine wrapper around minijinja
pub struct CardFormPage {
    env: Environment<'static>,
}

impl CardFormPage {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(CARD_FORM, CARD_FORM_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the form for one session
    pub fn render(&self, pending: &PendingPayment) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(CARD_FORM)?;
        template.render(context! {
            value => pending.value.to_string(),
            description => pending.description.as_str(),
            session_id => pending.id.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_render_card_form() {
        let page = CardFormPage::new().unwrap();
        let pending = PendingPayment::new(Decimal::new(1250, 2), "Concert ticket");

        let html = page.render(&pending).unwrap();
        assert!(html.contains("Payment Value: 12.50"));
        assert!(html.contains("Description: Concert ticket"));
        assert!(html.contains(&format!("/luhn?sessionId={}", pending.id)));
        assert!(html.contains(r#"name="cardNumber""#));
    }

    #[test]
    fn test_description_is_escaped() {
        let page = CardFormPage::new().unwrap();
        let pending = PendingPayment::new(Decimal::ONE, "<script>alert(1)</script>");

        let html = page.render(&pending).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
