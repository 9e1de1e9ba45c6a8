//! A caller-defined failure vocabulary built with `#[derive(FailureKind)]`.

use std::fmt;

use outcome_rust::{
    caused_failure, gather, typed_failure, ArityMismatch, FailureDescriptor, FailureKind,
    Outcome, Problem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FailureKind)]
enum BillingFailure {
    #[failure(generic, title = "Billing failed")]
    Generic,
    #[failure(title = "Card declined", template = "card ending {} was declined: {}")]
    CardDeclined,
    #[failure(title = "Invoice missing", template = "invoice {} does not exist")]
    InvoiceMissing,
    Suspended,
}

type Billing<T> = Outcome<FailureDescriptor<BillingFailure>, T>;

#[derive(Debug, thiserror::Error)]
#[error("gateway timed out after {0}ms")]
struct GatewayTimeout(u64);

fn charge(card: &str, amount: u32) -> Billing<u32> {
    match card {
        "4242" => Outcome::succeed(amount),
        "0000" => typed_failure!(BillingFailure::CardDeclined, card, "insufficient funds"),
        _ => caused_failure!(GatewayTimeout(3000), BillingFailure::Generic),
    }
}

#[test]
fn derived_kind_exposes_names_titles_templates() {
    assert_eq!(BillingFailure::generic(), BillingFailure::Generic);
    assert_eq!(BillingFailure::CardDeclined.name(), "CardDeclined");
    assert_eq!(BillingFailure::CardDeclined.title(), "Card declined");
    assert_eq!(BillingFailure::CardDeclined.template_parameter_count(), 2);
    assert_eq!(BillingFailure::Suspended.title(), "Suspended");
    assert_eq!(BillingFailure::Suspended.template(), "");
}

#[test]
fn typed_failure_fills_the_template() {
    let declined = charge("0000", 10);

    let failure = declined.failure().unwrap();
    assert_eq!(failure.kind(), BillingFailure::CardDeclined);
    assert_eq!(failure.detail(), "card ending 0000 was declined: insufficient funds");
    assert_eq!(failure.to_string(), "Card declined: card ending 0000 was declined: insufficient funds");
}

#[test]
fn caused_failure_keeps_the_cause() {
    let timed_out = charge("1111", 10);

    let failure = timed_out.failure().unwrap();
    assert_eq!(failure.kind_name(), "Generic");
    assert_eq!(failure.title(), "Billing failed");
    assert_eq!(failure.cause().unwrap().to_string(), "gateway timed out after 3000ms");
    assert!(std::error::Error::source(failure).is_some());
}

#[test]
fn arity_mismatch_is_reported_but_not_fatal() {
    assert_eq!(ArityMismatch::check(&BillingFailure::InvoiceMissing, 1), None);
    assert_eq!(
        ArityMismatch::check(&BillingFailure::InvoiceMissing, 2),
        Some(ArityMismatch { kind: "InvoiceMissing", expected: 1, supplied: 2 })
    );
    assert_eq!(ArityMismatch::check(&BillingFailure::Suspended, 3), None);

    let missing_arg: Billing<()> = typed_failure!(BillingFailure::CardDeclined, "0000");
    assert_eq!(missing_arg.failure().unwrap().detail(), "card ending 0000 was declined: {}");
}

#[test]
fn gathered_charges_summarize_failures() {
    let charges = vec![charge("4242", 5), charge("0000", 7), charge("4242", 9)];

    let gathered = gather(charges, BillingFailure::Generic);

    assert!(gathered.is_partial_success());
    assert_eq!(gathered.value(), Some(&vec![5, 9]));
    assert_eq!(
        gathered.failure().unwrap().detail(),
        "1 of 3 item(s) failed: card ending 0000 was declined: insufficient funds"
    );
}

#[test]
fn ad_hoc_generic_failures() {
    let failed: Billing<()> = outcome_rust::fail_with_detail!("retry {} of {}", 2, 3);
    assert_eq!(failed.failure().unwrap().kind(), BillingFailure::Generic);
    assert_eq!(failed.failure().unwrap().detail(), "retry 2 of 3");

    struct Amount(u32);
    impl fmt::Display for Amount {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "${}", self.0)
        }
    }
    let over: Billing<()> = outcome_rust::fail_with_detail!("limit {} exceeded", Amount(50));
    assert_eq!(over.failure().unwrap().detail(), "limit $50 exceeded");
}
