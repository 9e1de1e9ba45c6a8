//! Algebraic laws of `Outcome`, checked with generated inputs.

use outcome_rust::{CommonFailure, FailureDescriptor, OperationOutcome, Outcome};
use proptest::prelude::*;

fn failure(detail: &str) -> FailureDescriptor {
    FailureDescriptor::with_detail(CommonFailure::Generic, detail)
}

fn any_outcome() -> impl Strategy<Value = OperationOutcome<i64>> {
    prop_oneof![
        any::<i64>().prop_map(Outcome::Success),
        "[a-z]{1,8}".prop_map(|d| Outcome::Failure(failure(&d))),
        ("[a-z]{1,8}", any::<i64>()).prop_map(|(d, v)| Outcome::PartialSuccess(failure(&d), v)),
    ]
}

proptest! {
    #[test]
    fn exactly_one_variant_holds(outcome in any_outcome()) {
        let held = [outcome.is_success(), outcome.is_failure(), outcome.is_partial_success()];
        prop_assert_eq!(held.iter().filter(|h| **h).count(), 1);
        prop_assert_eq!(outcome.has_success_value(), !outcome.is_failure());
        prop_assert_eq!(outcome.has_failure_value(), !outcome.is_success());
    }

    #[test]
    fn identity_transform_is_a_no_op(outcome in any_outcome()) {
        prop_assert_eq!(outcome.clone().if_success_with(|v| v), outcome.clone());
        prop_assert_eq!(outcome.clone().map(|v| v), outcome.clone());
        prop_assert_eq!(outcome.clone().and_then(Outcome::Success), outcome);
    }

    #[test]
    fn succeed_is_a_left_identity_for_and_then(value in any::<i64>()) {
        let outcome: OperationOutcome<i64> = Outcome::succeed(value);
        prop_assert_eq!(outcome.clone().and_then(Outcome::succeed), outcome);
    }

    #[test]
    fn failure_short_circuits_success_continuations(detail in "[a-z]{1,8}") {
        let failed: OperationOutcome<i64> = Outcome::Failure(failure(&detail));
        let mut ran = false;

        let next = failed.clone().if_success_with(|o| {
            ran = true;
            o.map(|v| v + 1)
        });
        failed.on_success(|_| ran = true);

        prop_assert!(!ran);
        prop_assert_eq!(next, failed);
    }

    #[test]
    fn failure_handlers_skip_values(value in any::<i64>(), detail in "[a-z]{1,8}") {
        let succeeded: OperationOutcome<i64> = Outcome::Success(value);
        let partial: OperationOutcome<i64> = Outcome::PartialSuccess(failure(&detail), value);

        prop_assert_eq!(succeeded.clone().if_failure(|| Outcome::Failure(failure("replaced"))), succeeded);
        prop_assert_eq!(partial.clone().if_failure(|| Outcome::Failure(failure("replaced"))), partial);
    }

    #[test]
    fn success_value_is_readable_unless_failed(outcome in any_outcome()) {
        prop_assert_eq!(outcome.get().is_ok(), outcome.has_success_value());
        prop_assert_eq!(outcome.clone().into_result().is_ok(), outcome.has_success_value());
    }
}
