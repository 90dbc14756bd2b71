use super::common::*;

use crate::workflows::intake::domain::{BasicField, SectionPatch};
use crate::workflows::intake::steps::{Step, Transition};

#[test]
fn advance_with_empty_basic_details_is_blocked() {
    let (service, _, _) = build_service(FakeGateway::succeeding());

    let transition = service.advance();

    assert_eq!(
        transition,
        Transition::Blocked {
            step: Step::BasicDetails,
            error_count: 4
        }
    );
    assert_eq!(service.current_step(), Step::BasicDetails);
    let errors = service.errors();
    for key in ["name", "email", "mobileNumber", "dateOfBirth"] {
        assert!(errors.get_key(key).is_some(), "missing error for {key}");
    }
}

#[test]
fn advance_moves_forward_and_clears_errors() {
    let (service, _, _) = build_service(FakeGateway::succeeding());
    service.advance();
    assert!(!service.errors().is_empty());

    service.merge_section(basic_details());
    let transition = service.advance();

    assert_eq!(
        transition,
        Transition::Advanced {
            from: Step::BasicDetails,
            to: Step::Documents
        }
    );
    assert!(service.errors().is_empty());
}

#[test]
fn retreat_clamps_at_first_step() {
    let (service, _, _) = build_service(FakeGateway::succeeding());
    assert_eq!(service.retreat(), Step::BasicDetails);
    assert_eq!(service.current_step(), Step::BasicDetails);
}

#[test]
fn retreat_from_third_step_returns_to_documents() {
    let (service, _, _) = build_service(FakeGateway::succeeding());
    service.merge_section(basic_details());
    service.advance();
    for patch in required_documents() {
        service.merge_section(patch);
    }
    service.advance();
    assert_eq!(service.current_step(), Step::StatementOfPurpose);

    assert_eq!(service.retreat(), Step::Documents);
}

#[test]
fn retreat_keeps_stale_errors() {
    let (service, _, _) = build_service(FakeGateway::succeeding());
    service.merge_section(basic_details());
    service.advance();
    service.advance();
    let blocked = service.errors();
    assert!(blocked.get_key("resume").is_some());

    service.retreat();

    assert_eq!(service.current_step(), Step::BasicDetails);
    assert_eq!(service.errors(), blocked);
}

#[test]
fn advance_at_terminal_step_stays_terminal() {
    let (service, _, _) = build_service(FakeGateway::succeeding());
    complete_through_final_step(&service);

    let transition = service.advance();

    assert_eq!(
        transition,
        Transition::Advanced {
            from: Step::InterviewAvailability,
            to: Step::InterviewAvailability
        }
    );
    assert_eq!(service.current_step(), Step::InterviewAvailability);
}

#[test]
fn passed_steps_are_not_rechecked_until_revisited() {
    let (service, _, _) = build_service(FakeGateway::succeeding());
    service.merge_section(basic_details());
    service.advance();

    service.merge_section(SectionPatch::single(BasicField::Name, ""));
    for patch in required_documents() {
        service.merge_section(patch);
    }
    assert!(service.advance().is_advanced());
    assert_eq!(service.current_step(), Step::StatementOfPurpose);

    service.retreat();
    service.retreat();
    let transition = service.advance();
    assert!(!transition.is_advanced());
    assert_eq!(service.errors().get_key("name"), Some("Name is required"));
}
