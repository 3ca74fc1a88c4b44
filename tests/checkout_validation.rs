use car_rental_storefront::{
    dto::checkout::CheckoutDraft,
    services::checkout_service::{self, CheckoutField},
};

fn filled_draft(method: &str) -> CheckoutDraft {
    CheckoutDraft {
        name: "Ada".into(),
        phone: "555-0100".into(),
        address: "1 Main St".into(),
        city: "Springfield".into(),
        pickup_location: "Airport".into(),
        pickup_date: "2024-05-01".into(),
        dropoff_location: "Downtown".into(),
        dropoff_date: "2024-05-04".into(),
        payment_method: method.into(),
        ..CheckoutDraft::default()
    }
}

#[test]
fn bitcoin_without_city_reports_only_city() {
    let draft = CheckoutDraft {
        city: String::new(),
        ..filled_draft("bitcoin")
    };

    let errors = checkout_service::validate(&draft);
    assert!(errors.has_errors());
    assert_eq!(errors.invalid_fields(), vec![CheckoutField::City]);
    assert_eq!(errors.get(CheckoutField::City), ["City is required."]);
    for field in CheckoutField::ALL.into_iter().filter(|f| f.is_card_field()) {
        assert!(errors.get(field).is_empty());
    }
}

#[test]
fn paypal_never_requires_card_fields() {
    let errors = checkout_service::validate(&filled_draft("paypal"));
    assert!(!errors.has_errors());
}

#[test]
fn credit_card_requires_every_card_field() {
    let errors = checkout_service::validate(&filled_draft("credit-card"));
    assert_eq!(
        errors.invalid_fields(),
        vec![
            CheckoutField::CardNumber,
            CheckoutField::ExpirationDate,
            CheckoutField::CardholderName,
            CheckoutField::Cvc,
        ]
    );
    assert_eq!(errors.first(CheckoutField::Cvc), Some("CVC is required."));

    let complete = CheckoutDraft {
        card_number: "4242424242424242".into(),
        expiration_date: "12/30".into(),
        cardholder_name: "Ada Lovelace".into(),
        cvc: "123".into(),
        ..filled_draft("credit-card")
    };
    assert!(!checkout_service::validate(&complete).has_errors());
}

#[test]
fn empty_draft_lists_every_field_with_one_message() {
    let errors = checkout_service::validate(&CheckoutDraft::default());
    assert_eq!(errors.invalid_fields().len(), 8);
    assert_eq!(
        errors.first(CheckoutField::PickupLocation),
        Some("Pick-up location is required.")
    );

    let json = serde_json::to_value(&errors).expect("serializable");
    assert_eq!(json["dropoffDate"][0], "Drop-off date is required.");
    assert_eq!(json["cardNumber"].as_array().map(Vec::len), Some(0));
}

#[test]
fn report_lists_the_first_message_per_invalid_field() {
    let draft = CheckoutDraft {
        city: String::new(),
        ..filled_draft("credit-card")
    };
    let report = checkout_service::validate_draft(&draft).data.expect("report");
    assert!(!report.valid);
    assert_eq!(report.first_errors.len(), 5);
    assert_eq!(
        report.first_errors.get(&CheckoutField::City).map(String::as_str),
        Some("City is required.")
    );
    assert!(!report.first_errors.contains_key(&CheckoutField::Name));
}

#[test]
fn whitespace_counts_as_filled_in() {
    let draft = CheckoutDraft {
        name: " ".into(),
        ..filled_draft("paypal")
    };
    assert!(!checkout_service::validate(&draft).has_errors());
}
