use autoquote_core::format::format_currency;
use autoquote_core::listing::{quote_for_listing, ListingCatalog};
use autoquote_core::pricing::on_road;
use autoquote_core::quote::{build_quote, LoanForm};
use autoquote_core::types::{Currency, PricingPolicy};
use autoquote_core::{compute_on_road_price, AutoQuoteError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// On-road price
// ===========================================================================

#[test]
fn test_on_road_ten_lakh() {
    let result = compute_on_road_price(dec!(1000000)).unwrap();
    assert_eq!(result.registration_fee, dec!(100000));
    assert_eq!(result.insurance_fee, dec!(10000));
    assert_eq!(result.on_road_price, dec!(1110000));
}

#[test]
fn test_on_road_zero_price() {
    let result = compute_on_road_price(Decimal::ZERO).unwrap();
    assert_eq!(result.on_road_price, Decimal::ZERO);
}

#[test]
fn test_on_road_negative_price() {
    assert!(matches!(
        compute_on_road_price(dec!(-100)),
        Err(AutoQuoteError::InvalidInput { .. })
    ));
}

proptest! {
    #[test]
    fn prop_on_road_is_111_percent(paise in 0i64..10_000_000_000) {
        let price = Decimal::new(paise, 2);
        let result = on_road::compute_on_road_price(price).unwrap();
        prop_assert_eq!(result.on_road_price, price * dec!(1.11));
    }
}

// ===========================================================================
// Quotes
// ===========================================================================

#[test]
fn test_quote_full_financing_defaults() {
    let form = LoanForm {
        ex_showroom_price: dec!(650000),
        loan_amount: None,
        annual_rate_percent: dec!(8.5),
        term_years: None,
    };
    let out = build_quote(&form, &PricingPolicy::default()).unwrap();
    assert_eq!(out.result.loan_amount, dec!(721500));
    assert_eq!(out.result.down_payment, Decimal::ZERO);
    assert_eq!(out.result.term_years, 1);
}

#[test]
fn test_quote_clamps_and_reports() {
    let form = LoanForm {
        ex_showroom_price: dec!(650000),
        loan_amount: Some(dec!(900000)),
        annual_rate_percent: dec!(-4),
        term_years: Some(12),
    };
    let out = build_quote(&form, &PricingPolicy::default()).unwrap();
    assert_eq!(out.result.loan_amount, dec!(721500));
    assert_eq!(out.result.annual_rate_percent, Decimal::ZERO);
    assert_eq!(out.result.term_years, 10);
    assert_eq!(out.result.total_interest, Decimal::ZERO);
    assert_eq!(out.warnings.len(), 3);
}

#[test]
fn test_quote_for_listing_and_format() {
    let catalog = ListingCatalog::from_json(
        r#"[{ "id": "city-zx", "name": "Honda City ZX", "price": "1400000" }]"#,
    )
    .unwrap();
    let form = LoanForm {
        loan_amount: Some(dec!(1000000)),
        annual_rate_percent: dec!(9),
        term_years: Some(5),
        ..LoanForm::default()
    };
    let out = quote_for_listing(&catalog, "city-zx", &form, &PricingPolicy::default()).unwrap();
    assert_eq!(out.result.on_road_price, dec!(1554000));
    assert_eq!(
        format_currency(out.result.on_road_price, &Currency::INR),
        "₹15,54,000"
    );
    // 10 lakh at 9% over 5 years ~ 20,758.36
    assert_eq!(
        format_currency(out.result.monthly_payment, &Currency::INR),
        "₹20,758"
    );
}

#[test]
fn test_listing_form_without_price() {
    let catalog = ListingCatalog::from_json(r#"[{ "id": "creta-sx", "price": "1500000" }]"#)
        .unwrap();
    let form: LoanForm = serde_json::from_str(
        r#"{ "loan_amount": "1000000", "annual_rate_percent": "9", "term_years": 5 }"#,
    )
    .unwrap();
    assert_eq!(form.ex_showroom_price, Decimal::ZERO);

    let out = quote_for_listing(&catalog, "creta-sx", &form, &PricingPolicy::default()).unwrap();
    assert_eq!(out.result.on_road_price, dec!(1665000));
    assert_eq!(out.result.down_payment, dec!(665000));
}

#[test]
fn test_quote_for_missing_listing() {
    let catalog = ListingCatalog::new(Vec::new()).unwrap();
    let result = quote_for_listing(
        &catalog,
        "missing",
        &LoanForm::default(),
        &PricingPolicy::default(),
    );
    assert!(matches!(result, Err(AutoQuoteError::ListingNotFound(_))));
}
