use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use autoquote_core::loan::emi::{validate_term_years, LoanQuoteInput};
use autoquote_core::types::{Currency, PricingPolicy};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<'a, T: Deserialize<'a>>(input_json: &'a str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn respond(output: &impl serde::Serialize) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

/// Terms arrive signed from JS so a negative term fails as invalid input,
/// not as a deserialisation error.
#[derive(Deserialize)]
struct EmiRequest {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: i64,
}

impl EmiRequest {
    fn into_loan(self) -> NapiResult<LoanQuoteInput> {
        Ok(LoanQuoteInput {
            principal: self.principal,
            annual_rate_percent: self.annual_rate_percent,
            term_years: validate_term_years(self.term_years).map_err(to_napi_error)?,
        })
    }
}

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let loan = parse::<EmiRequest>(&input_json)?.into_loan()?;
    let output =
        autoquote_core::compute_emi(loan.principal, loan.annual_rate_percent, loan.term_years)
            .map_err(to_napi_error)?;
    respond(&output)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let loan = parse::<EmiRequest>(&input_json)?.into_loan()?;
    let output =
        autoquote_core::loan::schedule::build_schedule(&loan).map_err(to_napi_error)?;
    respond(&output)
}

#[derive(Deserialize)]
struct AffordRequest {
    target_monthly_payment: Decimal,
    annual_rate_percent: Decimal,
    term_years: i64,
}

#[napi]
pub fn max_loan_for_emi(input_json: String) -> NapiResult<String> {
    let req: AffordRequest = parse(&input_json)?;
    let term_years = validate_term_years(req.term_years).map_err(to_napi_error)?;
    let output = autoquote_core::loan::affordability::max_loan_for_emi(
        req.target_monthly_payment,
        req.annual_rate_percent,
        term_years,
    )
    .map_err(to_napi_error)?;
    respond(&output)
}

// ---------------------------------------------------------------------------
// Pricing and quotes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct OnRoadRequest {
    ex_showroom_price: Decimal,
    #[serde(default)]
    policy: Option<PricingPolicy>,
}

#[napi]
pub fn compute_on_road_price(input_json: String) -> NapiResult<String> {
    let req: OnRoadRequest = parse(&input_json)?;
    let policy = req.policy.unwrap_or_default();
    let output = autoquote_core::pricing::on_road::compute_on_road_price_with(
        req.ex_showroom_price,
        &policy,
    )
    .map_err(to_napi_error)?;
    respond(&output)
}

#[derive(Deserialize)]
struct QuoteRequest {
    #[serde(flatten)]
    form: autoquote_core::quote::LoanForm,
    #[serde(default)]
    policy: Option<PricingPolicy>,
}

#[napi]
pub fn build_quote(input_json: String) -> NapiResult<String> {
    let req: QuoteRequest = parse(&input_json)?;
    let policy = req.policy.unwrap_or_default();
    let output = autoquote_core::quote::build_quote(&req.form, &policy).map_err(to_napi_error)?;
    respond(&output)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String, currency: Option<String>) -> NapiResult<String> {
    let amount: Decimal = amount.trim().parse().map_err(to_napi_error)?;
    let currency: Currency = match currency {
        Some(code) => code.parse().map_err(to_napi_error)?,
        None => Currency::default(),
    };
    Ok(autoquote_core::format::format_currency(amount, &currency))
}
