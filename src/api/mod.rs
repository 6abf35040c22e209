use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    BuyerProfile, BuyerType, CalculatorResults, Jurisdiction, PropertyType, Region, TableError,
    calculate,
};

pub const MAX_INTEREST_RATE: f64 = 30.0;
pub const MAX_LOAN_TERM_YEARS: u32 = 40;
pub const MAX_DEPENDENTS: u32 = 20;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliJurisdiction {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl From<CliJurisdiction> for Jurisdiction {
    fn from(value: CliJurisdiction) -> Self {
        match value {
            CliJurisdiction::Nsw => Jurisdiction::Nsw,
            CliJurisdiction::Vic => Jurisdiction::Vic,
            CliJurisdiction::Qld => Jurisdiction::Qld,
            CliJurisdiction::Wa => Jurisdiction::Wa,
            CliJurisdiction::Sa => Jurisdiction::Sa,
            CliJurisdiction::Tas => Jurisdiction::Tas,
            CliJurisdiction::Act => Jurisdiction::Act,
            CliJurisdiction::Nt => Jurisdiction::Nt,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPropertyType {
    Existing,
    New,
    Land,
}

impl From<CliPropertyType> for PropertyType {
    fn from(value: CliPropertyType) -> Self {
        match value {
            CliPropertyType::Existing => PropertyType::Existing,
            CliPropertyType::New => PropertyType::New,
            CliPropertyType::Land => PropertyType::Land,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliBuyerType {
    Single,
    Couple,
}

impl From<CliBuyerType> for BuyerType {
    fn from(value: CliBuyerType) -> Self {
        match value {
            CliBuyerType::Single => BuyerType::Single,
            CliBuyerType::Couple => BuyerType::Couple,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRegion {
    Capital,
    Regional,
}

impl From<CliRegion> for Region {
    fn from(value: CliRegion) -> Self {
        match value {
            CliRegion::Capital => Region::Capital,
            CliRegion::Regional => Region::Regional,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiJurisdiction {
    #[serde(alias = "NSW")]
    Nsw,
    #[serde(alias = "VIC")]
    Vic,
    #[serde(alias = "QLD")]
    Qld,
    #[serde(alias = "WA")]
    Wa,
    #[serde(alias = "SA")]
    Sa,
    #[serde(alias = "TAS")]
    Tas,
    #[serde(alias = "ACT")]
    Act,
    #[serde(alias = "NT")]
    Nt,
}

impl From<ApiJurisdiction> for CliJurisdiction {
    fn from(value: ApiJurisdiction) -> Self {
        match value {
            ApiJurisdiction::Nsw => CliJurisdiction::Nsw,
            ApiJurisdiction::Vic => CliJurisdiction::Vic,
            ApiJurisdiction::Qld => CliJurisdiction::Qld,
            ApiJurisdiction::Wa => CliJurisdiction::Wa,
            ApiJurisdiction::Sa => CliJurisdiction::Sa,
            ApiJurisdiction::Tas => CliJurisdiction::Tas,
            ApiJurisdiction::Act => CliJurisdiction::Act,
            ApiJurisdiction::Nt => CliJurisdiction::Nt,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiPropertyType {
    #[serde(alias = "established")]
    Existing,
    New,
    #[serde(alias = "vacantLand", alias = "vacant-land")]
    Land,
}

impl From<ApiPropertyType> for CliPropertyType {
    fn from(value: ApiPropertyType) -> Self {
        match value {
            ApiPropertyType::Existing => CliPropertyType::Existing,
            ApiPropertyType::New => CliPropertyType::New,
            ApiPropertyType::Land => CliPropertyType::Land,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiBuyerType {
    Single,
    Couple,
}

impl From<ApiBuyerType> for CliBuyerType {
    fn from(value: ApiBuyerType) -> Self {
        match value {
            ApiBuyerType::Single => CliBuyerType::Single,
            ApiBuyerType::Couple => CliBuyerType::Couple,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiRegion {
    Capital,
    Regional,
}

impl From<ApiRegion> for CliRegion {
    fn from(value: ApiRegion) -> Self {
        match value {
            ApiRegion::Capital => CliRegion::Capital,
            ApiRegion::Regional => CliRegion::Regional,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EstimatePayload {
    #[serde(alias = "state")]
    jurisdiction: Option<ApiJurisdiction>,
    property_type: Option<ApiPropertyType>,
    buyer_type: Option<ApiBuyerType>,
    region: Option<ApiRegion>,
    dependents: Option<u32>,
    annual_income: Option<f64>,
    deposit: Option<f64>,
    monthly_expenses: Option<f64>,
    hecs_debt: Option<f64>,
    interest_rate: Option<f64>,
    loan_term_years: Option<u32>,
    #[serde(alias = "isFirstHomeBuyer")]
    first_home_buyer: Option<bool>,
}

#[derive(Debug, Parser)]
#[command(
    name = "homebuyer",
    about = "First home buyer affordability estimator (borrowing capacity, stamp duty, LMI, schemes)"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log filter used when RUST_LOG is not set"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Run the HTTP API")]
    Serve(ServeArgs),
    #[command(about = "Price a purchase sweep and print it as JSON")]
    Estimate(EstimateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    #[arg(long, value_enum, default_value_t = CliJurisdiction::Nsw)]
    jurisdiction: CliJurisdiction,
    #[arg(long, value_enum, default_value_t = CliPropertyType::Existing)]
    property_type: CliPropertyType,
    #[arg(long, value_enum, default_value_t = CliBuyerType::Single)]
    buyer_type: CliBuyerType,
    #[arg(long, value_enum, default_value_t = CliRegion::Capital)]
    region: CliRegion,
    #[arg(long, default_value_t = 0)]
    dependents: u32,
    #[arg(long, default_value_t = 85_000.0, help = "Gross annual income in dollars")]
    annual_income: f64,
    #[arg(long, default_value_t = 50_000.0)]
    deposit: f64,
    #[arg(
        long,
        default_value_t = 2_000.0,
        help = "Declared monthly living expenses; floored at the HEM benchmark"
    )]
    monthly_expenses: f64,
    #[arg(long, default_value_t = 0.0, help = "Outstanding HECS/HELP balance")]
    hecs_debt: f64,
    #[arg(long, default_value_t = 6.2, help = "Annual interest rate in percent, e.g. 6.2")]
    interest_rate: f64,
    #[arg(long, default_value_t = 30)]
    loan_term_years: u32,
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    first_home_buyer: bool,
}

impl Default for EstimateArgs {
    fn default() -> Self {
        EstimateArgs {
            jurisdiction: CliJurisdiction::Nsw,
            property_type: CliPropertyType::Existing,
            buyer_type: CliBuyerType::Single,
            region: CliRegion::Capital,
            dependents: 0,
            annual_income: 85_000.0,
            deposit: 50_000.0,
            monthly_expenses: 2_000.0,
            hecs_debt: 0.0,
            interest_rate: 6.2,
            loan_term_years: 30,
            first_home_buyer: true,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputField {
    AnnualIncome,
    Deposit,
    MonthlyExpenses,
    HecsDebt,
    InterestRate,
    LoanTermYears,
    Dependents,
}

impl InputField {
    pub fn flag(self) -> &'static str {
        match self {
            InputField::AnnualIncome => "--annual-income",
            InputField::Deposit => "--deposit",
            InputField::MonthlyExpenses => "--monthly-expenses",
            InputField::HecsDebt => "--hecs-debt",
            InputField::InterestRate => "--interest-rate",
            InputField::LoanTermYears => "--loan-term-years",
            InputField::Dependents => "--dependents",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InputField::AnnualIncome => "annualIncome",
            InputField::Deposit => "deposit",
            InputField::MonthlyExpenses => "monthlyExpenses",
            InputField::HecsDebt => "hecsDebt",
            InputField::InterestRate => "interestRate",
            InputField::LoanTermYears => "loanTermYears",
            InputField::Dependents => "dependents",
        }
    }
}

// Display names CLI flags; HTTP responses use `api_message`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{} must be a finite number >= 0", .0.flag())]
    NotNonNegative(InputField),
    #[error("--interest-rate must be <= 30")]
    InterestRateTooHigh,
    #[error("--loan-term-years must be between 1 and 40")]
    LoanTerm,
    #[error("--dependents must be <= 20")]
    TooManyDependents,
    #[error("invalid request: {0}")]
    Payload(String),
}

impl InputError {
    pub fn field(&self) -> Option<InputField> {
        match self {
            InputError::NotNonNegative(field) => Some(*field),
            InputError::InterestRateTooHigh => Some(InputField::InterestRate),
            InputError::LoanTerm => Some(InputField::LoanTermYears),
            InputError::TooManyDependents => Some(InputField::Dependents),
            InputError::Payload(_) => None,
        }
    }

    pub fn api_message(&self) -> String {
        let Some(field) = self.field() else {
            return self.to_string();
        };
        let name = field.key();
        match self {
            InputError::InterestRateTooHigh => format!("{name} must be <= {MAX_INTEREST_RATE}"),
            InputError::LoanTerm => {
                format!("{name} must be between 1 and {MAX_LOAN_TERM_YEARS}")
            }
            InputError::TooManyDependents => format!("{name} must be <= {MAX_DEPENDENTS}"),
            _ => format!("{name} must be a finite number >= 0"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("reference table check failed: {0}")]
    Tables(#[from] TableError),
    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct JurisdictionInfo {
    code: &'static str,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn non_negative(field: InputField, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::NotNonNegative(field))
    }
}

fn build_profile(args: EstimateArgs) -> Result<BuyerProfile, InputError> {
    let annual_income = non_negative(InputField::AnnualIncome, args.annual_income)?;
    let deposit = non_negative(InputField::Deposit, args.deposit)?;
    let monthly_expenses = non_negative(InputField::MonthlyExpenses, args.monthly_expenses)?;
    let hecs_debt = non_negative(InputField::HecsDebt, args.hecs_debt)?;
    let interest_rate = non_negative(InputField::InterestRate, args.interest_rate)?;

    if interest_rate > MAX_INTEREST_RATE {
        return Err(InputError::InterestRateTooHigh);
    }
    if !(1..=MAX_LOAN_TERM_YEARS).contains(&args.loan_term_years) {
        return Err(InputError::LoanTerm);
    }
    if args.dependents > MAX_DEPENDENTS {
        return Err(InputError::TooManyDependents);
    }

    Ok(BuyerProfile {
        jurisdiction: args.jurisdiction.into(),
        property_type: args.property_type.into(),
        buyer_type: args.buyer_type.into(),
        region: args.region.into(),
        dependents: args.dependents,
        annual_income,
        deposit,
        monthly_expenses,
        hecs_debt,
        interest_rate,
        loan_term_years: args.loan_term_years,
        first_home_buyer: args.first_home_buyer,
    })
}

fn profile_from_payload(payload: EstimatePayload) -> Result<BuyerProfile, InputError> {
    let mut args = EstimateArgs::default();

    if let Some(v) = payload.jurisdiction {
        args.jurisdiction = v.into();
    }
    if let Some(v) = payload.property_type {
        args.property_type = v.into();
    }
    if let Some(v) = payload.buyer_type {
        args.buyer_type = v.into();
    }
    if let Some(v) = payload.region {
        args.region = v.into();
    }
    if let Some(v) = payload.dependents {
        args.dependents = v;
    }
    if let Some(v) = payload.annual_income {
        args.annual_income = v;
    }
    if let Some(v) = payload.deposit {
        args.deposit = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.hecs_debt {
        args.hecs_debt = v;
    }
    if let Some(v) = payload.interest_rate {
        args.interest_rate = v;
    }
    if let Some(v) = payload.loan_term_years {
        args.loan_term_years = v;
    }
    if let Some(v) = payload.first_home_buyer {
        args.first_home_buyer = v;
    }

    build_profile(args)
}

#[cfg(test)]
fn profile_from_json(json: &str) -> Result<BuyerProfile, InputError> {
    let payload = serde_json::from_str::<EstimatePayload>(json)
        .map_err(|e| InputError::Payload(e.to_string()))?;
    profile_from_payload(payload)
}

fn estimate(profile: &BuyerProfile) -> CalculatorResults {
    let results = calculate(profile);
    debug!(
        jurisdiction = profile.jurisdiction.code(),
        capacity = results.max_borrowing_capacity,
        rows = results.price_points.len(),
        "estimate computed"
    );
    results
}

pub fn run_estimate(args: EstimateArgs) -> Result<String, AppError> {
    let profile = build_profile(args)?;
    let results = estimate(&profile);
    Ok(serde_json::to_string_pretty(&results)?)
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/estimate",
            get(estimate_get_handler).post(estimate_post_handler),
        )
        .route("/api/jurisdictions", get(jurisdictions_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(host: &str, port: u16) -> Result<(), AppError> {
    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "homebuyer HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/health");

    axum::serve(listener, router()).await?;
    Ok(())
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Serve(args) => run_http_server(&args.host, args.port).await,
        Command::Estimate(args) => {
            let json = run_estimate(args)?;
            println!("{json}");
            Ok(())
        }
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn jurisdictions_handler() -> Response {
    let list: Vec<JurisdictionInfo> = Jurisdiction::ALL
        .iter()
        .map(|j| JurisdictionInfo {
            code: j.code(),
            name: j.name(),
        })
        .collect();
    json_response(StatusCode::OK, list)
}

async fn estimate_get_handler(
    payload: Result<Query<EstimatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => estimate_handler_impl(payload),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected estimate query");
            error_response(rejection.status(), &rejection.body_text())
        }
    }
}

async fn estimate_post_handler(payload: Result<Json<EstimatePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => estimate_handler_impl(payload),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected estimate body");
            error_response(rejection.status(), &rejection.body_text())
        }
    }
}

fn estimate_handler_impl(payload: EstimatePayload) -> Response {
    let profile = match profile_from_payload(payload) {
        Ok(profile) => profile,
        Err(err) => {
            warn!(error = %err, "invalid estimate request");
            return error_response(StatusCode::BAD_REQUEST, &err.api_message());
        }
    };

    json_response(StatusCode::OK, estimate(&profile))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use clap::CommandFactory;
    use serde_json::Value;
    use tower::ServiceExt;

    fn sample_args() -> EstimateArgs {
        EstimateArgs::default()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = router().oneshot(request).await.expect("route executes");
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        (status, cache, serde_json::from_slice(&body).expect("json payload"))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_args_match_default_profile() {
        let profile = build_profile(sample_args()).expect("valid defaults");
        assert_eq!(profile, BuyerProfile::default());
    }

    #[test]
    fn clap_defaults_match_api_defaults() {
        let cli = Cli::try_parse_from(["homebuyer", "estimate"]).expect("parses");
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate command");
        };
        assert_eq!(
            build_profile(args).expect("valid"),
            build_profile(sample_args()).expect("valid")
        );
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn clap_parses_estimate_flags() {
        let cli = Cli::try_parse_from([
            "homebuyer",
            "estimate",
            "--jurisdiction",
            "vic",
            "--property-type",
            "new",
            "--buyer-type",
            "couple",
            "--region",
            "regional",
            "--annual-income",
            "150000",
            "--first-home-buyer",
            "false",
            "--log-level",
            "debug",
        ])
        .expect("parses");
        assert_eq!(cli.log_level, "debug");
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate command");
        };
        let profile = build_profile(args).expect("valid");
        assert_eq!(profile.jurisdiction, Jurisdiction::Vic);
        assert_eq!(profile.property_type, PropertyType::New);
        assert_eq!(profile.buyer_type, BuyerType::Couple);
        assert_eq!(profile.region, Region::Regional);
        assert_eq!(profile.annual_income, 150_000.0);
        assert!(!profile.first_home_buyer);
    }

    #[test]
    fn clap_parses_serve_flags() {
        let cli = Cli::try_parse_from(["homebuyer", "serve", "--port", "9000"]).expect("parses");
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.port, 9000);
        assert_eq!(args.host, "0.0.0.0");
    }

    #[test]
    fn build_profile_rejects_negative_and_non_finite_money() {
        let mut args = sample_args();
        args.annual_income = -1.0;
        assert_eq!(
            build_profile(args).expect_err("negative income"),
            InputError::NotNonNegative(InputField::AnnualIncome)
        );

        let mut args = sample_args();
        args.deposit = f64::NAN;
        let err = build_profile(args).expect_err("NaN deposit");
        assert!(err.to_string().contains("--deposit"));

        let mut args = sample_args();
        args.hecs_debt = f64::INFINITY;
        assert!(build_profile(args).is_err());
    }

    #[test]
    fn input_errors_name_flags_on_cli_and_keys_over_http() {
        let err = InputError::NotNonNegative(InputField::MonthlyExpenses);
        assert_eq!(err.to_string(), "--monthly-expenses must be a finite number >= 0");
        assert_eq!(err.api_message(), "monthlyExpenses must be a finite number >= 0");

        assert_eq!(InputError::TooManyDependents.to_string(), "--dependents must be <= 20");
        assert_eq!(InputError::TooManyDependents.api_message(), "dependents must be <= 20");
        assert_eq!(
            InputError::InterestRateTooHigh.api_message(),
            "interestRate must be <= 30"
        );

        let payload = InputError::Payload("bad json".to_string());
        assert_eq!(payload.api_message(), payload.to_string());
    }

    #[test]
    fn build_profile_rejects_out_of_range_rate_term_and_dependents() {
        let mut args = sample_args();
        args.interest_rate = 31.0;
        assert_eq!(build_profile(args), Err(InputError::InterestRateTooHigh));

        let mut args = sample_args();
        args.loan_term_years = 0;
        assert_eq!(build_profile(args), Err(InputError::LoanTerm));

        let mut args = sample_args();
        args.loan_term_years = 41;
        assert_eq!(build_profile(args), Err(InputError::LoanTerm));

        let mut args = sample_args();
        args.dependents = 21;
        assert_eq!(build_profile(args), Err(InputError::TooManyDependents));
    }

    #[test]
    fn build_profile_accepts_boundary_values() {
        let mut args = sample_args();
        args.interest_rate = 30.0;
        args.loan_term_years = 40;
        args.dependents = 20;
        args.annual_income = 0.0;
        assert!(build_profile(args).is_ok());
    }

    #[test]
    fn payload_overrides_only_supplied_fields() {
        let profile = profile_from_json(
            r#"{"jurisdiction":"qld","propertyType":"new","annualIncome":120000,"dependents":2}"#,
        )
        .expect("valid payload");
        assert_eq!(profile.jurisdiction, Jurisdiction::Qld);
        assert_eq!(profile.property_type, PropertyType::New);
        assert_eq!(profile.annual_income, 120_000.0);
        assert_eq!(profile.dependents, 2);
        assert_eq!(profile.deposit, 50_000.0);
        assert_eq!(profile.interest_rate, 6.2);
        assert!(profile.first_home_buyer);
    }

    #[test]
    fn payload_accepts_legacy_field_names_and_upper_case_codes() {
        let profile = profile_from_json(r#"{"state":"TAS","isFirstHomeBuyer":false}"#)
            .expect("valid payload");
        assert_eq!(profile.jurisdiction, Jurisdiction::Tas);
        assert!(!profile.first_home_buyer);
    }

    #[test]
    fn payload_rejects_unknown_jurisdiction() {
        let err = profile_from_json(r#"{"jurisdiction":"nz"}"#).expect_err("unknown code");
        assert!(matches!(err, InputError::Payload(_)));
    }

    #[test]
    fn payload_validation_matches_cli_validation() {
        let err = profile_from_json(r#"{"loanTermYears":45}"#).expect_err("term too long");
        assert_eq!(err, InputError::LoanTerm);
    }

    #[test]
    fn run_estimate_prints_camel_case_json() {
        let json = run_estimate(sample_args()).expect("estimate runs");
        let value: Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["maxBorrowingCapacity"], 274_707.0);
        assert_eq!(value["pricePoints"].as_array().map(Vec::len), Some(11));
    }

    #[test]
    fn zero_income_dti_serializes_as_null() {
        let row = crate::core::PricePointResult {
            dti: crate::core::dti(100_000.0, 0.0),
            ..calculate(&BuyerProfile::default()).price_points[0].clone()
        };
        let value = serde_json::to_value(&row).expect("json");
        assert!(value["dti"].is_null());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, cache, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn jurisdictions_lists_all_eight() {
        let (status, _, body) = send(get("/api/jurisdictions")).await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().expect("array");
        assert_eq!(list.len(), 8);
        assert_eq!(list[0]["code"], "NSW");
        assert_eq!(list[0]["name"], "New South Wales");
        assert_eq!(list[7]["code"], "NT");
    }

    #[tokio::test]
    async fn estimate_get_uses_query_overrides() {
        let (status, cache, body) = send(get(
            "/api/estimate?jurisdiction=vic&annualIncome=120000&firstHomeBuyer=false",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body["inputs"]["jurisdiction"], "VIC");
        assert_eq!(body["inputs"]["annualIncome"], 120_000.0);
        assert_eq!(body["inputs"]["firstHomeBuyer"], false);
        assert!(!body["pricePoints"].as_array().expect("rows").is_empty());
    }

    #[tokio::test]
    async fn estimate_post_returns_descending_rows() {
        let (status, _, body) = send(post_json(
            "/api/estimate",
            r#"{"jurisdiction":"nsw","deposit":80000,"annualIncome":110000}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["pricePoints"].as_array().expect("rows");
        assert!(!rows.is_empty());
        let prices: Vec<f64> = rows
            .iter()
            .filter_map(|row| row["purchasePrice"].as_f64())
            .collect();
        assert!(prices.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[tokio::test]
    async fn estimate_with_no_income_has_no_rows() {
        let (status, _, body) = send(post_json("/api/estimate", r#"{"annualIncome":0}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["maxBorrowingCapacity"], 0.0);
        assert!(body["pricePoints"].as_array().expect("rows").is_empty());
    }

    #[tokio::test]
    async fn estimate_rejects_invalid_values_with_json_error() {
        let (status, cache, body) =
            send(post_json("/api/estimate", r#"{"interestRate":45}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "interestRate must be <= 30");
    }

    #[tokio::test]
    async fn estimate_names_json_fields_in_errors() {
        let (status, _, body) = send(get("/api/estimate?deposit=-5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "deposit must be a finite number >= 0");

        let (_, _, body) = send(post_json("/api/estimate", r#"{"loanTermYears":0}"#)).await;
        assert_eq!(body["error"], "loanTermYears must be between 1 and 40");
        assert!(body["error"].as_str().is_some_and(|msg| !msg.contains("--")));
    }

    #[tokio::test]
    async fn estimate_rejects_malformed_json() {
        let (status, _, body) = send(post_json("/api/estimate", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn estimate_rejects_bad_query_value() {
        let (status, _, body) = send(get("/api/estimate?annualIncome=lots")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (status, cache, body) = send(get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "Not found");
    }
}
