//! Itinerary generation endpoint.
//!
//! ```text
//! POST /api/roteiro/ {"cidade":"Ubajara","dias":2,"com_criancas":true}
//! ```
//!
//! This endpoint answers with a flat `{ "error": "..." }` envelope instead of
//! the domain error shape used elsewhere; clients of the itinerary screen
//! read that field directly.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{
    ItineraryError, ItineraryRequestError, TRACE_ID_HEADER, TraceId, TripDays, TripRequest,
};
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;

/// Itinerary request body. Field names are Portuguese on the wire.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ItineraryRequest {
    /// City name, or one of `serra`, `todas`, `tudo`, `all` for the whole region.
    #[serde(default)]
    #[schema(example = "Ubajara")]
    pub cidade: Option<String>,
    /// Trip length in days, between 1 and 30.
    #[serde(default)]
    #[schema(value_type = Option<u32>, example = 2)]
    pub dias: Option<Value>,
    #[serde(default)]
    #[schema(example = "trilhas e cachoeiras")]
    pub interesses: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub com_criancas: Option<Value>,
    #[serde(default)]
    #[schema(example = "Pousada no centro de Viçosa do Ceará")]
    pub hospedagem: Option<String>,
}

/// Generated itinerary text.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ItineraryResponse {
    pub roteiro: String,
}

/// Error envelope of the itinerary endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ItineraryErrorBody {
    pub error: String,
}

/// Failure of the itinerary endpoint, rendered as [`ItineraryErrorBody`].
#[derive(Debug, thiserror::Error)]
pub enum ItineraryFailure {
    #[error(transparent)]
    Validation(#[from] ItineraryRequestError),
    #[error(transparent)]
    Planning(#[from] ItineraryError),
}

impl ResponseError for ItineraryFailure {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Planning(ItineraryError::NoSpotsFound { .. }) => StatusCode::NOT_FOUND,
            Self::Planning(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error_body(self.status_code(), self.to_string())
    }
}

fn error_body(status: StatusCode, message: String) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    if let Some(id) = TraceId::current() {
        builder.insert_header((TRACE_ID_HEADER, id.to_string()));
    }
    builder.json(ItineraryErrorBody { error: message })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_body(
        StatusCode::BAD_REQUEST,
        format!("Corpo da requisição inválido: {err}"),
    );
    InternalError::from_response(err, response).into()
}

/// JSON extractor settings for the itinerary scope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Truthiness of a loosely typed JSON flag.
///
/// Strings spelling a negative ("false", "0", "nao", "não", "no") count as
/// false so form-encoded clients behave as expected.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => {
            let text = text.trim().to_lowercase();
            !matches!(text.as_str(), "" | "false" | "0" | "nao" | "não" | "no")
        }
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

impl TryFrom<ItineraryRequest> for TripRequest {
    type Error = ItineraryRequestError;

    fn try_from(body: ItineraryRequest) -> Result<Self, Self::Error> {
        let days = TripDays::from_json(body.dias.as_ref())?;
        Ok(Self::new(days)
            .with_city(body.cidade.as_deref())
            .with_interests(body.interesses.as_deref())
            .with_children(is_truthy(body.com_criancas.as_ref()))
            .with_lodging(body.hospedagem.as_deref()))
    }
}

/// Generate a day-by-day itinerary for a city or the whole region.
#[utoipa::path(
    post,
    path = "/api/roteiro/",
    request_body = ItineraryRequest,
    responses(
        (status = 200, description = "Itinerary generated", body = ItineraryResponse),
        (status = 400, description = "Missing or invalid trip length", body = ItineraryErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = crate::domain::Error),
        (status = 404, description = "No tourist spots for the region", body = ItineraryErrorBody),
        (status = 500, description = "Spot lookup or text generation failed", body = ItineraryErrorBody)
    ),
    tags = ["itinerary"],
    operation_id = "generateItinerary",
    security(("BearerAuth" = []))
)]
#[post("")]
pub async fn generate_itinerary(
    auth: BearerAuth,
    state: web::Data<HttpState>,
    payload: web::Json<ItineraryRequest>,
) -> Result<web::Json<ItineraryResponse>, ItineraryFailure> {
    let request = TripRequest::try_from(payload.into_inner()).map_err(|err| {
        warn!(user_id = %auth.user_id(), error = %err, "itinerary request rejected");
        err
    })?;
    let itinerary = state.itinerary.plan(&request).await?;
    info!(
        user_id = %auth.user_id(),
        region = %itinerary.region_label,
        spots = itinerary.spot_count,
        days = request.days().get(),
        "itinerary delivered"
    );
    Ok(web::Json(ItineraryResponse {
        roteiro: itinerary.text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FIXTURE_LOGIN_USER_ID, FixtureLoginService, MockItineraryPlanner, TextGenerationError,
        TouristSpotRepositoryError,
    };
    use crate::domain::{GeneratedItinerary, UserId};
    use crate::inbound::http::test_utils::{http_state, issue_pair, jwt_tokens};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api/roteiro")
                .app_data(json_config())
                .service(generate_itinerary),
        )
    }

    fn bearer() -> String {
        let user_id = UserId::new(FIXTURE_LOGIN_USER_ID).expect("fixture id");
        format!("Bearer {}", issue_pair(&user_id).access)
    }

    async fn call(
        planner: MockItineraryPlanner,
        auth: Option<String>,
        body: Value,
    ) -> (StatusCode, Value) {
        let state = http_state(FixtureLoginService, jwt_tokens(), planner);
        let app = actix_test::init_service(test_app(state)).await;
        let mut request = actix_test::TestRequest::post()
            .uri("/api/roteiro")
            .set_json(body);
        if let Some(value) = auth {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    fn planner_returning(result: Result<GeneratedItinerary, ItineraryError>) -> MockItineraryPlanner {
        let mut planner = MockItineraryPlanner::new();
        planner.expect_plan().times(1).return_once(move |_| result);
        planner
    }

    fn idle_planner() -> MockItineraryPlanner {
        let mut planner = MockItineraryPlanner::new();
        planner.expect_plan().never();
        planner
    }

    #[actix_web::test]
    async fn returns_generated_text() {
        let mut planner = MockItineraryPlanner::new();
        planner
            .expect_plan()
            .withf(|request| {
                request.days().get() == 2
                    && request.city() == Some("Ubajara")
                    && request.with_children_flag()
                    && request.lodging().is_none()
            })
            .times(1)
            .return_once(|_| {
                Ok(GeneratedItinerary {
                    text: "Dia 1: Parque Nacional".to_owned(),
                    region_label: "Ubajara".to_owned(),
                    spot_count: 1,
                })
            });
        let (status, body) = call(
            planner,
            Some(bearer()),
            json!({ "cidade": "Ubajara", "dias": 2, "com_criancas": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "roteiro": "Dia 1: Parque Nacional" }));
    }

    #[rstest]
    #[case(json!({}), "O campo 'dias' é obrigatório.")]
    #[case(json!({ "dias": 0 }), "O campo 'dias' é obrigatório.")]
    #[case(json!({ "dias": "" }), "O campo 'dias' é obrigatório.")]
    #[case(json!({ "dias": "dois" }), "O campo 'dias' deve ser um número inteiro.")]
    #[case(json!({ "dias": 31 }), "O campo 'dias' deve estar entre 1 e 30.")]
    #[actix_web::test]
    async fn invalid_days_are_rejected_before_planning(#[case] body: Value, #[case] message: &str) {
        let (status, body) = call(idle_planner(), Some(bearer()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": message }));
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorised() {
        let (status, body) = call(idle_planner(), None, json!({ "dias": 1 })).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[case(
        ItineraryError::NoSpotsFound { region: "Crato".to_owned() },
        StatusCode::NOT_FOUND,
        "Nenhum ponto turístico encontrado para Crato."
    )]
    #[case(
        ItineraryError::Generation(TextGenerationError::quota_exceeded("limit reached")),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Erro ao gerar roteiro"
    )]
    #[case(
        ItineraryError::Repository(TouristSpotRepositoryError::connection("pool exhausted")),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Erro ao consultar pontos turísticos"
    )]
    #[actix_web::test]
    async fn planning_failures_use_the_error_envelope(
        #[case] error: ItineraryError,
        #[case] expected_status: StatusCode,
        #[case] message_prefix: &str,
    ) {
        let (status, body) = call(
            planner_returning(Err(error)),
            Some(bearer()),
            json!({ "cidade": "Crato", "dias": 1 }),
        )
        .await;
        assert_eq!(status, expected_status);
        let message = body["error"].as_str().expect("error message");
        assert!(message.starts_with(message_prefix), "unexpected message: {message}");
        assert!(body.get("roteiro").is_none());
    }

    #[actix_web::test]
    async fn malformed_json_uses_the_error_envelope() {
        let state = http_state(FixtureLoginService, jwt_tokens(), idle_planner());
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/roteiro")
            .insert_header((AUTHORIZATION, bearer()))
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"dias\":")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(json!(null)), false)]
    #[case(Some(json!(true)), true)]
    #[case(Some(json!(false)), false)]
    #[case(Some(json!(1)), true)]
    #[case(Some(json!(0)), false)]
    #[case(Some(json!("sim")), true)]
    #[case(Some(json!("false")), false)]
    #[case(Some(json!("Não")), false)]
    #[case(Some(json!([])), false)]
    fn children_flag_truthiness(#[case] value: Option<Value>, #[case] expected: bool) {
        assert_eq!(is_truthy(value.as_ref()), expected);
    }
}
