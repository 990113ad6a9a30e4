//! End-to-end behaviour of `POST /api/roteiro/` over in-memory adapters.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use roteiro_backend::Trace;
use roteiro_backend::domain::ports::{
    FIXTURE_LOGIN_USER_ID, FixtureLoginService, TextGenerationError, TextGenerationSource, TokenService,
    TouristSpotRepository, TouristSpotRepositoryError,
};
use roteiro_backend::domain::{
    Category, GeoPoint, ItineraryService, TouristSpot, TouristSpotId, UserId,
};
use roteiro_backend::inbound::http::itinerary::{generate_itinerary, json_config};
use roteiro_backend::inbound::http::state::HttpState;
use roteiro_backend::outbound::auth::{JwtTokenService, TokenLifetimes};

const SECRET: &[u8] = b"itinerary-endpoint-secret";

#[derive(Clone, Default)]
struct InMemorySpots(Vec<TouristSpot>);

#[async_trait]
impl TouristSpotRepository for InMemorySpots {
    async fn list_all(&self) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        let mut spots = self.0.clone();
        spots.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(spots)
    }

    async fn list_by_city(
        &self,
        city: &str,
    ) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        let wanted = city.trim().to_lowercase();
        let all = self.list_all().await?;
        Ok(all
            .into_iter()
            .filter(|spot| spot.city.trim().to_lowercase() == wanted)
            .collect())
    }
}

/// Generator that records prompts and replays a canned outcome.
#[derive(Clone)]
struct RecordingGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    outcome: Result<String, TextGenerationError>,
}

impl RecordingGenerator {
    fn replying(outcome: Result<String, TextGenerationError>) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log lock").clone()
    }
}

#[async_trait]
impl TextGenerationSource for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        self.prompts
            .lock()
            .expect("prompt log lock")
            .push(prompt.to_owned());
        self.outcome.clone()
    }
}

fn spot(name: &str, description: &str, city: &str) -> TouristSpot {
    TouristSpot {
        id: TouristSpotId::random(),
        name: name.to_owned(),
        description: description.to_owned(),
        city: city.to_owned(),
        location: GeoPoint::from_micro_degrees(-3_732_300, -40_991_600).expect("valid point"),
        category: Category::Natural,
        image_count: 0,
        created_at: Utc::now(),
    }
}

#[fixture]
fn catalogue() -> InMemorySpots {
    InMemorySpots(vec![
        spot("Mirante do Gavião", "Rampa de voo livre.", "Tiangua"),
        spot("Cachoeira do Boi Morto", "Queda d'água na mata.", "Tiangua"),
        spot("Gruta de Ubajara", "Caverna calcária.", "Ubajara"),
    ])
}

fn tokens() -> JwtTokenService {
    JwtTokenService::new(SECRET, TokenLifetimes::default())
}

fn known_user() -> UserId {
    UserId::new(FIXTURE_LOGIN_USER_ID).expect("fixture id")
}

fn bearer_for(user_id: &UserId) -> String {
    let pair = tokens().issue_pair(user_id).expect("token signing");
    format!("Bearer {}", pair.access)
}

async fn post_itinerary(
    spots: InMemorySpots,
    generator: RecordingGenerator,
    body: Value,
) -> (StatusCode, Value) {
    post_itinerary_as(spots, generator, &known_user(), body).await
}

async fn post_itinerary_as(
    spots: InMemorySpots,
    generator: RecordingGenerator,
    subject: &UserId,
    body: Value,
) -> (StatusCode, Value) {
    let planner = ItineraryService::new(Arc::new(spots), Arc::new(generator));
    let state = web::Data::new(HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(tokens()),
        Arc::new(planner),
    ));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(Trace)
            .service(
                web::scope("/api").service(
                    web::scope("/roteiro")
                        .app_data(json_config())
                        .service(generate_itinerary),
                ),
            ),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/api/roteiro/")
        .insert_header((AUTHORIZATION, bearer_for(subject)))
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn city_request_lists_only_that_city(catalogue: InMemorySpots) {
    let generator = RecordingGenerator::replying(Ok("Dia 1: Mirante".to_owned()));
    let (status, body) = post_itinerary(
        catalogue,
        generator.clone(),
        json!({ "dias": 3, "cidade": "Tiangua" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "roteiro": "Dia 1: Mirante" }));
    let prompts = generator.prompts();
    let [prompt] = prompts.as_slice() else {
        panic!("expected exactly one generation call, got {}", prompts.len());
    };
    assert!(prompt.contains("3 dias"));
    assert!(prompt.contains("região de Tiangua"));
    assert!(prompt.contains("Mirante do Gavião: Rampa de voo livre."));
    assert!(prompt.contains("Cachoeira do Boi Morto: Queda d'água na mata."));
    assert!(!prompt.contains("Gruta de Ubajara"));
}

#[rstest]
#[case("serra")]
#[case(" TODAS ")]
#[case("")]
#[actix_web::test]
async fn region_keywords_cover_every_spot(catalogue: InMemorySpots, #[case] city: &str) {
    let generator = RecordingGenerator::replying(Ok("ok".to_owned()));
    let (status, _) = post_itinerary(
        catalogue,
        generator.clone(),
        json!({ "dias": 1, "cidade": city }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = generator.prompts().concat();
    assert!(prompt.contains("Serra da Ibiapaba"));
    for name in ["Mirante do Gavião", "Cachoeira do Boi Morto", "Gruta de Ubajara"] {
        assert!(prompt.contains(name), "prompt should list {name}");
    }
}

#[actix_web::test]
async fn empty_catalogue_is_not_found() {
    let generator = RecordingGenerator::replying(Ok("unused".to_owned()));
    let (status, body) =
        post_itinerary(InMemorySpots::default(), generator.clone(), json!({ "dias": 2 })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    assert!(generator.prompts().is_empty());
}

#[rstest]
#[actix_web::test]
async fn missing_days_is_bad_request(catalogue: InMemorySpots) {
    let generator = RecordingGenerator::replying(Ok("unused".to_owned()));
    let (status, body) = post_itinerary(catalogue, generator.clone(), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "O campo 'dias' é obrigatório." }));
    assert!(generator.prompts().is_empty());
}

#[rstest]
#[actix_web::test]
async fn generation_failure_is_reported_without_itinerary(catalogue: InMemorySpots) {
    let generator =
        RecordingGenerator::replying(Err(TextGenerationError::timeout("deadline of 60s elapsed")));
    let (status, body) =
        post_itinerary(catalogue, generator, json!({ "dias": 2, "cidade": "Ubajara" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error text");
    assert!(message.contains("deadline of 60s elapsed"), "{message}");
    assert!(body.get("roteiro").is_none());
}

#[rstest]
#[case(json!(true), true)]
#[case(json!(false), false)]
#[actix_web::test]
async fn children_clause_follows_flag(
    catalogue: InMemorySpots,
    #[case] flag: Value,
    #[case] expect_clause: bool,
) {
    let generator = RecordingGenerator::replying(Ok("ok".to_owned()));
    let (status, _) = post_itinerary(
        catalogue,
        generator.clone(),
        json!({ "dias": 1, "com_criancas": flag, "hospedagem": "Pousada Serra Verde" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompt = generator.prompts().concat();
    assert_eq!(prompt.contains("crianças"), expect_clause);
    assert!(prompt.contains("Pousada Serra Verde"));
}

#[rstest]
#[actix_web::test]
async fn signed_token_for_unknown_user_is_refused(catalogue: InMemorySpots) {
    let generator = RecordingGenerator::replying(Ok("never".to_owned()));
    let (status, body) = post_itinerary_as(
        catalogue,
        generator.clone(),
        &UserId::random(),
        json!({ "dias": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "user not found");
    assert!(generator.prompts().is_empty());
}
