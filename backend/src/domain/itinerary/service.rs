//! Itinerary generation use-case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::TouristSpot;
use crate::domain::ports::{
    ItineraryPlanner, TextGenerationError, TextGenerationSource, TouristSpotRepository,
    TouristSpotRepositoryError,
};

use super::{Region, TripRequest, compose_prompt};

/// Failures raised while planning an itinerary.
///
/// Messages are user facing and in Brazilian Portuguese.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// The resolved region has no stored spots.
    #[error("Nenhum ponto turístico encontrado para {region}.")]
    NoSpotsFound { region: String },
    /// Spots could not be loaded.
    #[error("Erro ao consultar pontos turísticos: {0}")]
    Repository(#[from] TouristSpotRepositoryError),
    /// The text generation service failed.
    #[error("Erro ao gerar roteiro: {0}")]
    Generation(#[from] TextGenerationError),
}

/// Text returned by the model together with what it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedItinerary {
    pub text: String,
    pub region_label: String,
    pub spot_count: usize,
}

/// Plans itineraries from stored spots and a text generation source.
///
/// Generation is attempted exactly once; failures are surfaced, never
/// retried.
#[derive(Clone)]
pub struct ItineraryService {
    spots: Arc<dyn TouristSpotRepository>,
    generator: Arc<dyn TextGenerationSource>,
}

impl ItineraryService {
    /// Create a service over the given ports.
    pub fn new(
        spots: Arc<dyn TouristSpotRepository>,
        generator: Arc<dyn TextGenerationSource>,
    ) -> Self {
        Self { spots, generator }
    }

    async fn load_spots(&self, region: &Region) -> Result<Vec<TouristSpot>, ItineraryError> {
        let result = match region {
            Region::Whole => self.spots.list_all().await,
            Region::City(city) => self.spots.list_by_city(city).await,
        };
        result.map_err(|err| {
            error!(error = %err, region = region.label(), "tourist spot lookup failed");
            ItineraryError::from(err)
        })
    }
}

#[async_trait]
impl ItineraryPlanner for ItineraryService {
    async fn plan(&self, request: &TripRequest) -> Result<GeneratedItinerary, ItineraryError> {
        let region = Region::resolve(request.city());
        let spots = self.load_spots(&region).await?;
        if spots.is_empty() {
            warn!(region = region.label(), "no tourist spots for region");
            return Err(ItineraryError::NoSpotsFound {
                region: region.label().to_owned(),
            });
        }

        let prompt = compose_prompt(&spots, region.label(), request);
        info!(
            region = region.label(),
            spots = spots.len(),
            days = request.days().get(),
            prompt_chars = prompt.chars().count(),
            "generating itinerary"
        );
        let text = self.generator.generate(&prompt).await.map_err(|err| {
            error!(kind = err.kind(), error = %err, "itinerary generation failed");
            ItineraryError::from(err)
        })?;

        Ok(GeneratedItinerary {
            text,
            region_label: region.label().to_owned(),
            spot_count: spots.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureTouristSpotRepository, MockTextGenerationSource, MockTouristSpotRepository,
    };
    use crate::domain::{TripDays, WHOLE_REGION_LABEL};
    use rstest::rstest;

    fn request(city: Option<&str>) -> TripRequest {
        TripRequest::new(TripDays::new(2).expect("valid days")).with_city(city)
    }

    fn service_with(generator: MockTextGenerationSource) -> ItineraryService {
        ItineraryService::new(Arc::new(FixtureTouristSpotRepository), Arc::new(generator))
    }

    #[tokio::test]
    async fn city_filter_limits_prompt_to_matching_spots() {
        let mut generator = MockTextGenerationSource::new();
        generator
            .expect_generate()
            .withf(|prompt| {
                prompt.contains("região de tianguá")
                    && prompt.contains("Mirante do Gavião")
                    && prompt.contains("Cachoeira do Boi Morto")
                    && !prompt.contains("Parque Nacional de Ubajara")
            })
            .times(1)
            .returning(|_| Ok("Dia 1: Mirante".to_owned()));

        let itinerary = service_with(generator)
            .plan(&request(Some("tianguá")))
            .await
            .expect("itinerary");

        assert_eq!(itinerary.text, "Dia 1: Mirante");
        assert_eq!(itinerary.region_label, "tianguá");
        assert_eq!(itinerary.spot_count, 2);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("serra"))]
    #[case(Some("Todas"))]
    #[tokio::test]
    async fn whole_region_uses_every_spot(#[case] city: Option<&str>) {
        let mut generator = MockTextGenerationSource::new();
        generator
            .expect_generate()
            .withf(|prompt| prompt.contains(WHOLE_REGION_LABEL))
            .times(1)
            .returning(|_| Ok("roteiro".to_owned()));

        let itinerary = service_with(generator)
            .plan(&request(city))
            .await
            .expect("itinerary");

        assert_eq!(itinerary.region_label, WHOLE_REGION_LABEL);
        assert_eq!(itinerary.spot_count, 4);
    }

    #[tokio::test]
    async fn unknown_city_fails_without_calling_generator() {
        let mut generator = MockTextGenerationSource::new();
        generator.expect_generate().never();

        let err = service_with(generator)
            .plan(&request(Some("Fortaleza")))
            .await
            .expect_err("no spots");

        assert_eq!(
            err,
            ItineraryError::NoSpotsFound {
                region: "Fortaleza".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "Nenhum ponto turístico encontrado para Fortaleza."
        );
    }

    #[tokio::test]
    async fn generation_failure_is_reported_with_its_text() {
        let mut generator = MockTextGenerationSource::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Err(TextGenerationError::quota_exceeded("daily limit")));

        let err = service_with(generator)
            .plan(&request(Some("Ubajara")))
            .await
            .expect_err("generation fails");

        assert!(matches!(err, ItineraryError::Generation(_)));
        let message = err.to_string();
        assert!(message.starts_with("Erro ao gerar roteiro: "));
        assert!(message.contains("daily limit"));
    }

    #[tokio::test]
    async fn repository_failure_is_surfaced() {
        let mut spots = MockTouristSpotRepository::new();
        spots
            .expect_list_all()
            .times(1)
            .returning(|| Err(TouristSpotRepositoryError::connection("pool exhausted")));
        let mut generator = MockTextGenerationSource::new();
        generator.expect_generate().never();

        let err = ItineraryService::new(Arc::new(spots), Arc::new(generator))
            .plan(&request(None))
            .await
            .expect_err("repository fails");

        assert!(matches!(err, ItineraryError::Repository(_)));
    }
}
