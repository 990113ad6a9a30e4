//! Driven port for reading tourist spots.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{Category, GeoPoint, TouristSpot, TouristSpotId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tourist spot repository adapters.
    pub enum TouristSpotRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tourist spot repository connection failed: {message}",
        /// Query failed during execution or returned unreadable rows.
        Query { message: String } => "tourist spot repository query failed: {message}",
    }
}

/// Read access to stored tourist spots.
///
/// Results are ordered by name, then by id, and carry the number of images
/// attached to each spot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TouristSpotRepository: Send + Sync {
    /// Every stored spot.
    async fn list_all(&self) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError>;

    /// Spots whose city equals `city`, ignoring case and surrounding
    /// whitespace.
    async fn list_by_city(&self, city: &str)
    -> Result<Vec<TouristSpot>, TouristSpotRepositoryError>;
}

/// In-memory repository used when no database is configured.
///
/// Serves a small, fixed catalogue of Serra da Ibiapaba attractions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTouristSpotRepository;

struct FixtureSpot {
    id: u128,
    name: &'static str,
    description: &'static str,
    city: &'static str,
    latitude: i32,
    longitude: i32,
    category: Category,
    image_count: u32,
}

const FIXTURE_SPOTS: [FixtureSpot; 4] = [
    FixtureSpot {
        id: 0x5b0c_5e9a_0a4e_4f0e_9d7a_1b7c_0000_0001,
        name: "Parque Nacional de Ubajara",
        description: "Parque com trilhas, teleférico e a Gruta de Ubajara.",
        city: "Ubajara",
        latitude: -3_836_900,
        longitude: -40_901_100,
        category: Category::Natural,
        image_count: 2,
    },
    FixtureSpot {
        id: 0x5b0c_5e9a_0a4e_4f0e_9d7a_1b7c_0000_0002,
        name: "Igreja de Nossa Senhora da Assunção",
        description: "Igreja jesuíta do século XVIII no centro histórico.",
        city: "Viçosa do Ceará",
        latitude: -3_562_400,
        longitude: -41_092_100,
        category: Category::Religious,
        image_count: 0,
    },
    FixtureSpot {
        id: 0x5b0c_5e9a_0a4e_4f0e_9d7a_1b7c_0000_0003,
        name: "Mirante do Gavião",
        description: "Rampa de voo livre com vista para o sertão.",
        city: "Tianguá",
        latitude: -3_732_300,
        longitude: -40_991_700,
        category: Category::Adventure,
        image_count: 1,
    },
    FixtureSpot {
        id: 0x5b0c_5e9a_0a4e_4f0e_9d7a_1b7c_0000_0004,
        name: "Cachoeira do Boi Morto",
        description: "Queda d'água cercada de mata preservada.",
        city: "Tianguá",
        latitude: -3_698_000,
        longitude: -40_955_000,
        category: Category::Natural,
        image_count: 0,
    },
];

fn fixture_created_at() -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200, 0)
        .single()
        .unwrap_or_default()
}

impl FixtureTouristSpotRepository {
    fn spots() -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        let mut spots = FIXTURE_SPOTS
            .iter()
            .map(|spot| {
                let location = GeoPoint::from_micro_degrees(spot.latitude, spot.longitude)
                    .map_err(|err| TouristSpotRepositoryError::query(err.to_string()))?;
                Ok(TouristSpot {
                    id: TouristSpotId::from_uuid(Uuid::from_u128(spot.id)),
                    name: spot.name.to_owned(),
                    description: spot.description.to_owned(),
                    city: spot.city.to_owned(),
                    location,
                    category: spot.category,
                    image_count: spot.image_count,
                    created_at: fixture_created_at(),
                })
            })
            .collect::<Result<Vec<_>, TouristSpotRepositoryError>>()?;
        spots.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(spots)
    }
}

#[async_trait]
impl TouristSpotRepository for FixtureTouristSpotRepository {
    async fn list_all(&self) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        Self::spots()
    }

    async fn list_by_city(
        &self,
        city: &str,
    ) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        let wanted = city.trim().to_lowercase();
        Ok(Self::spots()?
            .into_iter()
            .filter(|spot| spot.city.trim().to_lowercase() == wanted)
            .collect())
    }
}
