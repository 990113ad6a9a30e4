//! PostgreSQL-backed `TouristSpotRepository` adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::TouristSpot;
use crate::domain::ports::{TouristSpotRepository, TouristSpotRepositoryError};

use super::diesel_helpers::{
    collect_rows, is_connection_error, map_diesel_error_message, map_pool_error_message,
};
use super::models::TouristSpotRow;
use super::pool::DbPool;
use super::schema::{tourist_spot_images, tourist_spots};

diesel::define_sql_function! {
    /// SQL `LOWER`.
    fn lower(value: Text) -> Text;
}

diesel::define_sql_function! {
    /// SQL `BTRIM` with the default whitespace set.
    fn btrim(value: Text) -> Text;
}

/// Diesel implementation of the tourist spot read port.
#[derive(Clone)]
pub struct DieselTouristSpotRepository {
    pool: DbPool,
}

impl DieselTouristSpotRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        city: Option<&str>,
    ) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        let mut conn = self
            .pool
            .connection()
            .await
            .map_err(|err| TouristSpotRepositoryError::connection(map_pool_error_message(err)))?;

        let mut query = tourist_spots::table
            .select(TouristSpotRow::as_select())
            .order_by((tourist_spots::name.asc(), tourist_spots::id.asc()))
            .into_boxed();
        if let Some(city) = city {
            query = query.filter(lower(btrim(tourist_spots::city)).eq(city.trim().to_lowercase()));
        }
        let rows: Vec<TouristSpotRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "list tourist spots"))?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let counts: HashMap<Uuid, i64> = tourist_spot_images::table
            .filter(tourist_spot_images::tourist_spot_id.eq_any(&ids))
            .group_by(tourist_spot_images::tourist_spot_id)
            .select((
                tourist_spot_images::tourist_spot_id,
                diesel::dsl::count_star(),
            ))
            .load::<(Uuid, i64)>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "count tourist spot images"))?
            .into_iter()
            .collect();

        collect_rows(
            rows.into_iter().map(|row| {
                let image_count = counts
                    .get(&row.id)
                    .map_or(0, |count| u32::try_from(*count).unwrap_or(u32::MAX));
                row.into_domain(image_count)
            }),
            TouristSpotRepositoryError::query,
        )
    }
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> TouristSpotRepositoryError {
    let message = map_diesel_error_message(error, operation);
    if is_connection_error(error) {
        TouristSpotRepositoryError::connection(message)
    } else {
        TouristSpotRepositoryError::query(message)
    }
}

#[async_trait]
impl TouristSpotRepository for DieselTouristSpotRepository {
    async fn list_all(&self) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        self.load(None).await
    }

    async fn list_by_city(
        &self,
        city: &str,
    ) -> Result<Vec<TouristSpot>, TouristSpotRepositoryError> {
        self.load(Some(city)).await
    }
}
