//! Prompt composition for itinerary generation.
//!
//! The prompt is written in Brazilian Portuguese and lists every candidate
//! spot on its own line so the model can only pick from the catalogue.

use crate::domain::TouristSpot;

use super::TripRequest;

/// Interests used when the traveller gave none.
pub const DEFAULT_INTERESTS: &str = "diversos";

/// Render one catalogue line for `spot`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use roteiro_backend::domain::{describe_spot, Category, GeoPoint, TouristSpot, TouristSpotId};
///
/// let spot = TouristSpot {
///     id: TouristSpotId::random(),
///     name: "Mirante".into(),
///     description: "Vista".into(),
///     city: "Tianguá".into(),
///     location: GeoPoint::from_micro_degrees(-3_732_300, -40_991_700).unwrap(),
///     category: Category::Adventure,
///     image_count: 0,
///     created_at: Utc::now(),
/// };
/// assert_eq!(
///     describe_spot(&spot),
///     "- Mirante: Vista | Categoria: Aventura | Cidade: Tianguá | Coordenadas: -3.732300,-40.991700"
/// );
/// ```
#[must_use]
pub fn describe_spot(spot: &TouristSpot) -> String {
    let mut line = format!(
        "- {}: {} | Categoria: {} | Cidade: {} | Coordenadas: {}",
        spot.name,
        spot.description,
        spot.category.label(),
        spot.city,
        spot.location
    );
    match spot.image_count {
        0 => {}
        1 => line.push_str(" | 1 imagem cadastrada"),
        n => line.push_str(&format!(" | {n} imagens cadastradas")),
    }
    line
}

/// Build the full generation prompt.
#[must_use]
pub fn compose_prompt(spots: &[TouristSpot], region_label: &str, request: &TripRequest) -> String {
    let days = request.days().get();
    let day_word = if days == 1 { "dia" } else { "dias" };
    let mut prompt = format!(
        "Crie um roteiro turístico de {days} {day_word} para a região de {region_label}."
    );
    if request.with_children_flag() {
        prompt.push_str(
            " O viajante estará acompanhado de crianças, então priorize atividades \
             adequadas para a família.",
        );
    }
    if let Some(lodging) = request.lodging() {
        prompt.push_str(&format!(
            " A hospedagem será em {lodging}, considere-a como ponto de partida e \
             retorno de cada dia."
        ));
    }
    let interests = request.interests().unwrap_or(DEFAULT_INTERESTS);
    prompt.push_str(&format!("\n\nInteresses do viajante: {interests}."));

    prompt.push_str("\n\nPontos turísticos disponíveis:\n");
    for spot in spots {
        prompt.push_str(&describe_spot(spot));
        prompt.push('\n');
    }

    prompt.push_str(
        "\nInstruções:\n\
         - Organize o roteiro por dia, usando os títulos Dia 1, Dia 2 e assim por diante.\n\
         - Sugira horários aproximados para cada atividade.\n\
         - Use as coordenadas para agrupar pontos próximos no mesmo dia e reduzir deslocamentos.\n\
         - Utilize somente os pontos turísticos listados acima.\n\
         - Responda em português do Brasil.",
    );
    prompt
}
