//! The built-in college football pipeline catalog.

use super::{StageDefinition, StageRegistry};
use crate::errors::ConfigurationError;

/// Returns the eight stages of the college football weather pipeline.
#[must_use]
pub fn college_football_stages() -> Vec<StageDefinition> {
    vec![
        StageDefinition::new(1, "Fetch Data")
            .with_units([
                "1_fetch_data/cfb_data_pipeline.ipynb",
                "1_fetch_data/school_locations_pipeline.ipynb",
            ])
            .with_description("Download college football data and school locations"),
        StageDefinition::new(2, "Validate Data")
            .with_unit("2_validate_data/cfb_data_validator.ipynb")
            .with_description("Validate CFB dataset using LLM sampling"),
        StageDefinition::new(3, "Preprocess School Matching")
            .with_unit("3_preprocess_school_matching/school_location_matcher.ipynb")
            .with_description("Match school names between datasets"),
        StageDefinition::new(4, "Fetch Venue Locations")
            .with_unit("4_fetch_venue_locations/fetch_venue_locations.ipynb")
            .with_description("Get venue location data from CFB API"),
        StageDefinition::new(5, "Combine CFB and Locations")
            .with_unit("5_combine_cfb_and_locations/combine_cfb_and_locations.ipynb")
            .with_description("Combine game data with location information"),
        StageDefinition::new(6, "Enrich Weather Data")
            .with_unit("6_enrich_weather_data/enrich_game_weather_data.ipynb")
            .with_description("Add weather data to game records"),
        StageDefinition::new(7, "Enrich School Weather Data")
            .with_unit("7_fetch_school_weather_data/enrich_school_weather_data.ipynb")
            .with_description("Add weather data to school records"),
        StageDefinition::new(8, "Generate Codebooks")
            .with_unit("8_generate_codebooks/generate_codebook.ipynb")
            .with_description("Generate codebooks for all CSV files in the repository"),
    ]
}

/// Builds the validated registry for the built-in catalog.
///
/// # Errors
///
/// Only fails if the built-in catalog itself is malformed.
pub fn college_football_catalog() -> Result<StageRegistry, ConfigurationError> {
    StageRegistry::new(college_football_stages())
}
