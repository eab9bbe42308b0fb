mod handle_geo_query;

pub use handle_geo_query::HandleGeoQueryUseCase;
