pub mod errors;
pub mod snapshot;

/// Build the provider location query, `"city"` or `"city,country"`.
///
/// The country code is a pass-through disambiguation hint; without it the
/// provider's default resolution applies.
pub fn location_query(city: &str, country: Option<&str>) -> String {
    match country {
        Some(country) => format!("{},{}", city, country),
        None => city.to_string(),
    }
}
