use thiserror::Error;
use url::Url;

pub const MIN_YEAR: i32 = 1886;
pub const MAX_YEAR: i32 = 2100;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Price must be a finite, non-negative number")]
    InvalidPrice,
    #[error("Year must be between {MIN_YEAR} and {MAX_YEAR}")]
    InvalidYear,
    #[error("Odometer value cannot be negative")]
    NegativeOdometer,
    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(String),
    #[error("Title must contain at least one letter or digit")]
    EmptySlug,
}

/// Trims a required text field, rejecting blank input.
pub fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank strings collapse to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn validate_price(price: f64) -> Result<f64, ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(price)
}

pub fn validate_year(year: i32) -> Result<i32, ValidationError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::InvalidYear);
    }
    Ok(year)
}

pub fn validate_odometer(odometer: i64) -> Result<i64, ValidationError> {
    if odometer < 0 {
        return Err(ValidationError::NegativeOdometer);
    }
    Ok(odometer)
}

/// Image references must be absolute http(s) URLs with a host, as produced by
/// the asset host the admin panel uploads to. The trimmed input is stored as
/// sent; parsing only checks it.
pub fn validate_image_url(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField("image"));
    }

    let url = Url::parse(value).map_err(|_| ValidationError::InvalidImageUrl(value.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(ValidationError::InvalidImageUrl(value.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidImageUrl(value.to_string()));
    }

    Ok(value.to_string())
}

pub fn validate_image_urls(values: Vec<String>) -> Result<Vec<String>, ValidationError> {
    values.iter().map(|v| validate_image_url(v)).collect()
}

/// Derives the public slug of a blog post from its title.
///
/// The title is transliterated to ASCII (so accents are stripped), lowercased,
/// and every run of characters outside `[a-z0-9]` becomes a single hyphen with
/// no leading or trailing hyphen. The result is stable: deriving a slug from a
/// slug returns it unchanged.
pub fn derive_slug(title: &str) -> Result<String, ValidationError> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        return Err(ValidationError::EmptySlug);
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug_strips_accents_and_punctuation() {
        assert_eq!(derive_slug("Édition Spéciale!").unwrap(), "edition-speciale");
    }

    #[test]
    fn test_derive_slug_collapses_whitespace() {
        assert_eq!(
            derive_slug("  Winter   tyres  for trucks ").unwrap(),
            "winter-tyres-for-trucks"
        );
    }

    #[test]
    fn test_derive_slug_keeps_digits() {
        assert_eq!(derive_slug("Top 10 tractors of 2024").unwrap(), "top-10-tractors-of-2024");
    }

    #[test]
    fn test_derive_slug_is_idempotent() {
        let slug = derive_slug("Entretien : vidange & filtres").unwrap();
        assert_eq!(derive_slug(&slug).unwrap(), slug);
    }

    #[test]
    fn test_derive_slug_rejects_symbol_only_title() {
        assert_eq!(derive_slug("!!! ???"), Err(ValidationError::EmptySlug));
    }

    #[test]
    fn test_derive_slug_rejects_empty_title() {
        assert_eq!(derive_slug(""), Err(ValidationError::EmptySlug));
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("brand", "  Toyota ".to_string()).unwrap(), "Toyota");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        assert_eq!(
            require_text("brand", "   ".to_string()),
            Err(ValidationError::EmptyField("brand"))
        );
    }

    #[test]
    fn test_optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" ok ".to_string())), Some("ok".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(12_500_000.0).is_ok());
        assert_eq!(validate_price(-1.0), Err(ValidationError::InvalidPrice));
        assert_eq!(validate_price(f64::NAN), Err(ValidationError::InvalidPrice));
        assert_eq!(validate_price(f64::INFINITY), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_validate_year_bounds() {
        assert!(validate_year(MIN_YEAR).is_ok());
        assert!(validate_year(MAX_YEAR).is_ok());
        assert_eq!(validate_year(1800), Err(ValidationError::InvalidYear));
        assert_eq!(validate_year(3000), Err(ValidationError::InvalidYear));
    }

    #[test]
    fn test_validate_odometer() {
        assert_eq!(validate_odometer(120_000), Ok(120_000));
        assert_eq!(validate_odometer(-5), Err(ValidationError::NegativeOdometer));
    }

    #[test]
    fn test_validate_image_url_accepts_https() {
        assert_eq!(
            validate_image_url("https://res.cloudinary.com/demo/image/upload/car.jpg").unwrap(),
            "https://res.cloudinary.com/demo/image/upload/car.jpg"
        );
    }

    #[test]
    fn test_validate_image_url_keeps_original_spelling() {
        assert_eq!(
            validate_image_url(" https://Res.Cloudinary.com ").unwrap(),
            "https://Res.Cloudinary.com"
        );
        assert_eq!(
            validate_image_url("https://example.com/my car.jpg").unwrap(),
            "https://example.com/my car.jpg"
        );
    }

    #[test]
    fn test_validate_image_url_rejects_other_schemes() {
        assert!(matches!(
            validate_image_url("ftp://example.com/car.jpg"),
            Err(ValidationError::InvalidImageUrl(_))
        ));
        assert!(matches!(
            validate_image_url("javascript:alert('xss')"),
            Err(ValidationError::InvalidImageUrl(_))
        ));
    }

    #[test]
    fn test_validate_image_url_rejects_relative_path() {
        assert!(matches!(
            validate_image_url("images/car.jpg"),
            Err(ValidationError::InvalidImageUrl(_))
        ));
    }

    #[test]
    fn test_validate_image_url_rejects_blank() {
        assert_eq!(
            validate_image_url("  "),
            Err(ValidationError::EmptyField("image"))
        );
    }
}
