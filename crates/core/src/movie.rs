//! Movie record types and the full/partial validation rules.
//!
//! Both validation modes share the same per-field rules. Full validation
//! (create) requires every field except `poster` and defaults `rate`;
//! partial validation (update) makes every field optional. Unknown keys are
//! rejected in both modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::validation::{
    as_object, optional_field, reject_unknown_fields, required_field, ValidationErrors,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rate assigned on create when the payload omits it.
pub const DEFAULT_RATE: i32 = 5;

/// Every key a movie payload may carry.
pub const MOVIE_FIELDS: [&str; 7] = [
    "title", "year", "genre", "rate", "director", "duration", "poster",
];

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

/// The fixed set of genre tags a movie may be labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Drama,
    Adventure,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Crime,
    Comedy,
    Fantasy,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Action,
        Genre::Drama,
        Genre::Adventure,
        Genre::SciFi,
        Genre::Crime,
        Genre::Comedy,
        Genre::Fantasy,
    ];

    /// The wire tag, as stored and as accepted in payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Drama => "Drama",
            Genre::Adventure => "Adventure",
            Genre::SciFi => "Sci-Fi",
            Genre::Crime => "Crime",
            Genre::Comedy => "Comedy",
            Genre::Fantasy => "Fantasy",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A fully validated movie, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewMovie {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(range(min = 1900, max = 2050, message = "year must be between 1900 and 2050"))]
    pub year: i32,
    pub genre: Vec<Genre>,
    #[validate(range(min = 0, max = 10, message = "rate must be between 0 and 10"))]
    pub rate: i32,
    #[validate(length(min = 1, message = "director must not be empty"))]
    pub director: String,
    #[validate(range(min = 15, max = 999, message = "duration must be between 15 and 999"))]
    pub duration: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "poster must be a valid URL"))]
    pub poster: Option<String>,
}

/// A partially validated movie: only the fields the client submitted.
///
/// Absent fields are skipped on serialization so the patch can be used
/// directly as a `$set` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1900, max = 2050, message = "year must be between 1900 and 2050"))]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 10, message = "rate must be between 0 and 10"))]
    pub rate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "director must not be empty"))]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 15, max = 999, message = "duration must be between 15 and 999"))]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "poster must be a valid URL"))]
    pub poster: Option<String>,
}

impl MoviePatch {
    /// `true` when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self == &MoviePatch::default()
    }
}

/// A stored movie together with its database-assigned identifier.
///
/// The identifier is the 24-character hex form and is exposed as `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub year: i32,
    pub genre: Vec<Genre>,
    pub rate: i32,
    pub director: String,
    pub duration: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl Movie {
    pub fn from_new(id: impl Into<String>, movie: NewMovie) -> Self {
        Self {
            id: id.into(),
            title: movie.title,
            year: movie.year,
            genre: movie.genre,
            rate: movie.rate,
            director: movie.director,
            duration: movie.duration,
            poster: movie.poster,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &MoviePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(director) = &patch.director {
            self.director = director.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(poster) = &patch.poster {
            self.poster = Some(poster.clone());
        }
    }

    /// Case-insensitive substring match against any of the movie's genre tags.
    pub fn matches_genre(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.genre
            .iter()
            .any(|g| g.as_str().to_lowercase().contains(&needle))
    }
}

// ---------------------------------------------------------------------------
// Validation entry points
// ---------------------------------------------------------------------------

/// Validate a create payload against the full schema.
///
/// On success the returned record has `rate` defaulted to [`DEFAULT_RATE`]
/// when the payload omitted it.
pub fn validate_movie(input: &Value) -> Result<NewMovie, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(obj) = as_object(input, &mut errors) else {
        return Err(errors);
    };
    reject_unknown_fields(obj, &MOVIE_FIELDS, &mut errors);

    let title = required_field::<String>(obj, "title", &mut errors);
    let year = required_field::<i32>(obj, "year", &mut errors);
    let genre = required_field::<Vec<Genre>>(obj, "genre", &mut errors);
    let rate = optional_field::<i32>(obj, "rate", &mut errors);
    let director = required_field::<String>(obj, "director", &mut errors);
    let duration = required_field::<i32>(obj, "duration", &mut errors);
    let poster = optional_field::<String>(obj, "poster", &mut errors);

    // Failed fields get in-range placeholders so the rule checks still run
    // over everything that was present.
    let movie = NewMovie {
        title: title.unwrap_or_default(),
        year: year.unwrap_or(1900),
        genre: genre.unwrap_or_default(),
        rate: rate.unwrap_or(DEFAULT_RATE),
        director: director.unwrap_or_default(),
        duration: duration.unwrap_or(15),
        poster,
    };
    errors.merge_rules(movie.validate());
    errors.into_result(movie)
}

/// Validate an update payload against the partial schema.
///
/// An empty object is valid and yields an empty patch.
pub fn validate_movie_patch(input: &Value) -> Result<MoviePatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(obj) = as_object(input, &mut errors) else {
        return Err(errors);
    };
    reject_unknown_fields(obj, &MOVIE_FIELDS, &mut errors);

    let patch = MoviePatch {
        title: optional_field(obj, "title", &mut errors),
        year: optional_field(obj, "year", &mut errors),
        genre: optional_field(obj, "genre", &mut errors),
        rate: optional_field(obj, "rate", &mut errors),
        director: optional_field(obj, "director", &mut errors),
        duration: optional_field(obj, "duration", &mut errors),
        poster: optional_field(obj, "poster", &mut errors),
    };
    errors.merge_rules(patch.validate());
    errors.into_result(patch)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn dune() -> Value {
        json!({
            "title": "Dune",
            "year": 2021,
            "genre": ["Sci-Fi"],
            "director": "Villeneuve",
            "duration": 155
        })
    }

    fn stored_dune() -> Movie {
        Movie::from_new("65f0c0ffee0000000000beef", validate_movie(&dune()).unwrap())
    }

    fn with(mut base: Value, key: &str, value: Value) -> Value {
        base[key] = value;
        base
    }

    // -- validate_movie ------------------------------------------------------

    #[test]
    fn valid_payload_defaults_rate() {
        let movie = validate_movie(&dune()).unwrap();
        assert_eq!(movie.rate, DEFAULT_RATE);
        assert_eq!(movie.genre, vec![Genre::SciFi]);
        assert_eq!(movie.poster, None);
    }

    #[test]
    fn explicit_rate_is_kept() {
        let movie = validate_movie(&with(dune(), "rate", json!(0))).unwrap();
        assert_eq!(movie.rate, 0);
    }

    #[test]
    fn rejects_rate_above_ten() {
        let errors = validate_movie(&with(dune(), "rate", json!(11))).unwrap_err();
        assert!(errors.has_field("rate"));
        assert_eq!(errors.violations()[0].code, "range");
    }

    #[test]
    fn rejects_missing_title() {
        let mut payload = dune();
        payload.as_object_mut().unwrap().remove("title");

        let errors = validate_movie(&payload).unwrap_err();
        assert_matches!(
            errors.violations(),
            [v] if v.field == "title" && v.code == "required"
        );
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = validate_movie(&json!({})).unwrap_err();
        for field in ["title", "year", "genre", "director", "duration"] {
            assert!(errors.has_field(field), "missing violation for {field}");
        }
        assert!(!errors.has_field("rate"));
        assert!(!errors.has_field("poster"));
    }

    #[test]
    fn missing_field_does_not_hide_range_violations() {
        let errors = validate_movie(&json!({
            "year": 3000,
            "rate": 11,
            "genre": ["Sci-Fi"],
            "director": "X",
            "duration": 100
        }))
        .unwrap_err();

        let fields: Vec<(&str, &str)> = errors
            .violations()
            .iter()
            .map(|v| (v.field.as_str(), v.code.as_str()))
            .collect();
        assert_eq!(fields, vec![("title", "required"), ("rate", "range"), ("year", "range")]);
    }

    #[test]
    fn wrong_type_does_not_hide_range_violations() {
        let payload = with(with(dune(), "rate", json!("x")), "year", json!(3000));
        let errors = validate_movie(&payload).unwrap_err();

        assert_eq!(errors.violations().len(), 2);
        assert_matches!(
            errors.violations(),
            [rate, year] if rate.field == "rate" && rate.code == "invalid_type"
                && year.field == "year" && year.code == "range"
        );
    }

    #[test]
    fn rejects_unknown_genre() {
        let errors = validate_movie(&with(dune(), "genre", json!(["Horror"]))).unwrap_err();
        assert!(errors.has_field("genre"));
    }

    #[test]
    fn genre_tags_are_case_sensitive() {
        assert!(validate_movie(&with(dune(), "genre", json!(["drama"]))).is_err());
    }

    #[test]
    fn accepts_every_known_genre() {
        let all: Vec<&str> = Genre::ALL.iter().map(|g| g.as_str()).collect();
        let movie = validate_movie(&with(dune(), "genre", json!(all))).unwrap();
        assert_eq!(movie.genre.len(), Genre::ALL.len());
    }

    #[test]
    fn rejects_year_out_of_range() {
        assert!(validate_movie(&with(dune(), "year", json!(1899))).is_err());
        assert!(validate_movie(&with(dune(), "year", json!(2051))).is_err());
        assert!(validate_movie(&with(dune(), "year", json!(1900))).is_ok());
        assert!(validate_movie(&with(dune(), "year", json!(2050))).is_ok());
    }

    #[test]
    fn rejects_fractional_year() {
        let errors = validate_movie(&with(dune(), "year", json!(2021.5))).unwrap_err();
        assert_eq!(errors.violations()[0].code, "invalid_type");
    }

    #[test]
    fn rejects_numeric_string() {
        assert!(validate_movie(&with(dune(), "duration", json!("155"))).is_err());
    }

    #[test]
    fn rejects_duration_out_of_range() {
        assert!(validate_movie(&with(dune(), "duration", json!(14))).is_err());
        assert!(validate_movie(&with(dune(), "duration", json!(1000))).is_err());
        assert!(validate_movie(&with(dune(), "duration", json!(15))).is_ok());
        assert!(validate_movie(&with(dune(), "duration", json!(999))).is_ok());
    }

    #[test]
    fn rejects_empty_title_and_director() {
        let payload = with(with(dune(), "title", json!("")), "director", json!(""));
        let errors = validate_movie(&payload).unwrap_err();
        assert!(errors.has_field("title"));
        assert!(errors.has_field("director"));
    }

    #[test]
    fn poster_must_be_a_url() {
        assert!(validate_movie(&with(dune(), "poster", json!("not a url"))).is_err());

        let movie = validate_movie(&with(
            dune(),
            "poster",
            json!("https://example.com/dune.jpg"),
        ))
        .unwrap();
        assert_eq!(movie.poster.as_deref(), Some("https://example.com/dune.jpg"));
    }

    #[test]
    fn rejects_unknown_field() {
        let errors = validate_movie(&with(dune(), "budget", json!(165))).unwrap_err();
        assert_matches!(
            errors.violations(),
            [v] if v.field == "budget" && v.code == "unrecognized_key"
        );
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(validate_movie(&json!("Dune")).is_err());
        assert!(validate_movie(&Value::Null).is_err());
    }

    // -- validate_movie_patch ------------------------------------------------

    #[test]
    fn empty_patch_is_valid() {
        let patch = validate_movie_patch(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_keeps_only_submitted_fields() {
        let patch = validate_movie_patch(&json!({"duration": 120})).unwrap();
        assert_eq!(patch.duration, Some(120));
        assert_eq!(patch.rate, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_applies_same_field_rules() {
        assert!(validate_movie_patch(&json!({"rate": 11})).is_err());
        assert!(validate_movie_patch(&json!({"year": 1800})).is_err());
        assert!(validate_movie_patch(&json!({"title": ""})).is_err());
        assert!(validate_movie_patch(&json!({"genre": ["Western"]})).is_err());
        assert!(validate_movie_patch(&json!({"poster": "nope"})).is_err());
    }

    #[test]
    fn patch_reports_type_and_range_violations_together() {
        let errors = validate_movie_patch(&json!({"rate": "x", "year": 3000})).unwrap_err();
        assert!(errors.has_field("rate"));
        assert!(errors.has_field("year"));
    }

    #[test]
    fn patch_rejects_unknown_field() {
        let errors = validate_movie_patch(&json!({"studio": "Legendary"})).unwrap_err();
        assert!(errors.has_field("studio"));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = validate_movie_patch(&json!({"duration": 120})).unwrap();
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"duration": 120}));
    }

    // -- Movie ---------------------------------------------------------------

    #[test]
    fn apply_changes_only_patched_fields() {
        let mut movie = stored_dune();
        let before = movie.clone();

        movie.apply(&MoviePatch {
            duration: Some(120),
            ..Default::default()
        });

        assert_eq!(movie.duration, 120);
        assert_eq!(movie.title, before.title);
        assert_eq!(movie.genre, before.genre);
        assert_eq!(movie.rate, before.rate);
    }

    #[test]
    fn matches_genre_case_insensitive_substring() {
        let movie = stored_dune();
        assert!(movie.matches_genre("sci"));
        assert!(movie.matches_genre("SCI-FI"));
        assert!(!movie.matches_genre("drama"));
    }

    #[test]
    fn movie_serializes_identifier_as_underscore_id() {
        let movie = stored_dune();
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["_id"], "65f0c0ffee0000000000beef");
        assert_eq!(json["genre"], json!(["Sci-Fi"]));
        assert!(json.get("poster").is_none());
    }
}
