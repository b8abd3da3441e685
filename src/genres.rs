//! Genre vocabulary and normalization
//!
//! The curated genre list readers pick their favorites from. Matching in the
//! scoring pipeline is case-insensitive, so every comparison goes through
//! [`normalize_genre`] rather than raw string equality.

/// Popular book genres offered during reader onboarding
pub const GENRES: &[&str] = &[
    "Fiction",
    "Fantasy",
    "Science Fiction",
    "Mystery",
    "Thriller",
    "Romance",
    "Contemporary",
    "Historical Fiction",
    "Horror",
    "Young Adult",
    "Non-Fiction",
    "Biography",
    "Self-Help",
    "Business",
    "History",
    "Philosophy",
    "Poetry",
    "Graphic Novels",
    "Manga",
    "Classics",
];

/// Canonical lowercase form used for all genre comparisons
pub fn normalize_genre(genre: &str) -> String {
    genre.trim().to_lowercase()
}

/// Whether a genre belongs to the curated vocabulary (case-insensitive).
/// Free-form genres from external catalogs still score; this only tells
/// collaborators whether the value came from onboarding.
pub fn is_known_genre(genre: &str) -> bool {
    let normalized = normalize_genre(genre);
    GENRES.iter().any(|g| normalize_genre(g) == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_genre("  Science Fiction "), "science fiction");
    }

    #[test]
    fn test_known_genre_case_insensitive() {
        assert!(is_known_genre("fantasy"));
        assert!(is_known_genre("GRAPHIC NOVELS"));
        assert!(!is_known_genre("cyberpunk noir"));
    }
}
