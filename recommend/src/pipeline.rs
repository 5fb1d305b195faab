use serde::{Deserialize, Serialize};
use singfit_catalog::{Catalog, Gender, SongEntry};
use singfit_index::SimilarityHit;
use singfit_pitch::VocalRange;

use crate::genre;

/// Gender constraint on candidate singers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderFilter {
    #[default]
    Any,
    Only(Gender),
}

/// Genre constraint on candidate songs, as a user-facing label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreFilter {
    #[default]
    Any,
    Label(String),
}

/// Inclusive release-year window. Songs without a year always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    fn admits(&self, year: Option<i32>) -> bool {
        match year {
            Some(y) => self.start <= y && y <= self.end,
            None => true,
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 1900,
            end: 2100,
        }
    }
}

/// Everything the pipeline needs besides the catalog and ranked singers.
#[derive(Debug, Clone, Default)]
pub struct RecommendRequest {
    /// `None` when pitch estimation failed; the range filter is skipped.
    pub vocal_range: Option<VocalRange>,
    pub gender: GenderFilter,
    pub genre: GenreFilter,
    pub years: YearRange,
    /// Symmetric semitone slack applied to the range filter.
    pub tolerance: i32,
}

/// The best-matching singer, carried with the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestMatch {
    pub singer_id: String,
    pub name: String,
}

/// The pipeline's output. Never an error: empty `songs` is a valid result.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Rank-1 singer after the gender stage; `None` only for empty input.
    pub best_match: Option<BestMatch>,
    /// Echo of the (possibly unavailable) user range.
    pub vocal_range: Option<VocalRange>,
    /// Titles of all qualifying songs from the first singer that has any.
    pub songs: Vec<String>,
    /// The full similarity ranking, for display.
    pub ranked: Vec<RankedSinger>,
}

/// One entry of the display ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSinger {
    pub singer_id: String,
    /// Cosine similarity in `[-1, 1]`.
    pub score: f32,
}

/// Runs the recommendation stages in order: gender, best-match, song scan.
///
/// Candidate singers are walked in rank order; the first singer with at
/// least one qualifying song contributes all their qualifying songs and the
/// scan stops there. Lower-ranked singers are never mixed in, even when
/// their songs would fit better.
pub fn recommend(
    catalog: &Catalog,
    hits: &[SimilarityHit],
    request: &RecommendRequest,
) -> Recommendation {
    let candidates = gender_stage(catalog, hits, request.gender);
    let best_match = candidates.first().map(|h| BestMatch {
        singer_id: h.singer_id.clone(),
        // Fall back to the id for profiles without a display name record.
        name: catalog
            .singer(&h.singer_id)
            .map_or_else(|| h.singer_id.clone(), |s| s.name.clone()),
    });

    let mut songs = Vec::new();
    for hit in &candidates {
        let qualifying: Vec<&SongEntry> = catalog
            .songs_for(&hit.singer_id)
            .iter()
            .filter(|song| song_qualifies(song, request))
            .collect();
        if !qualifying.is_empty() {
            songs = qualifying.iter().map(|s| s.title.clone()).collect();
            break;
        }
    }

    Recommendation {
        best_match,
        vocal_range: request.vocal_range,
        songs,
        ranked: hits
            .iter()
            .map(|h| RankedSinger {
                singer_id: h.singer_id.clone(),
                score: h.score,
            })
            .collect(),
    }
}

/// Applies the gender filter, keeping rank order.
///
/// Singers with missing gender metadata pass a gender filter. If filtering
/// would empty the list, the unfiltered ranking is used instead.
fn gender_stage(
    catalog: &Catalog,
    hits: &[SimilarityHit],
    filter: GenderFilter,
) -> Vec<SimilarityHit> {
    let wanted = match filter {
        GenderFilter::Any => return hits.to_vec(),
        GenderFilter::Only(g) => g,
    };
    let kept: Vec<SimilarityHit> = hits
        .iter()
        .filter(|h| {
            catalog
                .singer(&h.singer_id)
                .is_none_or(|s| s.gender.is_none_or(|g| g == wanted))
        })
        .cloned()
        .collect();
    if kept.is_empty() { hits.to_vec() } else { kept }
}

fn song_qualifies(song: &SongEntry, request: &RecommendRequest) -> bool {
    if !request.years.admits(song.release_year) {
        return false;
    }

    if let GenreFilter::Label(label) = &request.genre {
        let tags = song.genre_tags.iter().chain(song.predicted_tags.iter());
        if !genre::matches_label(label, tags) {
            return false;
        }
    }

    if let Some(range) = request.vocal_range {
        let (Some(low), Some(high)) = (song.lowest_semitone(), song.highest_semitone()) else {
            // Can't verify coverage without parseable notes.
            return false;
        };
        if !range.covers(low, high, request.tolerance) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use singfit_catalog::SingerProfile;
    use std::collections::HashMap;

    fn song(title: &str, low: &str, high: &str, tags: &[&str], year: Option<i32>) -> SongEntry {
        SongEntry {
            title: title.into(),
            lowest_note: low.into(),
            highest_note: high.into(),
            genre_tags: tags.iter().map(|t| t.to_string()).collect(),
            predicted_tags: vec![],
            release_year: year,
        }
    }

    fn catalog() -> Catalog {
        let singers = vec![
            SingerProfile {
                id: "s1".into(),
                name: "One".into(),
                embedding: vec![1.0, 0.0],
                gender: Some(Gender::Female),
            },
            SingerProfile {
                id: "s2".into(),
                name: "Two".into(),
                embedding: vec![0.0, 1.0],
                gender: Some(Gender::Male),
            },
            SingerProfile {
                id: "s3".into(),
                name: "Three".into(),
                embedding: vec![0.7, 0.7],
                gender: None,
            },
        ];
        let mut songs = HashMap::new();
        songs.insert(
            "s1".to_string(),
            vec![
                song("High Anthem", "C4", "C6", &["rock"], Some(2010)),
                song("Easy Tune", "C3", "A4", &["ballad"], Some(1995)),
            ],
        );
        songs.insert(
            "s2".to_string(),
            vec![song("Mid Song", "C3", "C5", &["pop", "rock"], None)],
        );
        Catalog::new(singers, songs).unwrap()
    }

    fn best_id(rec: &Recommendation) -> Option<&str> {
        rec.best_match.as_ref().map(|b| b.singer_id.as_str())
    }

    fn hits() -> Vec<SimilarityHit> {
        vec![
            SimilarityHit {
                singer_id: "s1".into(),
                score: 0.95,
            },
            SimilarityHit {
                singer_id: "s2".into(),
                score: 0.80,
            },
            SimilarityHit {
                singer_id: "s3".into(),
                score: 0.50,
            },
        ]
    }

    #[test]
    fn test_degraded_mode_skips_range_filter() {
        // No range, no genre, wide years: everything from s1 qualifies.
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            years: YearRange::new(1980, 2025),
            tolerance: 2,
            ..Default::default()
        });
        assert_eq!(best_id(&rec), Some("s1"));
        assert_eq!(rec.songs, vec!["High Anthem", "Easy Tune"]);
        assert_eq!(rec.ranked.len(), 3);
        assert!(rec.vocal_range.is_none());
    }

    #[test]
    fn test_range_filter_with_tolerance() {
        // User C3..C5 (48..72). s1's "High Anthem" tops at C6, out of reach;
        // "Easy Tune" (C3..A4) fits.
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            vocal_range: Some(VocalRange::new(48, 72)),
            tolerance: 2,
            ..Default::default()
        });
        assert_eq!(rec.songs, vec!["Easy Tune"]);
    }

    #[test]
    fn test_tolerance_boundary() {
        // Song B2..D5 (47..74) vs user 48..72: passes at T=2, fails at T=0.
        let mut songs = HashMap::new();
        songs.insert(
            "s1".to_string(),
            vec![song("Edge Case", "B2", "D5", &[], None)],
        );
        let catalog = Catalog::new(catalog().singers().to_vec(), songs).unwrap();

        let base = RecommendRequest {
            vocal_range: Some(VocalRange::new(48, 72)),
            ..Default::default()
        };
        let pass = recommend(&catalog, &hits(), &RecommendRequest {
            tolerance: 2,
            ..base.clone()
        });
        assert_eq!(pass.songs, vec!["Edge Case"]);

        let fail = recommend(&catalog, &hits(), &RecommendRequest {
            tolerance: 0,
            ..base
        });
        assert!(fail.songs.is_empty());
    }

    #[test]
    fn test_first_fit_singer_fallthrough() {
        // s1 has no rock song in range; scan falls through to s2 and stops.
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            vocal_range: Some(VocalRange::new(48, 72)),
            genre: GenreFilter::Label("록".into()),
            tolerance: 2,
            ..Default::default()
        });
        assert_eq!(best_id(&rec), Some("s1"));
        assert_eq!(rec.songs, vec!["Mid Song"]);
    }

    #[test]
    fn test_genre_filter() {
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            genre: GenreFilter::Label("록".into()),
            ..Default::default()
        });
        // s1's rock song qualifies; the ballad does not.
        assert_eq!(rec.songs, vec!["High Anthem"]);
    }

    #[test]
    fn test_gender_filter_keeps_missing_gender() {
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            gender: GenderFilter::Only(Gender::Male),
            ..Default::default()
        });
        // s1 (female) drops; s2 (male) and s3 (unlabeled) stay.
        assert_eq!(best_id(&rec), Some("s2"));
    }

    #[test]
    fn test_gender_filter_never_empties() {
        // All-female ranking under a male filter falls back to unfiltered.
        let only_s1 = vec![SimilarityHit {
            singer_id: "s1".into(),
            score: 0.9,
        }];
        let rec = recommend(&catalog(), &only_s1, &RecommendRequest {
            gender: GenderFilter::Only(Gender::Male),
            ..Default::default()
        });
        assert_eq!(best_id(&rec), Some("s1"));
    }

    #[test]
    fn test_year_filter() {
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            years: YearRange::new(2000, 2025),
            ..Default::default()
        });
        // "Easy Tune" (1995) is out; "Mid Song" has no year and would pass,
        // but s1 still has a qualifying song so the scan stops at s1.
        assert_eq!(rec.songs, vec!["High Anthem"]);
    }

    #[test]
    fn test_no_qualifying_songs_is_not_an_error() {
        let rec = recommend(&catalog(), &hits(), &RecommendRequest {
            genre: GenreFilter::Label("트로트".into()),
            ..Default::default()
        });
        assert_eq!(best_id(&rec), Some("s1"));
        assert!(rec.songs.is_empty());
        assert_eq!(rec.ranked.len(), 3);
    }

    #[test]
    fn test_singer_without_songs_skipped() {
        // s3 ranked first but has no catalog songs.
        let mut ranked = hits();
        ranked.rotate_right(1);
        assert_eq!(ranked[0].singer_id, "s3");
        let rec = recommend(&catalog(), &ranked, &RecommendRequest::default());
        assert_eq!(best_id(&rec), Some("s3"));
        assert_eq!(rec.songs, vec!["High Anthem", "Easy Tune"]);
    }

    #[test]
    fn test_best_match_carries_display_name() {
        let rec = recommend(&catalog(), &hits(), &RecommendRequest::default());
        let best = rec.best_match.unwrap();
        assert_eq!(best.singer_id, "s1");
        assert_eq!(best.name, "One");
    }

    #[test]
    fn test_empty_ranking() {
        let rec = recommend(&catalog(), &[], &RecommendRequest::default());
        assert!(rec.best_match.is_none());
        assert!(rec.songs.is_empty());
        assert!(rec.ranked.is_empty());
    }

    #[test]
    fn test_unparseable_notes_fail_range_filter() {
        let mut songs = HashMap::new();
        songs.insert(
            "s1".to_string(),
            vec![song("Mystery", "??", "??", &[], None)],
        );
        let catalog = Catalog::new(catalog().singers().to_vec(), songs).unwrap();

        let with_range = recommend(&catalog, &hits(), &RecommendRequest {
            vocal_range: Some(VocalRange::new(48, 72)),
            tolerance: 2,
            ..Default::default()
        });
        assert!(with_range.songs.is_empty());

        // Without a range the filter is skipped and the song passes.
        let degraded = recommend(&catalog, &hits(), &RecommendRequest::default());
        assert_eq!(degraded.songs, vec!["Mystery"]);
    }
}
