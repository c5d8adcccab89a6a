// SPDX-License-Identifier: GPL-3.0-or-later

//! Candidate scoring and selection.
//!
//! Scores are small integers so ties are exact; equal scores keep the order
//! the catalog returned them in.

use crate::normalize::{detect_edition_marker, normalize, strip_edition_suffix};
use songlink_domain::CandidateAlbum;
use std::cmp::Reverse;
use tracing::debug;

const EXACT_MATCH: i32 = 50;
const PARTIAL_MATCH: i32 = 25;
const EDITION_PENALTY: i32 = -10;
const BASE_TITLE_BONUS: i32 = 10;

/// How the best candidate is picked.
///
/// Both modes currently pick the top-ranked candidate without prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    Interactive,
    #[default]
    NonInteractive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: CandidateAlbum,
    pub score: i32,
}

pub fn score(candidate: &CandidateAlbum, artist: Option<&str>, album: Option<&str>) -> i32 {
    let input_artist = normalize(artist.unwrap_or_default());
    let input_album = normalize(album.unwrap_or_default());
    let candidate_artist = normalize(candidate.artist());
    let candidate_title = normalize(candidate.title());

    let mut total = match_score(&input_artist, &candidate_artist)
        + match_score(&input_album, &candidate_title);

    if detect_edition_marker(candidate.title()) {
        total += EDITION_PENALTY;
    }

    if !input_album.is_empty() {
        let (base, changed) = strip_edition_suffix(candidate.title());
        if changed && normalize(&base) == input_album {
            total += BASE_TITLE_BONUS;
        }
    }

    total
}

fn match_score(input: &str, target: &str) -> i32 {
    if input.is_empty() {
        0
    } else if input == target {
        EXACT_MATCH
    } else if target.contains(input) {
        PARTIAL_MATCH
    } else {
        0
    }
}

/// Score every candidate and order them best first. Ties keep provider order.
pub fn rank_candidates(
    candidates: Vec<CandidateAlbum>,
    artist: Option<&str>,
    album: Option<&str>,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score(&candidate, artist, album);
            ScoredCandidate { candidate, score }
        })
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|entry| Reverse(entry.score));
    scored
}

pub fn select(
    candidates: Vec<CandidateAlbum>,
    artist: Option<&str>,
    album: Option<&str>,
    mode: SelectionMode,
) -> Option<CandidateAlbum> {
    let ranked = rank_candidates(candidates, artist, album);

    if mode == SelectionMode::Interactive && ranked.len() > 1 {
        debug!(target: "pipeline", "interactive selection unavailable, taking best match");
    }

    ranked.into_iter().next().map(|best| {
        debug!(
            target: "pipeline",
            title = best.candidate.title(),
            score = best.score,
            "candidate selected"
        );
        best.candidate
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, artist: &str, id: u32) -> CandidateAlbum {
        CandidateAlbum::new(title, artist, format!("https://music.apple.com/album/{id}")).unwrap()
    }

    #[test]
    fn test_exact_artist_and_album_score_highest() {
        let plain = candidate("OK Computer", "Radiohead", 1);
        assert_eq!(score(&plain, Some("Radiohead"), Some("OK Computer")), 100);
    }

    #[test]
    fn test_partial_matches() {
        let deluxe = candidate("OK Computer OKNOTOK 1997 2017", "Radiohead & Friends", 1);
        assert_eq!(score(&deluxe, Some("radiohead"), Some("ok computer")), 50);
    }

    #[test]
    fn test_deluxe_edition_is_penalized_but_recognized() {
        let deluxe = candidate("OK Computer (Deluxe)", "Radiohead", 1);
        // +50 artist, +25 album substring, -10 marker, +10 base title match
        assert_eq!(score(&deluxe, Some("Radiohead"), Some("OK Computer")), 75);
    }

    #[test]
    fn test_empty_inputs_contribute_nothing() {
        let only_edition = candidate("(Deluxe)", "Various Artists", 1);
        assert_eq!(score(&only_edition, None, None), -10);
        assert_eq!(score(&only_edition, Some("  "), Some("")), -10);

        let plain = candidate("Kid A", "Radiohead", 2);
        assert_eq!(score(&plain, None, None), 0);
    }

    #[test]
    fn test_exact_matches_never_score_lower() {
        let exact = candidate("Kid A", "Radiohead", 1);
        let near = candidate("Kid A Mnesia", "Radiohead", 2);
        let artist_only = candidate("Amnesiac", "Radiohead", 3);

        let exact_score = score(&exact, Some("Radiohead"), Some("Kid A"));
        assert!(exact_score > score(&near, Some("Radiohead"), Some("Kid A")));
        assert!(exact_score > score(&artist_only, Some("Radiohead"), Some("Kid A")));
    }

    #[test]
    fn test_plain_edition_wins_over_deluxe() {
        let candidates = vec![
            candidate("OK Computer (Deluxe)", "Radiohead", 1),
            candidate("OK Computer", "Radiohead", 2),
        ];

        let chosen = select(
            candidates,
            Some("Radiohead"),
            Some("OK Computer"),
            SelectionMode::NonInteractive,
        )
        .unwrap();
        assert_eq!(chosen.title(), "OK Computer");
    }

    #[test]
    fn test_ties_keep_provider_order() {
        let candidates = vec![
            candidate("Pablo Honey", "Radiohead", 1),
            candidate("The Bends", "Radiohead", 2),
            candidate("Hail to the Thief", "Radiohead", 3),
        ];

        let ranked = rank_candidates(candidates, Some("Radiohead"), None);
        let titles: Vec<&str> = ranked.iter().map(|entry| entry.candidate.title()).collect();
        assert_eq!(titles, vec!["Pablo Honey", "The Bends", "Hail to the Thief"]);
        assert!(ranked.iter().all(|entry| entry.score == 50));
    }

    #[test]
    fn test_select_empty_is_none() {
        assert_eq!(
            select(Vec::new(), Some("Radiohead"), None, SelectionMode::Interactive),
            None
        );
    }

    #[test]
    fn test_modes_pick_the_same_candidate() {
        let candidates = vec![
            candidate("Amnesiac", "Radiohead", 1),
            candidate("Kid A", "Radiohead", 2),
        ];

        let interactive = select(
            candidates.clone(),
            Some("Radiohead"),
            Some("Kid A"),
            SelectionMode::Interactive,
        );
        let automatic = select(
            candidates,
            Some("Radiohead"),
            Some("Kid A"),
            SelectionMode::NonInteractive,
        );
        assert_eq!(interactive, automatic);
        assert_eq!(automatic.unwrap().title(), "Kid A");
    }
}
