use crate::{Error, Result};
use run_types::{Candidate, ListingEntry, ResolutionOutcome, ResolutionRequest};

/// The stored favorite, when it may stand in for a search.
///
/// Listing or picking a candidate explicitly always searches, and so does a
/// favorite with no path.
#[must_use]
pub fn favorite_shortcut<'a>(
    request: &ResolutionRequest,
    favorite: Option<&'a str>,
) -> Option<&'a str> {
    if request.list_only || request.has_explicit_option() {
        return None;
    }
    favorite.filter(|path| !path.is_empty())
}

/// Reduce filtered candidates to one path, or a listing in list mode.
///
/// # Errors
///
/// Returns [`Error::InvalidSelection`] when the requested ordinal is past the
/// end of the candidates.
pub fn select(
    candidates: &[Candidate],
    request: &ResolutionRequest,
    favorite: Option<&str>,
) -> Result<ResolutionOutcome> {
    let chosen = request.effective_option();

    if request.list_only {
        return Ok(ResolutionOutcome::Ambiguous(listing(
            candidates, chosen, favorite,
        )));
    }

    usize::try_from(chosen - 1)
        .ok()
        .and_then(|index| candidates.get(index))
        .map(|candidate| ResolutionOutcome::Resolved(candidate.full_path()))
        .ok_or(Error::InvalidSelection(chosen))
}

/// Number every candidate, marking the chosen ordinal and the favorite
#[must_use]
pub fn listing(candidates: &[Candidate], chosen: u32, favorite: Option<&str>) -> Vec<ListingEntry> {
    (1..)
        .zip(candidates)
        .map(|(ordinal, candidate)| ListingEntry {
            ordinal,
            candidate: candidate.clone(),
            chosen: ordinal == chosen,
            is_default: favorite.is_some_and(|path| {
                !path.is_empty() && path.eq_ignore_ascii_case(&candidate.full_path())
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("chrome.exe", r"C:\Apps"),
            Candidate::new("chrome.exe", r"C:\Old"),
        ]
    }

    fn request(chosen_option: u32, list_only: bool) -> ResolutionRequest {
        ResolutionRequest {
            chosen_option,
            list_only,
            ..ResolutionRequest::new("chrome")
        }
    }

    #[test]
    fn test_default_selects_first() {
        let outcome = select(&candidates(), &request(0, false), None).unwrap();
        assert_eq!(
            outcome,
            ResolutionOutcome::Resolved(r"C:\Apps\chrome.exe".to_string())
        );
    }

    #[test]
    fn test_explicit_ordinal() {
        let outcome = select(&candidates(), &request(2, false), None).unwrap();
        assert_eq!(
            outcome,
            ResolutionOutcome::Resolved(r"C:\Old\chrome.exe".to_string())
        );
    }

    #[test]
    fn test_ordinal_past_end_is_invalid() {
        let err = select(&candidates(), &request(3, false), None).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection(3)));
    }

    #[test]
    fn test_list_mode_marks_chosen_and_default() {
        let outcome = select(
            &candidates(),
            &request(2, true),
            Some(r"c:\apps\CHROME.exe"),
        )
        .unwrap();

        let ResolutionOutcome::Ambiguous(entries) = outcome else {
            panic!("expected a listing");
        };
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].chosen);
        assert!(entries[0].is_default);
        assert!(entries[1].chosen);
        assert!(!entries[1].is_default);
    }

    #[test]
    fn test_list_mode_defaults_to_first_chosen() {
        let entries = listing(&candidates(), request(0, true).effective_option(), None);
        assert!(entries[0].chosen);
        assert_eq!(entries[1].ordinal, 2);
    }

    #[test]
    fn test_list_mode_ignores_out_of_range_ordinal() {
        let outcome = select(&candidates(), &request(9, true), None).unwrap();
        let ResolutionOutcome::Ambiguous(entries) = outcome else {
            panic!("expected a listing");
        };
        assert!(entries.iter().all(|entry| !entry.chosen));
    }

    #[test]
    fn test_favorite_shortcut_only_for_plain_requests() {
        let favorite = Some(r"C:\Old\chrome.exe");
        assert_eq!(favorite_shortcut(&request(0, false), favorite), favorite);
        assert_eq!(favorite_shortcut(&request(1, false), favorite), None);
        assert_eq!(favorite_shortcut(&request(0, true), favorite), None);
        assert_eq!(favorite_shortcut(&request(0, false), None), None);
    }

    #[test]
    fn test_empty_favorite_path_is_ignored() {
        assert_eq!(favorite_shortcut(&request(0, false), Some("")), None);

        let entries = listing(&[Candidate::new("", "")], 1, Some(""));
        assert!(!entries[0].is_default);
    }
}
