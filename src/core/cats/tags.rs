// Tag suggestions for the cat selection card.
//
// The image API knows thousands of tags; the card only shows a handful. The sample
// always contains what the user already picked plus a few crowd favourites, and is
// topped up with random picks from the vocabulary.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::phrases::generate_curious_phrase;
use crate::core::captions::capitalize;

/// Tags that are always offered.
pub const DEFAULT_TAGS: [&str; 4] = ["cute", "kitten", "orange", "small"];

/// Users need to type this much before the multi-select queries suggestions.
pub const MIN_QUERY_LENGTH: u32 = 2;

/// One option of the tag multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub phrase: String,
}

/// Everything the card needs to render the tag input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChoices {
    pub items: Vec<TagChoice>,
    pub max_selected: u32,
    pub min_query_length: u32,
}

/// Samples `desired_count` tags.
///
/// The seed is `already_selected` followed by [`DEFAULT_TAGS`], deduplicated
/// case-insensitively. A seed longer than `desired_count` is cut by position.
/// Random vocabulary entries not yet present are then added until the count is
/// reached or the vocabulary runs out. The result is sorted.
pub fn sample_tags<R: Rng + ?Sized>(
    vocabulary: &[String],
    desired_count: usize,
    already_selected: &[String],
    rng: &mut R,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut sample: Vec<String> = Vec::new();

    let seed = already_selected
        .iter()
        .map(String::as_str)
        .chain(DEFAULT_TAGS.iter().copied());
    for tag in seed {
        if seen.insert(tag.to_lowercase()) {
            sample.push(tag.to_string());
        }
    }

    sample.truncate(desired_count);

    if sample.len() < desired_count {
        let mut candidates: Vec<&String> = vocabulary.iter().collect();
        candidates.shuffle(rng);

        for candidate in candidates {
            if sample.len() >= desired_count {
                break;
            }
            if seen.insert(candidate.to_lowercase()) {
                sample.push(candidate.clone());
            }
        }
    }

    sample.sort();
    sample
}

/// Samples tags and decorates them for the multi-select input.
///
/// `desired_count` grows to fit every already-selected tag.
pub fn build_tag_choices<R: Rng + ?Sized>(
    vocabulary: &[String],
    desired_count: usize,
    already_selected: &[String],
    rng: &mut R,
) -> TagChoices {
    let desired_count = desired_count.max(already_selected.len());
    let sample = sample_tags(vocabulary, desired_count, already_selected, rng);

    let items = sample
        .into_iter()
        .map(|tag| TagChoice {
            label: capitalize(&tag),
            selected: already_selected.contains(&tag),
            phrase: generate_curious_phrase(rng),
            value: tag,
        })
        .collect();

    let max_selected = (desired_count / 4).max(1).max(already_selected.len());

    TagChoices {
        items,
        max_selected: max_selected as u32,
        min_query_length: MIN_QUERY_LENGTH,
    }
}
