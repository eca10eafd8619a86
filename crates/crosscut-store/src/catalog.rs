//! Question and segment catalog loading
//!
//! Question files are either a bare JSON array or an object with a
//! `questions` array. Segment files follow the same shape with a
//! `segments` key; each file kind accepts only its own key.

use crate::errors::{file_not_found, invalid_input, io_error, parse_error, Result};
use crosscut_core::model::{Catalog, Question, SegmentSpec};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A listing file: a bare array or an object holding the array under
/// the key that names its own kind
trait Listing: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionListing {
    Bare(Vec<Question>),
    Wrapped(QuestionFile),
}

impl Listing for QuestionListing {
    type Item = Question;

    fn into_items(self) -> Vec<Question> {
        match self {
            QuestionListing::Bare(questions) => questions,
            QuestionListing::Wrapped(file) => file.questions,
        }
    }
}

#[derive(Deserialize)]
struct SegmentFile {
    segments: Vec<SegmentSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentListing {
    Bare(Vec<SegmentSpec>),
    Wrapped(SegmentFile),
}

impl Listing for SegmentListing {
    type Item = SegmentSpec;

    fn into_items(self) -> Vec<SegmentSpec> {
        match self {
            SegmentListing::Bare(segments) => segments,
            SegmentListing::Wrapped(file) => file.segments,
        }
    }
}

/// Load a catalog from a questions file and an optional segments file
///
/// # Errors
///
/// - `Io`: a file is missing or unreadable
/// - `Serialization`: a file is not valid JSON for its listing
/// - `InvalidInput`: duplicate question or segment ids
pub fn load_catalog(questions_path: &Path, segments_path: Option<&Path>) -> Result<Catalog> {
    let questions = read_listing::<QuestionListing>("load_questions", questions_path)?;
    let segments = match segments_path {
        Some(path) => read_listing::<SegmentListing>("load_segments", path)?,
        None => Vec::new(),
    };

    parse_catalog(questions, segments)
}

/// Parse a questions listing from JSON text
///
/// # Errors
///
/// `InvalidInput` if the text is not a question listing.
pub fn parse_questions_str(content: &str) -> Result<Vec<Question>> {
    parse_listing_str::<QuestionListing>("parse_questions", content)
}

/// Parse a segments listing from JSON text
///
/// # Errors
///
/// `InvalidInput` if the text is not a segment listing, including an
/// object that holds its array under `questions`.
pub fn parse_segments_str(content: &str) -> Result<Vec<SegmentSpec>> {
    parse_listing_str::<SegmentListing>("parse_segments", content)
}

fn parse_listing_str<L: Listing>(operation: &str, content: &str) -> Result<Vec<L::Item>> {
    let listing: L = serde_json::from_str(content)
        .map_err(|e| invalid_input(operation, &format!("JSON parse error: {}", e)))?;
    Ok(listing.into_items())
}

fn read_listing<L: Listing>(operation: &str, path: &Path) -> Result<Vec<L::Item>> {
    if !path.exists() {
        return Err(file_not_found(operation, path));
    }
    let content = fs::read_to_string(path).map_err(|e| io_error(operation, path, e))?;
    let listing: L =
        serde_json::from_str(&content).map_err(|e| parse_error(operation, path, e))?;
    let items = listing.into_items();

    tracing::debug!(path = %path.display(), count = items.len(), "read catalog listing");
    Ok(items)
}

fn parse_catalog(questions: Vec<Question>, segments: Vec<SegmentSpec>) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for question in questions {
        if catalog.questions.contains_key(&question.question_id) {
            return Err(invalid_input(
                "load_catalog",
                &format!("Duplicate question id: {}", question.question_id),
            ));
        }
        catalog.add_question(question);
    }

    for segment in segments {
        if catalog.segments.contains_key(&segment.segment_id) {
            return Err(invalid_input(
                "load_catalog",
                &format!("Duplicate segment id: {}", segment.segment_id),
            ));
        }
        catalog.add_segment(segment);
    }

    Ok(catalog)
}
