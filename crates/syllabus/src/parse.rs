//! Single-line record parsing.
//!
//! One source line is `identifier,title[,prereq1,prereq2,...]` with no
//! quoting or escaping (titles must not contain commas). The parser is pure:
//! it never sees line numbers or the summary. The orchestrator attaches the
//! line number when it converts a [`ParseDefect`] into a `MissingField`
//! issue.

use crate::course::Course;
use crate::normalize::normalize;

/// Structural defect in one source line. The `Display` text is what lands
/// in the `MissingField` issue detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDefect {
    /// Fewer than two comma-separated fields.
    #[error("missing course identifier or title")]
    TooFewFields,

    /// Identifier field was empty after normalization.
    #[error("empty course identifier")]
    EmptyIdentifier,

    /// Title field was empty after trimming.
    #[error("empty course title for {0}")]
    EmptyTitle(String),
}

/// Parse one raw line into a candidate course.
///
/// Returns `Ok(None)` for blank or whitespace-only lines (silently skipped,
/// no candidate, no issue). Empty prerequisite fields — trailing commas and
/// the like — are dropped without complaint.
///
/// # Errors
///
/// Returns a [`ParseDefect`] when the line has fewer than two fields, an
/// empty identifier, or an empty title; no candidate is produced.
pub fn parse_line(line: &str) -> Result<Option<Course>, ParseDefect> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 2 {
        return Err(ParseDefect::TooFewFields);
    }

    let identifier = normalize(fields[0]);
    if identifier.is_empty() {
        return Err(ParseDefect::EmptyIdentifier);
    }

    let title = fields[1].trim().to_string();
    if title.is_empty() {
        return Err(ParseDefect::EmptyTitle(identifier));
    }

    let prerequisites: Vec<String> = fields[2..]
        .iter()
        .map(|field| normalize(field))
        .filter(|p| !p.is_empty())
        .collect();

    Ok(Some(Course {
        identifier,
        title,
        prerequisites,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped_silently() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t  "), Ok(None));
    }

    #[test]
    fn minimal_record_has_no_prereqs() {
        let course = parse_line("CSCI100,Introduction to Computer Science")
            .expect("parses")
            .expect("not blank");
        assert_eq!(course.identifier, "CSCI100");
        assert_eq!(course.title, "Introduction to Computer Science");
        assert!(course.prerequisites.is_empty());
    }

    #[test]
    fn identifier_and_prereqs_are_normalized() {
        let course = parse_line("  csci 300 , Advanced Topics , csci 200 , math201 ")
            .expect("parses")
            .expect("not blank");
        assert_eq!(course.identifier, "CSCI300");
        assert_eq!(course.title, "Advanced Topics");
        assert_eq!(course.prerequisites, vec!["CSCI200", "MATH201"]);
    }

    #[test]
    fn prereq_order_is_source_order() {
        let course = parse_line("CSCI400,Capstone,MATH201,CSCI301,CSCI350")
            .expect("parses")
            .expect("not blank");
        assert_eq!(course.prerequisites, vec!["MATH201", "CSCI301", "CSCI350"]);
    }

    #[test]
    fn trailing_and_empty_prereq_fields_dropped() {
        let course = parse_line("CSCI200,Data Structures,CSCI100,,  ,")
            .expect("parses")
            .expect("not blank");
        assert_eq!(course.prerequisites, vec!["CSCI100"]);
    }

    #[test]
    fn single_field_is_too_few() {
        assert_eq!(parse_line("CSCI100"), Err(ParseDefect::TooFewFields));
    }

    #[test]
    fn empty_identifier_rejected() {
        assert_eq!(
            parse_line("  ,Some Title"),
            Err(ParseDefect::EmptyIdentifier)
        );
    }

    #[test]
    fn empty_title_rejected_and_names_the_course() {
        let defect = parse_line("CSCI100,  ").expect_err("empty title");
        assert_eq!(defect, ParseDefect::EmptyTitle("CSCI100".to_string()));
        assert_eq!(defect.to_string(), "empty course title for CSCI100");
    }
}
