//! List filtering for the teacher and student views.

use crate::types::SubmissionRecord;
use std::collections::BTreeSet;

/// Subject value that means "no subject filter".
pub const ALL_SUBJECTS: &str = "All";

/// Case-insensitive substring search over student name, roll number and
/// submission id. A blank query keeps everything.
pub fn search<'a, R: SubmissionRecord>(records: &'a [R], query: &str) -> Vec<&'a R> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| {
            [r.student_name(), r.roll_no(), r.submission_id()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Exact subject filter. `None`, a blank value or [`ALL_SUBJECTS`] keep everything.
pub fn by_subject<'a, R: SubmissionRecord>(records: &'a [R], subject: Option<&str>) -> Vec<&'a R> {
    match subject.map(str::trim) {
        None | Some("") | Some(ALL_SUBJECTS) => records.iter().collect(),
        Some(wanted) => records.iter().filter(|r| r.subject() == wanted).collect(),
    }
}

/// Distinct subjects, sorted.
pub fn unique_subjects<R: SubmissionRecord>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.subject().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
