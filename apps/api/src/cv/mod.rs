// CV auto-fill: uploaded PDF/DOCX -> flat text -> draft candidate record.
// Nothing here persists anything; the draft goes back to the profile form
// for the candidate to correct.

pub mod dictionaries;
pub mod document;
pub mod draft;
pub mod extractor;
pub mod handlers;
pub mod ingest;
pub mod prefill;
pub mod segmenter;
pub mod suggestions;

#[cfg(test)]
pub(crate) mod test_fixtures;
