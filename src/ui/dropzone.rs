//! Drop payload classification
//!
//! A drop may carry a plain-text payload, a file list, or nothing usable.
//! Text wins when both are present; otherwise every dropped file gets its
//! own conversion.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPayload<F> {
    /// Plain-text payload, converted directly
    Text(String),
    /// One conversion per dropped file
    Files(Vec<F>),
    /// Nothing usable in the drop
    Empty,
}

pub fn classify<F>(text: String, files: Vec<F>) -> DropPayload<F> {
    if !text.is_empty() {
        DropPayload::Text(text)
    } else if !files.is_empty() {
        DropPayload::Files(files)
    } else {
        DropPayload::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_payload_wins() {
        let payload = classify("<score/>".to_string(), vec!["a.xml", "b.xml"]);
        assert_eq!(payload, DropPayload::Text("<score/>".to_string()));
    }

    #[test]
    fn test_files_convert_one_each() {
        let payload = classify(String::new(), vec!["a.xml", "b.xml", "c.xml"]);
        match payload {
            DropPayload::Files(files) => assert_eq!(files.len(), 3),
            other => panic!("expected files, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_drop() {
        let payload = classify::<&str>(String::new(), Vec::new());
        assert_eq!(payload, DropPayload::Empty);
    }
}
