// src/services/detector.rs

//! Marker detection on a fetched page.

/// Classifies a page body as "marker present" or "marker absent".
///
/// This is a raw substring test with no HTML parsing or normalization. If the
/// site renames the element, change the configured marker.
#[derive(Debug, Clone)]
pub struct AvailabilityDetector {
    marker: String,
}

impl AvailabilityDetector {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn detect(&self, body: &str) -> bool {
        body.contains(&self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> AvailabilityDetector {
        AvailabilityDetector::new(r#"id="showtimes""#)
    }

    #[test]
    fn test_marker_present() {
        let body = r#"<html><body><section id="showtimes"><ul></ul></section></body></html>"#;
        assert!(detector().detect(body));
    }

    #[test]
    fn test_marker_absent() {
        let body = r#"<html><body><p>Coming soon</p></body></html>"#;
        assert!(!detector().detect(body));
        assert!(!detector().detect(""));
    }

    #[test]
    fn test_no_normalization() {
        assert!(!detector().detect(r#"<div id='showtimes'>"#));
        assert!(!detector().detect(r#"<div ID="showtimes">"#));
        assert!(!detector().detect(r#"<div id = "showtimes">"#));
        assert!(!detector().detect(r#"<div id="showtimes-list">"#));
        let tagged = r#"<div data-x="1" id="showtimes" hidden>"#;
        assert!(detector().detect(tagged));
    }
}
