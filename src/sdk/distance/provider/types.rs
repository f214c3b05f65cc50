use serde::Deserialize;

// --- Data Structures for parsing distance matrix responses ---
// Every level is optional: a missing row, element or distance is a
// malformed answer rather than a parse failure.

#[derive(Deserialize, Debug, Default)]
pub struct MatrixResponse {
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub rows: Option<Vec<MatrixRow>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MatrixRow {
    pub elements: Option<Vec<MatrixElement>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MatrixElement {
    pub status: Option<String>,
    pub distance: Option<TextValue>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: Option<f64>,
}

impl MatrixResponse {
    fn first_element(&self) -> Option<&MatrixElement> {
        self.rows.as_ref()?.first()?.elements.as_ref()?.first()
    }

    /// `rows[0].elements[0].distance.text`, if every level is present.
    pub fn first_distance_text(&self) -> Option<&str> {
        self.first_element()?.distance.as_ref()?.text.as_deref()
    }

    /// Short explanation of why no distance text was found, for logs.
    pub fn describe_missing(&self) -> String {
        let api_status = match (&self.status, &self.error_message) {
            (Some(status), Some(msg)) => format!(" (API status {}: {})", status, msg),
            (Some(status), None) => format!(" (API status {})", status),
            _ => String::new(),
        };
        let missing = match self.rows.as_ref().and_then(|rows| rows.first()) {
            None => "no rows",
            Some(row) => match row.elements.as_ref().and_then(|e| e.first()) {
                None => "no elements in first row",
                Some(element) => match &element.status {
                    Some(status) if element.distance.is_none() => {
                        return format!("element status {}{}", status, api_status);
                    }
                    _ => "no distance text in first element",
                },
            },
        };
        format!("{}{}", missing, api_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_distance_text() {
        let body = r#"{
            "destination_addresses": ["Isfahan, Iran"],
            "origin_addresses": ["Tehran, Iran"],
            "rows": [{"elements": [
                {"distance": {"text": "441 km", "value": 441234},
                 "duration": {"text": "5 hours", "value": 18000},
                 "status": "OK"},
                {"distance": {"text": "9 km", "value": 9000}, "status": "OK"}
            ]}],
            "status": "OK"
        }"#;
        let resp: MatrixResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_distance_text(), Some("441 km"));
    }

    #[test]
    fn missing_levels_yield_none() {
        for (body, reason) in [
            (r#"{}"#, "no rows"),
            (r#"{"rows": []}"#, "no rows"),
            (r#"{"rows": [{"elements": []}]}"#, "no elements in first row"),
            (
                r#"{"rows": [{"elements": [{"distance": {"value": 5}}]}]}"#,
                "no distance text in first element",
            ),
            (
                r#"{"rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]}"#,
                "element status ZERO_RESULTS",
            ),
        ] {
            let resp: MatrixResponse = serde_json::from_str(body).unwrap();
            assert_eq!(resp.first_distance_text(), None, "{}", body);
            assert_eq!(resp.describe_missing(), reason);
        }
    }

    #[test]
    fn api_status_is_reported() {
        let body = r#"{"status": "REQUEST_DENIED", "error_message": "Invalid key", "rows": []}"#;
        let resp: MatrixResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.describe_missing(),
            "no rows (API status REQUEST_DENIED: Invalid key)"
        );
    }
}
