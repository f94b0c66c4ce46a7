//! Domain-age service response parsing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::config::WHOIS_CREATED_DATE_FORMAT;
use crate::error_handling::LookupFailure;

#[derive(Debug, Deserialize)]
struct WhoisServiceResponse {
    #[serde(rename = "WhoisRecord")]
    whois_record: Option<WhoisRecord>,
}

#[derive(Debug, Deserialize)]
struct WhoisRecord {
    #[serde(rename = "createdDate")]
    created_date: Option<String>,
}

/// Extracts `WhoisRecord.createdDate` from a service response body.
///
/// Only the exact `YYYY-MM-DDTHH:MM:SSZ` layout is accepted.
pub(crate) fn parse_created_date(body: &str) -> Result<DateTime<Utc>, LookupFailure> {
    let response: WhoisServiceResponse = serde_json::from_str(body)
        .map_err(|e| LookupFailure::Response(format!("invalid JSON: {e}")))?;

    let created = response
        .whois_record
        .and_then(|record| record.created_date)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LookupFailure::Response("no creation date returned".to_string()))?;

    NaiveDateTime::parse_from_str(&created, WHOIS_CREATED_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| LookupFailure::Response(format!("unparseable creation date {created:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_created_date() {
        let body = r#"{"WhoisRecord": {"createdDate": "1995-08-14T04:00:00Z", "domainName": "example.com"}}"#;
        let created = parse_created_date(body).expect("should parse");
        assert_eq!(created, Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_created_date() {
        let body = r#"{"WhoisRecord": {"domainName": "example.com"}}"#;
        assert!(matches!(
            parse_created_date(body),
            Err(LookupFailure::Response(_))
        ));
    }

    #[test]
    fn test_missing_whois_record() {
        let body = r#"{"ErrorMessage": {"errorCode": "APIKEY_INVALID"}}"#;
        assert!(matches!(
            parse_created_date(body),
            Err(LookupFailure::Response(_))
        ));
    }

    #[test]
    fn test_empty_created_date() {
        let body = r#"{"WhoisRecord": {"createdDate": ""}}"#;
        assert!(matches!(
            parse_created_date(body),
            Err(LookupFailure::Response(_))
        ));
    }

    #[test]
    fn test_other_timestamp_layouts_are_rejected() {
        for created in [
            "1995-08-14T04:00:00+0000",
            "1995-08-14 04:00:00",
            "1995-08-14",
            "14-Aug-1995",
        ] {
            let body = format!(r#"{{"WhoisRecord": {{"createdDate": "{created}"}}}}"#);
            assert!(
                parse_created_date(&body).is_err(),
                "{created} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_json_body() {
        assert!(matches!(
            parse_created_date("<html>502 Bad Gateway</html>"),
            Err(LookupFailure::Response(_))
        ));
    }

    #[test]
    fn test_wrong_json_shape() {
        assert!(parse_created_date(r#"[1, 2, 3]"#).is_err());
        assert!(parse_created_date(r#"{"WhoisRecord": "nope"}"#).is_err());
    }
}
