//! Parser for the `code;xx;xxx;name` response line.
//!
//! Checks run in a fixed order (segment count, code, 2nd, 3rd, 4th segment)
//! and the first failure wins.

use crate::error::{FormatError, LookupError};
use crate::types::CountryInfo;

const SEGMENTS: usize = 4;

/// Classify a raw response body.
///
/// ```
/// use ip2c_core::{parse_country_info, LookupError};
///
/// let info = parse_country_info("1;CA;CAN;Canada").unwrap();
/// assert_eq!(info.full_name(), "Canada");
/// assert!(matches!(parse_country_info("2;;;"), Err(LookupError::Unknown)));
/// ```
pub fn parse_country_info(text: &str) -> Result<CountryInfo, LookupError> {
    let segments: Vec<&str> = text.split(';').collect();
    if segments.len() != SEGMENTS {
        return Err(FormatError::SegmentCount {
            found: segments.len(),
            text: text.to_string(),
        }
        .into());
    }

    match segments[0] {
        "0" => return Err(LookupError::WrongInput),
        "1" => {}
        "2" => return Err(LookupError::Unknown),
        code => {
            return Err(FormatError::Code {
                found: code.to_string(),
                text: text.to_string(),
            }
            .into())
        }
    }

    let two_letter_code = segments[1];
    if two_letter_code.len() != 2 {
        return Err(FormatError::TwoLetterCode {
            found: two_letter_code.len(),
            text: text.to_string(),
        }
        .into());
    }

    let three_letter_code = segments[2];
    if three_letter_code.len() != 3 {
        return Err(FormatError::ThreeLetterCode {
            found: three_letter_code.len(),
            text: text.to_string(),
        }
        .into());
    }

    let full_name = segments[3].trim();
    if full_name.is_empty() {
        return Err(FormatError::BlankName {
            text: text.to_string(),
        }
        .into());
    }

    Ok(CountryInfo::new(two_letter_code, three_letter_code, full_name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_message(text: &str) -> String {
        match parse_country_info(text) {
            Err(err @ LookupError::Format(_)) => err.to_string(),
            other => panic!("expected format error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_success_line() {
        let info = parse_country_info("1;CA;CAN;Canada").unwrap();
        assert_eq!(info.two_letter_code(), "CA");
        assert_eq!(info.three_letter_code(), "CAN");
        assert_eq!(info.full_name(), "Canada");
    }

    #[test]
    fn trims_full_name() {
        let info = parse_country_info("1;US;USA;  United States\n").unwrap();
        assert_eq!(info.full_name(), "United States");
    }

    #[test]
    fn name_may_contain_spaces_and_punctuation() {
        let info = parse_country_info("1;KR;KOR;Korea, Republic of").unwrap();
        assert_eq!(info.full_name(), "Korea, Republic of");
    }

    #[test]
    fn code_zero_is_wrong_input_regardless_of_fields() {
        assert!(matches!(parse_country_info("0;;;"), Err(LookupError::WrongInput)));
        assert!(matches!(
            parse_country_info("0;;;anything"),
            Err(LookupError::WrongInput)
        ));
        assert!(matches!(
            parse_country_info("0;TOOLONG;X;"),
            Err(LookupError::WrongInput)
        ));
    }

    #[test]
    fn code_two_is_unknown_regardless_of_fields() {
        assert!(matches!(parse_country_info("2;;;"), Err(LookupError::Unknown)));
        assert!(matches!(
            parse_country_info("2;;;anything"),
            Err(LookupError::Unknown)
        ));
    }

    #[test]
    fn too_many_segments() {
        assert_eq!(
            format_message("2;;;;Foo"),
            r#"Invalid format. Expected 4 segments but found 5: "2;;;;Foo""#
        );
    }

    #[test]
    fn too_few_segments() {
        assert_eq!(
            format_message("1;CA;CAN"),
            r#"Invalid format. Expected 4 segments but found 3: "1;CA;CAN""#
        );
    }

    #[test]
    fn empty_body_is_one_segment() {
        let err = parse_country_info("").unwrap_err();
        assert!(matches!(
            err,
            LookupError::Format(FormatError::SegmentCount { found: 1, .. })
        ));
    }

    #[test]
    fn invalid_code() {
        assert_eq!(
            format_message("5;CA;CAN;Canada"),
            r#"Invalid format. Expected code of 0, 1, or 2 in 1st segment but found 5: "5;CA;CAN;Canada""#
        );
    }

    #[test]
    fn padded_code_is_not_accepted() {
        let err = parse_country_info(" 1;CA;CAN;Canada").unwrap_err();
        assert!(matches!(
            err,
            LookupError::Format(FormatError::Code { ref found, .. }) if found == " 1"
        ));
        assert!(matches!(
            parse_country_info("01;CA;CAN;Canada"),
            Err(LookupError::Format(FormatError::Code { .. }))
        ));
    }

    #[test]
    fn invalid_two_letter_code() {
        assert_eq!(
            format_message("1;CAN;CAN;Canada"),
            r#"Invalid format. Expected 2 letter code in 2nd segment but found 3: "1;CAN;CAN;Canada""#
        );
    }

    #[test]
    fn invalid_three_letter_code() {
        assert_eq!(
            format_message("1;CA;CA;Canada"),
            r#"Invalid format. Expected 3 letter code in 3rd segment but found 2: "1;CA;CA;Canada""#
        );
    }

    #[test]
    fn blank_full_name() {
        assert_eq!(
            format_message("1;CA;CAN;"),
            r#"Invalid format. Expected full name in 4th segment but found blank: "1;CA;CAN;""#
        );
        assert_eq!(
            format_message("1;CA;CAN;   "),
            r#"Invalid format. Expected full name in 4th segment but found blank: "1;CA;CAN;   ""#
        );
    }

    #[test]
    fn first_failing_check_wins() {
        // Both the 2nd and 3rd segments are wrong; only the 2nd is reported.
        let err = parse_country_info("1;C;CA;").unwrap_err();
        assert!(matches!(
            err,
            LookupError::Format(FormatError::TwoLetterCode { found: 1, .. })
        ));

        // Bad code beats bad fields.
        let err = parse_country_info("9;C;CA;").unwrap_err();
        assert!(matches!(err, LookupError::Format(FormatError::Code { .. })));
    }
}
