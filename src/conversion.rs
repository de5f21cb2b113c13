use chrono::{NaiveDate, NaiveTime};
use mongodb::bson::{Bson, DateTime};
use num::traits::NumCast;

use crate::error::ParseError;
use crate::schema::{Field, FieldType};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl Field {
    /// Coerce one raw column into its BSON value. The text is used verbatim.
    pub fn coerce(&self, raw: &str) -> Result<Bson, ParseError> {
        match self.dtype {
            FieldType::String => Ok(Bson::String(raw.to_owned())),
            FieldType::Integer => {
                raw.parse::<i32>()
                    .map(Bson::Int32)
                    .map_err(|_| ParseError::InvalidInteger {
                        field: self.name,
                        value: raw.to_owned(),
                    })
            }
            FieldType::Decimal => {
                raw.parse::<f64>()
                    .map(Bson::Double)
                    .map_err(|_| ParseError::InvalidDecimal {
                        field: self.name,
                        value: raw.to_owned(),
                    })
            }
            FieldType::Date => parse_date(raw)
                .map(Bson::DateTime)
                .ok_or_else(|| ParseError::InvalidDate {
                    field: self.name,
                    value: raw.to_owned(),
                }),
        }
    }
}

/// Calendar day at midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    let millis = date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    Some(DateTime::from_millis(millis))
}

/// Numeric view of a BSON value; mongo may answer `$sum` with any width.
pub fn deserialize_number<T: NumCast>(value: &Bson) -> Option<T> {
    match value {
        Bson::Double(num) => num::traits::cast::<f64, T>(*num),
        Bson::Int32(num) => num::traits::cast::<i32, T>(*num),
        Bson::Int64(num) => num::traits::cast::<i64, T>(*num),
        Bson::Boolean(b) => num::traits::cast::<i32, T>(*b as i32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordKind;

    fn order_field(name: &str) -> Field {
        let schema = RecordKind::Order.schema();
        schema.fields()[schema.index_of(name).unwrap()]
    }

    #[test]
    fn strings_are_not_trimmed() {
        let f = order_field("o_comment");
        assert_eq!(f.coerce("  padded ").unwrap(), Bson::String("  padded ".into()));
    }

    #[test]
    fn integers_and_decimals() {
        assert_eq!(order_field("o_orderkey").coerce("42").unwrap(), Bson::Int32(42));
        assert_eq!(
            order_field("o_totalprice").coerce("173665.47").unwrap(),
            Bson::Double(173665.47)
        );
    }

    #[test]
    fn non_numeric_integer_is_rejected() {
        let err = order_field("o_shippriority").coerce("x1").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidInteger {
                field: "o_shippriority",
                value: "x1".into()
            }
        );
        // whitespace is not stripped before parsing
        assert!(order_field("o_orderkey").coerce(" 1").is_err());
    }

    #[test]
    fn date_is_midnight_utc() {
        let v = order_field("o_orderdate").coerce("1970-01-02").unwrap();
        assert_eq!(v, Bson::DateTime(DateTime::from_millis(86_400_000)));
    }

    #[test]
    fn date_in_wrong_format_is_rejected() {
        for raw in ["02/01/1996", "1996-13-01", "1996-02-30", ""] {
            assert!(matches!(
                order_field("o_orderdate").coerce(raw),
                Err(ParseError::InvalidDate { .. })
            ));
        }
    }

    #[test]
    fn numbers_from_any_width() {
        assert_eq!(deserialize_number::<i64>(&Bson::Int32(2)), Some(2));
        assert_eq!(deserialize_number::<i64>(&Bson::Int64(7)), Some(7));
        assert_eq!(deserialize_number::<i64>(&Bson::Double(3.0)), Some(3));
        assert_eq!(deserialize_number::<i64>(&Bson::String("3".into())), None);
    }
}
