//! Field/value coercion engine
//!
//! Translates runtime [`FieldValue`]s to wire [`CellValue`]s and back, driven
//! by each field's declared column type. The legal (runtime kind × declared
//! type) pairs are enumerated exhaustively below; everything else is a
//! configuration error on write.
//!
//! Decode policy: a cell that cannot be coerced into its field nulls that
//! field with a warning and never aborts the rest of the row. Primary keys
//! are the exception on the write path, where any degraded value fails the
//! whole mutation.

use crate::error::{Result, StoreError};
use crate::remote::types::PrimaryKeyValue;
use crate::schema::FieldSchema;
use crate::value::{CellValue, ColumnType, FieldValue};

fn illegal(value: &FieldValue, field: &FieldSchema) -> StoreError {
    StoreError::config(format!(
        "field '{}': cannot store a {} value as a {:?} column",
        field.name,
        value.kind(),
        field.column_type
    ))
}

/// Encode a runtime value into a wire cell.
///
/// `Ok(None)` means the value degraded to absent (compression or charset
/// failure); the caller drops the column. `Err` is a hard configuration
/// error: an illegal pairing or an unparseable explicit coercion.
pub fn encode_column(value: &FieldValue, field: &FieldSchema) -> Result<Option<CellValue>> {
    let declared = field.column_type;
    match value {
        FieldValue::Bytes(bytes) => match declared {
            ColumnType::None | ColumnType::Binary => {
                Ok(field.compressor.compress(bytes).map(CellValue::Binary))
            }
            ColumnType::String => {
                let Some(packed) = field.compressor.compress(bytes) else {
                    return Ok(None);
                };
                match String::from_utf8(packed) {
                    Ok(text) => Ok(Some(CellValue::String(text))),
                    Err(_) => {
                        tracing::warn!(
                            field = %field.name,
                            "compressed bytes are not valid UTF-8, dropping column"
                        );
                        Ok(None)
                    }
                }
            }
            _ => Err(illegal(value, field)),
        },
        FieldValue::Integer(v) => match declared {
            ColumnType::None | ColumnType::Integer => Ok(Some(CellValue::Integer(*v))),
            ColumnType::String => Ok(Some(CellValue::String(v.to_string()))),
            ColumnType::Double => Ok(Some(CellValue::Double(*v as f64))),
            _ => Err(illegal(value, field)),
        },
        FieldValue::Float(v) => match declared {
            ColumnType::None | ColumnType::Double => Ok(Some(CellValue::Double(*v))),
            ColumnType::String => Ok(Some(CellValue::String(v.to_string()))),
            _ => Err(illegal(value, field)),
        },
        FieldValue::Boolean(v) => match declared {
            ColumnType::None | ColumnType::Boolean => Ok(Some(CellValue::Boolean(*v))),
            ColumnType::String => Ok(Some(CellValue::String(v.to_string()))),
            _ => Err(illegal(value, field)),
        },
        FieldValue::String(s) => match declared {
            ColumnType::None | ColumnType::String => Ok(Some(CellValue::String(s.clone()))),
            ColumnType::Integer => s.parse::<i64>().map(CellValue::Integer).map(Some).map_err(
                |_| {
                    StoreError::config(format!(
                        "field '{}': cannot parse '{}' as an integer",
                        field.name, s
                    ))
                },
            ),
            ColumnType::Double => s.parse::<f64>().map(CellValue::Double).map(Some).map_err(
                |_| {
                    StoreError::config(format!(
                        "field '{}': cannot parse '{}' as a double",
                        field.name, s
                    ))
                },
            ),
            ColumnType::Boolean => s.parse::<bool>().map(CellValue::Boolean).map(Some).map_err(
                |_| {
                    StoreError::config(format!(
                        "field '{}': cannot parse '{}' as a boolean",
                        field.name, s
                    ))
                },
            ),
            ColumnType::Binary => Ok(field
                .compressor
                .compress(s.as_bytes())
                .map(CellValue::Binary)),
        },
        FieldValue::Structured(v) => match declared {
            ColumnType::None | ColumnType::String => Ok(Some(CellValue::String(v.to_string()))),
            _ => Err(illegal(value, field)),
        },
    }
}

/// Encode a runtime value into a primary-key component.
///
/// Key coercion has no degraded form: any failure fails the whole row. The
/// store only keys on integers, strings, and binary, so boolean/double cells
/// (and empty strings) are rejected here.
pub fn encode_key(value: &FieldValue, field: &FieldSchema) -> Result<PrimaryKeyValue> {
    let cell = encode_column(value, field)?.ok_or_else(|| {
        StoreError::config(format!(
            "primary key config error, primary column: {}",
            field.name
        ))
    })?;
    match cell {
        CellValue::Integer(v) => Ok(PrimaryKeyValue::Integer(v)),
        CellValue::Binary(b) => Ok(PrimaryKeyValue::Binary(b)),
        CellValue::String(s) if !s.is_empty() => Ok(PrimaryKeyValue::String(s)),
        _ => Err(StoreError::config(format!(
            "primary key config error, primary column: {}",
            field.name
        ))),
    }
}

/// Decode a wire cell back into a runtime value.
///
/// Returns `None` (and logs) when the cell cannot be coerced; the field is
/// left absent and the rest of the row survives.
pub fn decode_column(cell: &CellValue, field: &FieldSchema) -> Option<FieldValue> {
    match cell {
        CellValue::Binary(bytes) => {
            let Some(raw) = field.compressor.uncompress(bytes) else {
                tracing::warn!(field = %field.name, "uncompress failed, nulling field");
                return None;
            };
            if field.column_type == ColumnType::String {
                match String::from_utf8(raw) {
                    Ok(text) => Some(FieldValue::String(text)),
                    Err(_) => {
                        tracing::warn!(
                            field = %field.name,
                            "binary cell is not valid UTF-8, nulling field"
                        );
                        None
                    }
                }
            } else {
                Some(FieldValue::Bytes(raw))
            }
        }
        CellValue::Integer(v) => Some(FieldValue::Integer(*v)),
        CellValue::Double(v) => Some(FieldValue::Float(*v)),
        CellValue::Boolean(v) => Some(FieldValue::Boolean(*v)),
        CellValue::String(s) => {
            if field.column_type == ColumnType::Binary {
                // Mirror of the string-through-bytes write path
                match field.compressor.uncompress(s.as_bytes()) {
                    Some(raw) => Some(FieldValue::Bytes(raw)),
                    None => {
                        tracing::warn!(field = %field.name, "uncompress failed, nulling field");
                        None
                    }
                }
            } else {
                Some(FieldValue::String(s.clone()))
            }
        }
    }
}

/// Decode a primary-key component. Sentinels carry no value.
pub fn decode_key(value: &PrimaryKeyValue) -> Option<FieldValue> {
    match value {
        PrimaryKeyValue::Integer(v) => Some(FieldValue::Integer(*v)),
        PrimaryKeyValue::String(s) => Some(FieldValue::String(s.clone())),
        PrimaryKeyValue::Binary(b) => Some(FieldValue::Bytes(b.clone())),
        PrimaryKeyValue::InfMin | PrimaryKeyValue::InfMax | PrimaryKeyValue::AutoIncrement => None,
    }
}

/// Infer a wire cell from a runtime value, with no declared-type coercion and
/// no compression. This is the dynamic-column write path: the value is stored
/// with its self-reported logical type.
pub fn infer_cell(value: &FieldValue) -> CellValue {
    match value {
        FieldValue::Bytes(b) => CellValue::Binary(b.clone()),
        FieldValue::Integer(v) => CellValue::Integer(*v),
        FieldValue::Float(v) => CellValue::Double(*v),
        FieldValue::Boolean(v) => CellValue::Boolean(*v),
        FieldValue::String(s) => CellValue::String(s.clone()),
        FieldValue::Structured(v) => CellValue::String(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::Gzip;

    fn field(declared: ColumnType) -> FieldSchema {
        FieldSchema::new("f", declared)
    }

    fn encode(value: impl Into<FieldValue>, declared: ColumnType) -> Result<Option<CellValue>> {
        encode_column(&value.into(), &field(declared))
    }

    // =========================================================================
    // Encode: bytes row of the coercion table
    // =========================================================================

    #[test]
    fn test_encode_bytes_inferred_and_binary() {
        let cell = encode(vec![1u8, 2, 3], ColumnType::None).unwrap().unwrap();
        assert_eq!(cell, CellValue::Binary(vec![1, 2, 3]));
        let cell = encode(vec![1u8, 2, 3], ColumnType::Binary).unwrap().unwrap();
        assert_eq!(cell, CellValue::Binary(vec![1, 2, 3]));
    }

    #[test]
    fn test_encode_bytes_as_string_charset_decode() {
        let cell = encode(b"hello".as_slice(), ColumnType::String)
            .unwrap()
            .unwrap();
        assert_eq!(cell, CellValue::String("hello".to_string()));
    }

    #[test]
    fn test_encode_bytes_as_string_invalid_utf8_degrades() {
        let result = encode(vec![0xffu8, 0xfe], ColumnType::String).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_encode_bytes_illegal_pairings() {
        assert!(encode(vec![1u8], ColumnType::Integer).is_err());
        assert!(encode(vec![1u8], ColumnType::Double).is_err());
        assert!(encode(vec![1u8], ColumnType::Boolean).is_err());
    }

    // =========================================================================
    // Encode: integer row
    // =========================================================================

    #[test]
    fn test_encode_integer_pairings() {
        assert_eq!(
            encode(7i64, ColumnType::None).unwrap().unwrap(),
            CellValue::Integer(7)
        );
        assert_eq!(
            encode(7i64, ColumnType::Integer).unwrap().unwrap(),
            CellValue::Integer(7)
        );
        assert_eq!(
            encode(7i64, ColumnType::String).unwrap().unwrap(),
            CellValue::String("7".to_string())
        );
        assert_eq!(
            encode(7i64, ColumnType::Double).unwrap().unwrap(),
            CellValue::Double(7.0)
        );
        assert!(encode(7i64, ColumnType::Boolean).is_err());
        assert!(encode(7i64, ColumnType::Binary).is_err());
    }

    // =========================================================================
    // Encode: float row
    // =========================================================================

    #[test]
    fn test_encode_float_pairings() {
        assert_eq!(
            encode(1.5f64, ColumnType::None).unwrap().unwrap(),
            CellValue::Double(1.5)
        );
        assert_eq!(
            encode(1.5f64, ColumnType::Double).unwrap().unwrap(),
            CellValue::Double(1.5)
        );
        assert_eq!(
            encode(1.5f64, ColumnType::String).unwrap().unwrap(),
            CellValue::String("1.5".to_string())
        );
        assert!(encode(1.5f64, ColumnType::Integer).is_err());
        assert!(encode(1.5f64, ColumnType::Boolean).is_err());
        assert!(encode(1.5f64, ColumnType::Binary).is_err());
    }

    // =========================================================================
    // Encode: boolean row
    // =========================================================================

    #[test]
    fn test_encode_boolean_pairings() {
        assert_eq!(
            encode(true, ColumnType::None).unwrap().unwrap(),
            CellValue::Boolean(true)
        );
        assert_eq!(
            encode(true, ColumnType::Boolean).unwrap().unwrap(),
            CellValue::Boolean(true)
        );
        assert_eq!(
            encode(true, ColumnType::String).unwrap().unwrap(),
            CellValue::String("true".to_string())
        );
        assert!(encode(true, ColumnType::Integer).is_err());
        assert!(encode(true, ColumnType::Double).is_err());
        assert!(encode(true, ColumnType::Binary).is_err());
    }

    // =========================================================================
    // Encode: string row
    // =========================================================================

    #[test]
    fn test_encode_string_pairings() {
        assert_eq!(
            encode("abc", ColumnType::None).unwrap().unwrap(),
            CellValue::String("abc".to_string())
        );
        assert_eq!(
            encode("abc", ColumnType::String).unwrap().unwrap(),
            CellValue::String("abc".to_string())
        );
        assert_eq!(
            encode("42", ColumnType::Integer).unwrap().unwrap(),
            CellValue::Integer(42)
        );
        assert_eq!(
            encode("1.5", ColumnType::Double).unwrap().unwrap(),
            CellValue::Double(1.5)
        );
        assert_eq!(
            encode("true", ColumnType::Boolean).unwrap().unwrap(),
            CellValue::Boolean(true)
        );
        assert_eq!(
            encode("abc", ColumnType::Binary).unwrap().unwrap(),
            CellValue::Binary(b"abc".to_vec())
        );
    }

    #[test]
    fn test_encode_string_parse_failures_are_config_errors() {
        assert!(encode("not a number", ColumnType::Integer).is_err());
        assert!(encode("not a number", ColumnType::Double).is_err());
        assert!(encode("maybe", ColumnType::Boolean).is_err());
    }

    // =========================================================================
    // Encode: structured row
    // =========================================================================

    #[test]
    fn test_encode_structured_json_fallback() {
        let value = FieldValue::Structured(serde_json::json!({"a": 1}));
        let cell = encode_column(&value, &field(ColumnType::None))
            .unwrap()
            .unwrap();
        assert_eq!(cell, CellValue::String("{\"a\":1}".to_string()));
        let cell = encode_column(&value, &field(ColumnType::String))
            .unwrap()
            .unwrap();
        assert_eq!(cell, CellValue::String("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_encode_structured_illegal_pairings() {
        let value = FieldValue::Structured(serde_json::json!([1, 2]));
        for declared in [
            ColumnType::Integer,
            ColumnType::Double,
            ColumnType::Boolean,
            ColumnType::Binary,
        ] {
            assert!(encode_column(&value, &field(declared)).is_err());
        }
    }

    // =========================================================================
    // Compression path
    // =========================================================================

    #[test]
    fn test_binary_compression_round_trip() {
        let descriptor = FieldSchema::new("payload", ColumnType::Binary).compress(Gzip);
        let original = b"some payload worth compressing, repeated repeated repeated".to_vec();
        let cell = encode_column(&FieldValue::Bytes(original.clone()), &descriptor)
            .unwrap()
            .unwrap();
        match &cell {
            CellValue::Binary(stored) => assert_ne!(stored, &original),
            other => panic!("Expected Binary cell, got {:?}", other),
        }
        let decoded = decode_column(&cell, &descriptor).unwrap();
        assert_eq!(decoded, FieldValue::Bytes(original));
    }

    #[test]
    fn test_decode_corrupt_compressed_cell_nulls_field() {
        let descriptor = FieldSchema::new("payload", ColumnType::Binary).compress(Gzip);
        let cell = CellValue::Binary(b"garbage".to_vec());
        assert!(decode_column(&cell, &descriptor).is_none());
    }

    #[test]
    fn test_string_through_binary_round_trip() {
        let descriptor = FieldSchema::new("note", ColumnType::Binary).compress(Gzip);
        let cell = encode_column(&FieldValue::String("hello".to_string()), &descriptor)
            .unwrap()
            .unwrap();
        assert!(matches!(cell, CellValue::Binary(_)));
        let decoded = decode_column(&cell, &descriptor).unwrap();
        assert_eq!(decoded, FieldValue::Bytes(b"hello".to_vec()));
    }

    // =========================================================================
    // Round trips over the legal table
    // =========================================================================

    #[test]
    fn test_round_trip_inferred_types() {
        let cases: Vec<FieldValue> = vec![
            FieldValue::Bytes(vec![9, 8, 7]),
            FieldValue::Integer(-42),
            FieldValue::Float(2.75),
            FieldValue::Boolean(true),
            FieldValue::String("round trip".to_string()),
        ];
        for original in cases {
            let descriptor = field(ColumnType::None);
            let cell = encode_column(&original, &descriptor).unwrap().unwrap();
            let decoded = decode_column(&cell, &descriptor).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_round_trip_structured_value() {
        let original = FieldValue::Structured(serde_json::json!({"k": [1, 2, 3]}));
        let descriptor = field(ColumnType::String);
        let cell = encode_column(&original, &descriptor).unwrap().unwrap();
        let decoded = decode_column(&cell, &descriptor).unwrap();
        // Structured values come back as JSON strings; parsing is the record
        // getter's job.
        assert_eq!(
            decoded,
            FieldValue::String("{\"k\":[1,2,3]}".to_string())
        );
    }

    // =========================================================================
    // Primary-key coercion
    // =========================================================================

    #[test]
    fn test_encode_key_supported_types() {
        assert_eq!(
            encode_key(&FieldValue::Integer(7), &field(ColumnType::Integer)).unwrap(),
            PrimaryKeyValue::Integer(7)
        );
        assert_eq!(
            encode_key(&FieldValue::String("k".to_string()), &field(ColumnType::String)).unwrap(),
            PrimaryKeyValue::String("k".to_string())
        );
        assert_eq!(
            encode_key(&FieldValue::Bytes(vec![1]), &field(ColumnType::Binary)).unwrap(),
            PrimaryKeyValue::Binary(vec![1])
        );
    }

    #[test]
    fn test_encode_key_structured_becomes_json_string() {
        let value = FieldValue::Structured(serde_json::json!([1, 2]));
        assert_eq!(
            encode_key(&value, &field(ColumnType::None)).unwrap(),
            PrimaryKeyValue::String("[1,2]".to_string())
        );
    }

    #[test]
    fn test_encode_key_rejects_unsupported_cells() {
        assert!(encode_key(&FieldValue::Float(1.5), &field(ColumnType::None)).is_err());
        assert!(encode_key(&FieldValue::Boolean(true), &field(ColumnType::None)).is_err());
        assert!(encode_key(&FieldValue::String(String::new()), &field(ColumnType::None)).is_err());
    }

    #[test]
    fn test_decode_key_values() {
        assert_eq!(
            decode_key(&PrimaryKeyValue::Integer(7)),
            Some(FieldValue::Integer(7))
        );
        assert_eq!(
            decode_key(&PrimaryKeyValue::String("k".to_string())),
            Some(FieldValue::String("k".to_string()))
        );
        assert_eq!(
            decode_key(&PrimaryKeyValue::Binary(vec![1])),
            Some(FieldValue::Bytes(vec![1]))
        );
        assert_eq!(decode_key(&PrimaryKeyValue::InfMin), None);
        assert_eq!(decode_key(&PrimaryKeyValue::AutoIncrement), None);
    }

    // =========================================================================
    // Dynamic-column inference
    // =========================================================================

    #[test]
    fn test_infer_cell_types() {
        assert_eq!(
            infer_cell(&FieldValue::Bytes(vec![1])),
            CellValue::Binary(vec![1])
        );
        assert_eq!(infer_cell(&FieldValue::Integer(1)), CellValue::Integer(1));
        assert_eq!(infer_cell(&FieldValue::Float(1.5)), CellValue::Double(1.5));
        assert_eq!(
            infer_cell(&FieldValue::Boolean(true)),
            CellValue::Boolean(true)
        );
        assert_eq!(
            infer_cell(&FieldValue::String("s".to_string())),
            CellValue::String("s".to_string())
        );
        assert_eq!(
            infer_cell(&FieldValue::Structured(serde_json::json!([1]))),
            CellValue::String("[1]".to_string())
        );
    }
}
