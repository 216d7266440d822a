//! Firestore typed-value wire format.

use serde_json::{Map, Number, Value, json};

use crate::domain::ports::{Fields, StoreError};

pub(super) fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    Value::Object(encoded)
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // int64 travels as a decimal string.
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub(super) fn decode_fields(fields: Option<&Value>) -> Result<Fields, StoreError> {
    let Some(fields) = fields else {
        return Ok(Fields::new());
    };
    let Value::Object(map) = fields else {
        return Err(StoreError::Malformed("document fields is not an object".to_owned()));
    };
    map.iter()
        .map(|(k, v)| decode_value(v).map(|v| (k.clone(), v)))
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|m| m.iter().next()) else {
        return Err(StoreError::Malformed(format!("not a typed value: {value}")));
    };
    let malformed = || StoreError::Malformed(format!("bad {kind}: {inner}"));
    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool).ok_or_else(malformed),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(|i| Value::Number(i.into()))
            .ok_or_else(malformed),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(malformed),
        "stringValue" | "timestampValue" | "referenceValue" => {
            inner.as_str().map(|s| Value::String(s.to_owned())).ok_or_else(malformed)
        }
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map_or(Ok(Vec::new()), |items| items.iter().map(decode_value).collect())
            .map(Value::Array),
        "mapValue" => decode_fields(inner.get("fields")).map(Value::Object),
        // geoPointValue, bytesValue and future kinds stay typed. Text fields holding them fail validation.
        _ => Ok(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_and_numbers_survive_the_wire_format() {
        let Value::Object(fields) = json!({
            "name": "Tank",
            "count": 3,
            "ratio": 0.5,
            "open": true,
            "note": null
        }) else {
            unreachable!()
        };
        let wire = encode_fields(&fields);
        assert_eq!(wire["name"], json!({ "stringValue": "Tank" }));
        assert_eq!(wire["count"], json!({ "integerValue": "3" }));
        assert_eq!(decode_fields(Some(&wire)).unwrap(), fields);
    }

    #[test]
    fn missing_fields_decode_to_empty() {
        assert!(decode_fields(None).unwrap().is_empty());
    }

    #[test]
    fn value_kinds_without_a_json_form_stay_typed() {
        let wire = json!({
            "plusCode": { "geoPointValue": { "latitude": 12.9, "longitude": 77.5 } },
            "photo": { "bytesValue": "aGk=" }
        });
        let fields = decode_fields(Some(&wire)).unwrap();
        assert_eq!(fields["plusCode"], wire["plusCode"]);
        assert_eq!(fields["photo"], json!({ "bytesValue": "aGk=" }));
    }

    #[test]
    fn untyped_value_is_malformed() {
        let wire = json!({ "name": "plain" });
        assert!(matches!(
            decode_fields(Some(&wire)),
            Err(StoreError::Malformed(_))
        ));
    }
}
