use dicom_core::dictionary::DataDictionary;
use dicom_core::header::Header;
use dicom_core::value::{PrimitiveValue, Value as DicomValue};
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::InMemDicomObject;
use serde_json::{json, Map, Value};

/// Converts a full DICOM dataset into a JSON-serializable mapping
///
/// Each element becomes `{name: {"value": .., "VR": .., "tag": "(gggg,eeee)"}}`
/// where `name` is the dictionary alias of the tag (falling back to the tag's
/// own string form for private or unknown tags). Sequence container elements
/// (VR SQ) are skipped at every nesting level; nested datasets inside
/// sequence values recurse through the same conversion.
pub fn dataset_to_json(dcm: &InMemDicomObject) -> Value {
    let mut out = Map::new();
    for elem in dcm {
        // Skip sequence container elements
        if elem.vr() == VR::SQ {
            continue;
        }
        let tag = elem.tag();
        out.insert(
            tag_name(tag),
            json!({
                "value": element_value(elem.value()),
                "VR": elem.vr().to_string(),
                "tag": format!("({:04x},{:04x})", tag.group(), tag.element()),
            }),
        );
    }
    Value::Object(out)
}

/// Human-readable tag name from the standard dictionary
fn tag_name(tag: Tag) -> String {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias.to_string())
        .unwrap_or_else(|| tag.to_string())
}

/// Converts one element value into a JSON value
fn element_value(
    value: &DicomValue<InMemDicomObject, dicom_object::mem::InMemFragment>,
) -> Value {
    match value {
        DicomValue::Primitive(primitive) => primitive_to_json(primitive),
        DicomValue::Sequence(seq) => {
            Value::Array(seq.items().iter().map(dataset_to_json).collect())
        }
        DicomValue::PixelSequence(seq) => {
            json!(format!("encapsulated pixel data ({} fragments)", seq.fragments().len()))
        }
    }
}

/// Dispatches a primitive value over its closed set of categories:
/// timestamps render as strings, binary decodes best-effort as ASCII,
/// numeric values stay numeric, and everything else coerces to a string.
fn primitive_to_json(primitive: &PrimitiveValue) -> Value {
    match primitive {
        PrimitiveValue::Empty => json!(""),
        PrimitiveValue::Str(s) => json!(s.to_string()),
        PrimitiveValue::Strs(strs) => {
            one_or_many(strs.iter().map(|s| json!(s.to_string())).collect())
        }
        // Byte buffers decode best-effort as ASCII, dropping other bytes
        PrimitiveValue::U8(bytes) => json!(ascii_lossy(bytes)),
        PrimitiveValue::I16(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::U16(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::I32(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::U32(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::I64(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::U64(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::F32(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::F64(vals) => one_or_many(vals.iter().map(|&v| json!(v)).collect()),
        PrimitiveValue::Tags(tags) => one_or_many(
            tags.iter()
                .map(|t| json!(format!("({:04x},{:04x})", t.group(), t.element())))
                .collect(),
        ),
        PrimitiveValue::Date(dates) => {
            one_or_many(dates.iter().map(|d| json!(d.to_string())).collect())
        }
        PrimitiveValue::Time(times) => {
            one_or_many(times.iter().map(|t| json!(t.to_string())).collect())
        }
        PrimitiveValue::DateTime(datetimes) => {
            one_or_many(datetimes.iter().map(|dt| json!(dt.to_string())).collect())
        }
    }
}

/// Single-valued elements serialize as a scalar, multi-valued as an array
fn one_or_many(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.pop().unwrap()
    } else {
        Value::Array(values)
    }
}

/// Best-effort ASCII decode, dropping non-ASCII bytes
fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect()
}
