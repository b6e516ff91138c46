//! Response body decoding: JSON first, with an XML fallback.
//!
//! Every request asks for `output=json`, but the place-info endpoint can
//! answer with XML regardless. The fallback triggers on JSON parse failure,
//! never on the declared content type.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::Error;

/// Decodes a response body into a generic nested mapping.
pub(crate) fn decode(body: &str) -> Result<Value, Error> {
    let json = match serde_json::from_str(body) {
        Ok(value) => return Ok(value),
        Err(json) => json,
    };
    // A body with no XML elements parses to an empty document; treat it as
    // undecodable rather than an empty success.
    match xml_to_value(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(Value::Object(map)),
        Ok(_) => {
            tracing::error!("body is neither JSON ({json}) nor an XML document");
            Err(Error::Decode { json, xml: None })
        }
        Err(xml) => {
            tracing::error!("body decoded as neither JSON ({json}) nor XML ({xml})");
            Err(Error::Decode { json, xml: Some(xml) })
        }
    }
}

/// Parses an XML document into the nested-mapping shape the JSON path
/// produces: the root element becomes a single top-level key, child elements
/// become keys, repeated siblings become arrays, attributes become `@name`
/// keys, and text content becomes the element value (or `#text` when mixed
/// with child elements). Empty elements map to null.
pub(crate) fn xml_to_value(text: &str) -> Result<Value, quick_xml::Error> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    // One frame per open element: accumulated children plus character data.
    let mut stack: Vec<(String, Map<String, Value>, String)> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let map = attribute_map(&start)?;
                stack.push((name, map, String::new()));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let map = attribute_map(&start)?;
                let value = element_value(map, String::new());
                let parent = match stack.last_mut() {
                    Some((_, parent, _)) => parent,
                    None => &mut root,
                };
                insert_child(parent, name, value);
            }
            Event::Text(chunk) => {
                if let Some((_, _, chars)) = stack.last_mut() {
                    chars.push_str(&chunk.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(data) => {
                if let Some((_, _, chars)) = stack.last_mut() {
                    chars.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some((name, map, chars)) = stack.pop() {
                    let value = element_value(map, chars);
                    let parent = match stack.last_mut() {
                        Some((_, parent, _)) => parent,
                        None => &mut root,
                    };
                    insert_child(parent, name, value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Value::Object(root))
}

fn attribute_map(
    start: &quick_xml::events::BytesStart<'_>,
) -> Result<Map<String, Value>, quick_xml::Error> {
    let mut map = Map::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
        let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
        map.insert(key, Value::String(value.into_owned()));
    }
    Ok(map)
}

fn element_value(mut map: Map<String, Value>, chars: String) -> Value {
    if map.is_empty() {
        if chars.is_empty() {
            Value::Null
        } else {
            Value::String(chars)
        }
    } else {
        if !chars.is_empty() {
            map.insert("#text".to_string(), Value::String(chars));
        }
        Value::Object(map)
    }
}

/// A repeated sibling element promotes the existing entry to an array.
fn insert_child(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}
