//! CIM-XML envelope decoding
//!
//! naviseccli `-xml` output wraps every report in the same response shape:
//!
//! ```text
//! CIM/MESSAGE/SIMPLERSP/METHODRESPONSE
//!   ├── PARAMVALUE/VALUE/PARAMVALUE*   (NAME, TYPE, <VALUE>)  -> property stream
//!   └── RETURNVALUE/VALUE.NAMEDINSTANCE/INSTANCE/PROPERTY*    -> status
//! ```
//!
//! Only those two lists are extracted; everything else in the document is
//! walked past.

use super::property::{Property, ResponseEnvelope};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

const ROOT: &str = "CIM";
const DATA_PARENTS: [&str; 3] = ["METHODRESPONSE", "PARAMVALUE", "VALUE"];
const STATUS_PARENTS: [&str; 3] = ["RETURNVALUE", "VALUE.NAMEDINSTANCE", "INSTANCE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Data,
    Status,
}

/// A triple element whose `VALUE` child is still being read
struct Pending {
    section: Section,
    depth: usize,
    property: Property,
    in_value: bool,
}

/// Decode raw naviseccli XML output into a [`ResponseEnvelope`]
pub fn decode_envelope(xml: &[u8]) -> Result<ResponseEnvelope> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut seen_root = false;
    let mut envelope = ResponseEnvelope::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = element_name(e);
                if stack.is_empty() {
                    check_root(&name, &mut seen_root)?;
                }
                if let Some(p) = pending.as_mut() {
                    if name == "VALUE" && stack.len() == p.depth + 1 {
                        p.in_value = true;
                    }
                } else if let Some(section) = triple_section(&name, &stack) {
                    pending = Some(Pending {
                        section,
                        depth: stack.len(),
                        property: read_triple_attrs(e)?,
                        in_value: false,
                    });
                }
                stack.push(name);
            }
            Event::Empty(ref e) => {
                let name = element_name(e);
                if stack.is_empty() {
                    check_root(&name, &mut seen_root)?;
                }
                if pending.is_none() {
                    if let Some(section) = triple_section(&name, &stack) {
                        push(&mut envelope, section, read_triple_attrs(e)?);
                    }
                }
            }
            Event::Text(ref e) => {
                if let Some(p) = pending.as_mut().filter(|p| p.in_value) {
                    p.property.value.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let Some(p) = pending.as_mut().filter(|p| p.in_value) {
                    p.property.value.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                stack.pop();
                if let Some(p) = pending.as_mut() {
                    if stack.len() == p.depth + 1 {
                        p.in_value = false;
                    } else if stack.len() == p.depth {
                        if let Some(done) = pending.take() {
                            push(&mut envelope, done.section, done.property);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(Error::Decode(format!("missing <{}> root element", ROOT)));
    }
    if !stack.is_empty() {
        return Err(Error::Decode(format!(
            "document ended inside <{}>",
            stack.join("/")
        )));
    }

    debug!(
        "Decoded envelope: {} status properties, {} data properties",
        envelope.status.len(),
        envelope.properties.len()
    );
    Ok(envelope)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn check_root(name: &str, seen_root: &mut bool) -> Result<()> {
    if name != ROOT || *seen_root {
        return Err(Error::Decode(format!(
            "unexpected root element <{}>, expected <{}>",
            name, ROOT
        )));
    }
    *seen_root = true;
    Ok(())
}

fn triple_section(name: &str, stack: &[String]) -> Option<Section> {
    let parents_match = |parents: &[&str; 3]| {
        stack.len() >= parents.len()
            && stack[stack.len() - parents.len()..]
                .iter()
                .zip(parents.iter())
                .all(|(have, want)| have == want)
    };

    match name {
        "PARAMVALUE" if parents_match(&DATA_PARENTS) => Some(Section::Data),
        "PROPERTY" if parents_match(&STATUS_PARENTS) => Some(Section::Status),
        _ => None,
    }
}

fn read_triple_attrs(e: &BytesStart<'_>) -> Result<Property> {
    let mut property = Property::default();
    if let Some(attr) = e
        .try_get_attribute("NAME")
        .map_err(quick_xml::Error::from)?
    {
        property.name = attr.unescape_value()?.into_owned();
    }
    if let Some(attr) = e
        .try_get_attribute("TYPE")
        .map_err(quick_xml::Error::from)?
    {
        property.type_tag = attr.unescape_value()?.into_owned();
    }
    Ok(property)
}

fn push(envelope: &mut ResponseEnvelope, section: Section, property: Property) {
    match section {
        Section::Data => envelope.properties.push(property),
        Section::Status => envelope.status.push(property),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Wrap data PARAMVALUEs and status PROPERTYs in a full CIM response
    pub(crate) fn envelope_xml(
        status: &[(&str, &str, &str)],
        data: &[(&str, &str, &str)],
    ) -> String {
        let params: String = data
            .iter()
            .map(|(n, t, v)| {
                format!(
                    "<PARAMVALUE NAME=\"{}\" TYPE=\"{}\"><VALUE>{}</VALUE></PARAMVALUE>\n",
                    n, t, v
                )
            })
            .collect();
        let props: String = status
            .iter()
            .map(|(n, t, v)| {
                format!(
                    "<PROPERTY NAME=\"{}\" TYPE=\"{}\"><VALUE>{}</VALUE></PROPERTY>\n",
                    n, t, v
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="utf-8" ?>
<CIM CIMVERSION="2.0" DTDVERSION="2.0">
<MESSAGE ID="877" PROTOCOLVERSION="1.0">
<SIMPLERSP>
<METHODRESPONSE NAME="ExecuteClientRequest">
<PARAMVALUE NAME="Response" TYPE="string">
<VALUE>
{params}</VALUE>
</PARAMVALUE>
<RETURNVALUE TYPE="Navi_Error">
<VALUE.NAMEDINSTANCE>
<INSTANCENAME CLASSNAME="Navi_Error"></INSTANCENAME>
<INSTANCE CLASSNAME="Navi_Error">
{props}</INSTANCE>
</VALUE.NAMEDINSTANCE>
</RETURNVALUE>
</METHODRESPONSE>
</SIMPLERSP>
</MESSAGE>
</CIM>
"#
        )
    }

    pub(crate) const OK_STATUS: [(&str, &str, &str); 2] =
        [("errorCode", "uint32", "0"), ("success", "boolean", "true")];

    #[test]
    fn test_decode_sections() {
        let xml = envelope_xml(
            &OK_STATUS,
            &[
                ("LOGICAL UNIT NUMBER", "uint64", "5"),
                ("Name", "string", "vol5  "),
            ],
        );
        let env = decode_envelope(xml.as_bytes()).unwrap();

        assert_eq!(env.status.len(), 2);
        assert!(env.status[0].is("errorCode", "uint32"));
        assert_eq!(env.status[1].value, "true");

        assert_eq!(env.properties.len(), 2);
        assert_eq!(env.properties[0].value, "5");
        // padding survives decoding
        assert_eq!(env.properties[1].value, "vol5  ");
    }

    #[test]
    fn test_decode_keeps_name_indentation() {
        let xml = envelope_xml(&OK_STATUS, &[("    SP Name", "string", "SP A")]);
        let env = decode_envelope(xml.as_bytes()).unwrap();
        assert_eq!(env.properties[0].name, "    SP Name");
    }

    #[test]
    fn test_decode_unescapes_entities() {
        let xml = envelope_xml(&OK_STATUS, &[("Server Name", "string", "a&amp;b")]);
        let env = decode_envelope(xml.as_bytes()).unwrap();
        assert_eq!(env.properties[0].value, "a&b");
    }

    #[test]
    fn test_decode_empty_value() {
        let xml = envelope_xml(&OK_STATUS, &[("Pool Name", "string", "")]);
        let env = decode_envelope(xml.as_bytes()).unwrap();
        assert_eq!(env.properties[0].value, "");

        let self_closing = xml.replace(
            "<PARAMVALUE NAME=\"Pool Name\" TYPE=\"string\"><VALUE></VALUE></PARAMVALUE>",
            "<PARAMVALUE NAME=\"Pool Name\" TYPE=\"string\"/>",
        );
        let env = decode_envelope(self_closing.as_bytes()).unwrap();
        assert_eq!(env.properties.len(), 1);
        assert_eq!(env.properties[0].name, "Pool Name");
    }

    #[test]
    fn test_decode_wrong_root() {
        let err = decode_envelope(b"<html><body/></html>").unwrap_err();
        assert_matches!(err, Error::Decode(_));
    }

    #[test]
    fn test_decode_empty_input() {
        assert_matches!(decode_envelope(b""), Err(Error::Decode(_)));
    }

    #[test]
    fn test_decode_truncated() {
        let xml = envelope_xml(&OK_STATUS, &[("Name", "string", "x")]);
        let cut = &xml.as_bytes()[..xml.len() / 2];
        assert!(decode_envelope(cut).is_err());
    }
}
