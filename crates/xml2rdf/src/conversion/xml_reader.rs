//! Read XML with quick-xml and feed the events to an [`XmlEventHandler`].

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;

use super::engine::{Converter, XmlAttribute, XmlEventHandler};
use super::options::ConversionOptions;
use crate::emitter::TriplesEmitter;
use crate::error::ReadError;

/// Counts reported after converting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub elements: u64,
    pub triples: u64,
}

/// Convert a whole document read from `reader`.
pub fn convert_reader<R: BufRead, E: TriplesEmitter>(
    reader: R,
    options: ConversionOptions,
    emitter: &mut E,
) -> Result<ConversionStats, ReadError> {
    let mut converter = Converter::new(emitter, options);
    drive(reader, &mut converter)?;
    let elements = converter.elements();
    Ok(ConversionStats {
        elements,
        triples: emitter.triple_count(),
    })
}

/// Convert a document held in memory.
pub fn convert_str<E: TriplesEmitter>(
    xml: &str,
    options: ConversionOptions,
    emitter: &mut E,
) -> Result<ConversionStats, ReadError> {
    convert_reader(xml.as_bytes(), options, emitter)
}

/// Walk the document and deliver its events to `handler`.
pub fn drive<R: BufRead, H: XmlEventHandler>(reader: R, handler: &mut H) -> Result<(), ReadError> {
    let mut reader = NsReader::from_reader(reader);
    let mut buf = Vec::new();

    handler.document_started()?;
    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = namespace_uri(ns)?;
        match event {
            Event::Start(e) => open_element(&reader, handler, &namespace, &e)?,
            Event::Empty(e) => {
                open_element(&reader, handler, &namespace, &e)?;
                let qname = std::str::from_utf8(e.name().into_inner())?;
                let local = std::str::from_utf8(e.local_name().into_inner())?;
                handler.element_closed(&namespace, local, qname)?;
            }
            Event::End(e) => {
                let qname = std::str::from_utf8(e.name().into_inner())?;
                let local = std::str::from_utf8(e.local_name().into_inner())?;
                handler.element_closed(&namespace, local, qname)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                handler.text(&text)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                handler.text(std::str::from_utf8(&raw)?)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }
    handler.document_ended()?;
    Ok(())
}

/// Forward the element's `xmlns` declarations, then the open event with the
/// remaining attributes.
fn open_element<R, H: XmlEventHandler>(
    reader: &NsReader<R>,
    handler: &mut H,
    namespace: &str,
    start: &BytesStart<'_>,
) -> Result<(), ReadError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if let Some(binding) = attr.key.as_namespace_binding() {
            let prefix = match binding {
                PrefixDeclaration::Default => "",
                PrefixDeclaration::Named(prefix) => std::str::from_utf8(prefix)?,
            };
            let uri = attr.unescape_value()?;
            handler.namespace_declared(prefix, &uri)?;
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        attributes.push(XmlAttribute {
            namespace: namespace_uri(ns)?,
            local_name: std::str::from_utf8(local.into_inner())?.to_string(),
            value: attr.unescape_value()?.into_owned(),
        });
    }

    let qname = std::str::from_utf8(start.name().into_inner())?;
    let local = std::str::from_utf8(start.local_name().into_inner())?;
    handler.element_opened(namespace, local, qname, &attributes)?;
    Ok(())
}

fn namespace_uri(ns: ResolveResult<'_>) -> Result<String, ReadError> {
    match ns {
        ResolveResult::Bound(ns) => Ok(std::str::from_utf8(ns.as_ref())?.to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(ReadError::UnknownNamespace(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}
