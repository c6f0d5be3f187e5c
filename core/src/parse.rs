use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::FetchError;

/// Scans the response body for `suggestion` elements and collects their
/// `data` attributes in document order.
///
/// Both the element name and the attribute name match case-insensitively,
/// and elements are picked up at any nesting depth, whether self-closing or
/// not. Elements without a `data` attribute contribute nothing.
pub(crate) fn parse_suggestions(body: &str) -> Result<Vec<String>, FetchError> {
    let mut reader = Reader::from_str(body);
    let mut suggestions = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                if !element
                    .local_name()
                    .as_ref()
                    .eq_ignore_ascii_case(b"suggestion")
                {
                    continue;
                }
                for attribute in element.attributes() {
                    let attribute = attribute?;
                    if attribute.key.local_name().as_ref().eq_ignore_ascii_case(b"data") {
                        let value = attribute.decode_and_unescape_value(reader.decoder())?;
                        suggestions.push(value.into_owned());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(suggestions)
}
