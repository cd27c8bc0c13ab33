//! URL building: asset paths, state query strings, and the contact link.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters gets escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single query value or path segment.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Absolute URL of a file under the public directory.
///
/// `relative` may contain `/` separators; each segment is encoded on its own.
pub fn asset_url(relative: &str) -> String {
    let encoded: Vec<String> = relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(encode_component)
        .collect();
    format!("/{}", encoded.join("/"))
}

/// URL of an inventory image.
pub fn image_url(images_dir: &str, id: &str) -> String {
    asset_url(&format!("{}/{}", images_dir.trim_matches('/'), id))
}

/// WhatsApp link with a pre-filled message ending in the item number.
///
/// ```text
/// https://wa.me/541122677318?text=Hola%21%20Me%20interesa%20...%20APA%20%23007
/// ```
pub fn contact_url(phone: &str, message_prefix: &str, display_number: &str) -> String {
    let message = format!("{message_prefix} {display_number}");
    format!("https://wa.me/{phone}?text={}", encode_component(&message))
}

/// Plain WhatsApp link without a pre-filled message.
pub fn contact_home_url(phone: &str) -> String {
    format!("https://wa.me/{phone}")
}
