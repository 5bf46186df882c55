use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use pagegrab_logging::grab_warn;

/// Decode a response body to UTF-8.
///
/// Encoding is picked from, in order: a byte-order mark, the `charset`
/// parameter of the Content-Type header, then `chardetng` sniffing (which
/// also honours `<meta charset>` in the document). Malformed sequences are
/// replaced with U+FFFD so one stray byte never costs the whole page.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _bom_len)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_param)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| sniff(bytes));

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        grab_warn!(
            "body is not valid {}; malformed bytes replaced",
            used.name()
        );
    }
    text.into_owned()
}

fn sniff(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\''))
    })
}
