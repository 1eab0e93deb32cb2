use wasm_bindgen::JsCast;

/// Calendar-date part of an RFC 3339 timestamp, for card footers.
pub(crate) fn display_date(raw: &str) -> String {
    raw.split('T').next().unwrap_or(raw).to_string()
}

/// "2025-07-25T18:00:00" -> "2025-07-25 18:00".
pub(crate) fn display_date_time(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, time)) => format!("{} {}", date, time.get(..5).unwrap_or(time)),
        None => raw.to_string(),
    }
}

/// Maps a `datetime-local` input value onto the wire format. The input
/// yields minute precision; the backend expects seconds.
pub(crate) fn reminder_to_wire(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if v.len() == 16 {
        Some(format!("{v}:00"))
    } else {
        Some(v.to_string())
    }
}

/// Inverse of `reminder_to_wire`: a stored reminder truncated to what a
/// `datetime-local` input accepts.
pub(crate) fn reminder_to_input(raw: &str) -> String {
    raw.get(..16).unwrap_or(raw).to_string()
}

/// Shared password rule for the registration and password-change flows.
/// Violations abort the submit locally; no network call is made.
pub(crate) fn password_rule_violation(new_password: &str, confirm: &str) -> Option<&'static str> {
    if new_password != confirm {
        return Some("Passwords do not match");
    }
    if new_password.len() < 6 {
        return Some("Password must be at least 6 characters");
    }
    None
}

/// Reads a user-selected file into memory so it can ride a multipart upload.
pub(crate) async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Could not read the selected file".to_string())?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Hands a byte stream to the browser as a file download (object URL on an
/// invisible anchor).
pub(crate) fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "Could not assemble the download".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Could not create a download link".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document".to_string())?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Could not create a download link".to_string())?
        .dyn_into()
        .map_err(|_| "Could not create a download link".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_date_strips_time() {
        assert_eq!(display_date("2025-07-24T09:15:00"), "2025-07-24");
        assert_eq!(display_date("2025-07-24"), "2025-07-24");
    }

    #[test]
    fn display_date_time_is_minute_precise() {
        assert_eq!(display_date_time("2025-07-25T18:00:00"), "2025-07-25 18:00");
        assert_eq!(display_date_time("2025-07-25"), "2025-07-25");
    }

    #[test]
    fn reminder_wire_round_trip() {
        assert_eq!(
            reminder_to_wire("2025-07-25T18:00").as_deref(),
            Some("2025-07-25T18:00:00")
        );
        assert_eq!(reminder_to_wire("  "), None);
        assert_eq!(reminder_to_input("2025-07-25T18:00:00"), "2025-07-25T18:00");
    }

    #[test]
    fn password_rules() {
        assert_eq!(
            password_rule_violation("secret1", "secret2"),
            Some("Passwords do not match")
        );
        assert_eq!(
            password_rule_violation("five5", "five5"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(password_rule_violation("secret", "secret"), None);
    }
}
