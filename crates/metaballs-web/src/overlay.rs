use web_sys as web;

pub const ENABLE_BUTTON_ID: &str = "enable-audio";
const STATUS_ID: &str = "audio-status";

pub const MIC_DENIED_TEXT: &str = "Microphone access denied.";

#[inline]
fn set_status(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(text));
    }
}

/// Capture is live: hide the button and clear any earlier error.
pub fn audio_enabled(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ENABLE_BUTTON_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
    set_status(document, "");
}

/// Keep the button visible so the user can retry.
pub fn audio_failed(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ENABLE_BUTTON_ID) {
        let _ = el.set_attribute("style", "");
    }
    set_status(document, MIC_DENIED_TEXT);
}

pub fn gpu_failed(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(ENABLE_BUTTON_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
    set_status(document, message);
}
