//! Small browser helpers.
//!
//! Each helper reads from the browser when hydrated and falls back to a
//! server-side answer otherwise, so components can call them from both
//! renderers.

use chrono::NaiveDate;
use ezdoc_templates::UploadCandidate;

/// Width below which the sidebar starts collapsed.
pub const NARROW_VIEWPORT_PX: f64 = 768.0;

/// Current time in epoch seconds.
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        chrono::Utc::now().timestamp()
    }
}

/// Today's date in the user's local time zone.
pub fn today() -> NaiveDate {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(
            i32::try_from(now.get_full_year()).unwrap_or(1970),
            now.get_month() + 1,
            now.get_date(),
        )
        .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        chrono::Utc::now().date_naive()
    }
}

/// Whether the viewport is narrower than [`NARROW_VIEWPORT_PX`].
pub fn viewport_is_narrow() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|width| width.as_f64())
            .map_or(false, |width| width < NARROW_VIEWPORT_PX)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// The file picked in a file input's `change` event, if any.
pub fn picked_file(ev: &leptos::ev::Event) -> Option<UploadCandidate> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let input = ev
            .target()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;
        let file = input.files()?.get(0)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size_bytes = file.size() as u64;
        Some(UploadCandidate {
            file_name: file.name(),
            mime_type: file.type_(),
            size_bytes,
        })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ev;
        None
    }
}
