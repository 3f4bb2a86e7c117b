//! Static client assets.
//!
//! The submission script is a thin progressive-enhancement layer: it
//! intercepts submits of `form.ajax-form` elements with an id, posts
//! the serialized fields to the page URL with the `ajax=form` marker
//! appended, and swaps the response into the form, or navigates when
//! the response is a redirect instruction.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The bundled form submission script.
pub const FORM_SCRIPT: &str = include_str!("../resources/form.js");

/// File name the script is installed under.
pub const FORM_SCRIPT_NAME: &str = "form.js";

/// Copies the submission script into `public_dir/assets`, creating the
/// directory when needed. Returns the installed path.
pub fn install(public_dir: &Path) -> Result<PathBuf> {
    let asset_dir = public_dir.join("assets");
    fs::create_dir_all(&asset_dir)?;

    let target = asset_dir.join(FORM_SCRIPT_NAME);
    fs::write(&target, FORM_SCRIPT)?;
    tracing::info!(path = %target.display(), "installed form script");

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_carries_protocol_markers() {
        assert!(FORM_SCRIPT.contains("ajax-form"));
        assert!(FORM_SCRIPT.contains("'ajax', 'form'"));
        assert!(FORM_SCRIPT.contains("redirect"));
    }

    #[test]
    fn test_install_writes_script() {
        let dir = std::env::temp_dir().join("formkit-assets-test");
        let _ = fs::remove_dir_all(&dir);

        let installed = install(&dir).unwrap();
        assert!(installed.ends_with("assets/form.js"));
        assert_eq!(fs::read_to_string(&installed).unwrap(), FORM_SCRIPT);

        let _ = fs::remove_dir_all(&dir);
    }
}
