//! Emergency message composition.

use crate::geo::Coordinates;

/// Compose the final emergency message from a template, the user's display
/// name, and the last resolved coordinates.
///
/// The `<name>` placeholder is replaced with `display_name` (use an empty
/// string when the name is unknown). A fixed-format Google Maps link is
/// appended after the template text. Note that the default template already
/// ends with "My location:" and the suffix repeats it; the doubled phrase is
/// long-standing observable behavior and is kept as-is.
pub fn compose(template: &str, display_name: &str, coords: Coordinates) -> String {
    let body = template.replace("<name>", display_name);
    format!(
        "{} My location: https://www.google.com/maps?q={:.6},{:.6}",
        body, coords.latitude, coords.longitude
    )
}
