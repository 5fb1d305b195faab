//! Mapping from user-facing genre labels to catalog tag sets.
//!
//! Requests use Korean editorial labels; catalog songs carry lowercase
//! English tags (both editorial and model-predicted). A song matches a
//! label when its combined tag set intersects the label's tag set.

/// Returns the catalog tags covered by a user-facing genre label.
/// Unknown labels map to the empty set, which matches nothing.
pub fn tags_for(label: &str) -> &'static [&'static str] {
    match label {
        "록" => &["rock", "metal", "k-rock"],
        "발라드" => &["ballad", "k-ballad"],
        "댄스" => &["dance", "k-pop", "electronic"],
        "힙합" => &["hip hop", "k-rap", "rap"],
        "팝" => &["pop"],
        "알앤비" => &["r&b", "soul"],
        "트로트" => &["trot"],
        "인디" => &["indie", "k-indie"],
        _ => &[],
    }
}

/// True if any of `tags` falls under the given label.
pub fn matches_label(label: &str, tags: impl Iterator<Item = impl AsRef<str>>) -> bool {
    let wanted = tags_for(label);
    if wanted.is_empty() {
        return false;
    }
    for tag in tags {
        if wanted.contains(&tag.as_ref()) {
            return true;
        }
    }
    false
}
