use std::sync::LazyLock;

use regex::Regex;

static ENTITY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z_][a-z0-9_]*)\.(.+)$").unwrap());

/// Splits `remote.living_room` into `("remote", "living_room")`.
pub fn split_entity_id(entity_id: &str) -> Option<(&str, &str)> {
    let caps = ENTITY_ID.captures(entity_id)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

pub fn domain(entity_id: &str) -> Option<&str> {
    split_entity_id(entity_id).map(|(domain, _)| domain)
}

/// The remote that shadows a media player: `media_player.roku` -> `remote.roku`.
pub fn sibling_remote(entity_id: &str) -> String {
    let object_id = split_entity_id(entity_id)
        .map(|(_, object_id)| object_id)
        .unwrap_or(entity_id);
    format!("remote.{}", object_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_domain_and_object_id() {
        assert_eq!(split_entity_id("remote.livingroom"), Some(("remote", "livingroom")));
        assert_eq!(domain("media_player.roku_ultra"), Some("media_player"));
        assert_eq!(split_entity_id("livingroom"), None);
        assert_eq!(split_entity_id(".livingroom"), None);
    }

    #[test]
    fn sibling_remote_keeps_object_id() {
        assert_eq!(sibling_remote("media_player.roku"), "remote.roku");
        assert_eq!(sibling_remote("remote.tv"), "remote.tv");
        assert_eq!(sibling_remote("roku"), "remote.roku");
    }
}
