/// Author name for new posts: the explicit one, or the OS user's real name,
/// or the login name when no real name is set.
pub fn author_name(explicit: Option<String>) -> String {
    if let Some(name) = explicit.filter(|n| !n.trim().is_empty()) {
        return name.trim().to_string();
    }

    let name = whoami::realname();
    if name.trim().is_empty() {
        return whoami::username();
    }
    name
}
