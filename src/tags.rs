const SEPARATOR: &str = ", ";

/// Join content tags into the single line shown to the user.
pub fn summarize<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
