//! Building the discovery question from the user's free-text prompt.

/// How a prompt is phrased to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind<'a> {
    /// No prompt: enumerate everything visible.
    Open,
    /// Several categories joined by `" and "` or `", "`.
    Compound(&'a str),
    /// A single category.
    Single(&'a str),
}

impl<'a> PromptKind<'a> {
    pub fn classify(prompt: &'a str) -> Self {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            PromptKind::Open
        } else if prompt.contains(" and ") || prompt.contains(", ") {
            PromptKind::Compound(prompt)
        } else {
            PromptKind::Single(prompt)
        }
    }
}

/// The question sent to the query endpoint for `prompt`.
pub fn discovery_question(prompt: &str) -> String {
    match PromptKind::classify(prompt) {
        PromptKind::Open => "List all the objects you can see in this image. Return your answer as a simple comma-separated list of object names. Look carefully and include anything you can identify.".to_string(),
        PromptKind::Compound(p) => format!(
            "Look at this image and identify all {p} that you can see. List each item you find as a simple comma-separated list of the object and type. Include both types of objects mentioned. If you cannot find any relevant objects, return exactly \"null\"."
        ),
        PromptKind::Single(p) => format!(
            "List all {p} you can see in this image. Return your answer as a simple comma-separated list of object names and their type. For example \"red car\" or \"sign up button\". If you cannot find any {p}, return exactly \"null\"."
        ),
    }
}
