/// Order in which term lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputOrder {
    /// Whatever order the term table iterates in. Consumers must not rely on it.
    #[default]
    Unordered,
    /// Ascending by term bytes.
    Sorted,
}

/// What to do with a term line that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the whole merge on the first bad line.
    #[default]
    Abort,
    /// Log a warning and skip the line. Header lines are never skipped.
    Skip,
}

pub const ENV_SORTED: &str = "CTF_MERGE_SORTED";
pub const ENV_SKIP_MALFORMED: &str = "CTF_MERGE_SKIP_MALFORMED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeConfig {
    pub order: OutputOrder,
    pub on_malformed: MalformedPolicy,
}

impl MergeConfig {
    /// Defaults overridden by `CTF_MERGE_SORTED` / `CTF_MERGE_SKIP_MALFORMED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if lookup(ENV_SORTED).is_some_and(|v| is_truthy(&v)) {
            config.order = OutputOrder::Sorted;
        }
        if lookup(ENV_SKIP_MALFORMED).is_some_and(|v| is_truthy(&v)) {
            config.on_malformed = MalformedPolicy::Skip;
        }
        config
    }

    pub fn sorted(mut self) -> Self {
        self.order = OutputOrder::Sorted;
        self
    }

    pub fn skip_malformed(mut self) -> Self {
        self.on_malformed = MalformedPolicy::Skip;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
