//! System prompt templates for commit message generation

/// Commit message style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitStyle {
    /// `type(scope): summary`, optional bullet list
    #[default]
    Default,
    /// `type: summary`, no scope
    Simple,
    /// Single line, changes joined by semicolons
    Short,
}

impl CommitStyle {
    /// Configuration identifier
    pub fn id(&self) -> &'static str {
        match self {
            CommitStyle::Default => "default",
            CommitStyle::Simple => "simple",
            CommitStyle::Short => "short",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            CommitStyle::Default => "type(scope): summary, with bullets for multiple changes",
            CommitStyle::Simple => "type: summary, no scope",
            CommitStyle::Short => "one line, changes separated by semicolons",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|style| style.id() == s)
    }

    /// Parse from string, falling back to [`CommitStyle::Default`]
    pub fn from_id(s: &str) -> Self {
        Self::from_str(s.trim()).unwrap_or_default()
    }

    /// Get all available styles
    pub fn all() -> &'static [CommitStyle] {
        &[CommitStyle::Default, CommitStyle::Simple, CommitStyle::Short]
    }

    /// The system prompt sent ahead of the diff
    pub fn system_prompt(&self) -> &'static str {
        match self {
            CommitStyle::Default => DEFAULT_PROMPT,
            CommitStyle::Simple => SIMPLE_PROMPT,
            CommitStyle::Short => SHORT_PROMPT,
        }
    }
}

impl std::fmt::Display for CommitStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// System prompt for a configured style identifier
pub fn system_prompt_for(style_id: &str) -> &'static str {
    CommitStyle::from_id(style_id).system_prompt()
}

const DEFAULT_PROMPT: &str = r#"You are a senior developer generating precise Conventional Commits.

RULES:
1. ALWAYS start with: type(scope): summary message
   - Types: feat, fix, chore, docs, style, refactor, test, perf, ci, build
   - Scope: short noun (1-2 words): (auth), (ui), (db), (api)
2. SINGLE change: ONLY the summary line (50-72 chars)
3. MULTIPLE changes: summary + NEWLINE + bullet list
4. Bullets start with "- " (action verb, 1 line each)
5. Present tense, imperative mood, capitalize after colon

Examples:
SINGLE:
feat(auth): add JWT refresh token rotation

MULTIPLE:
feat(auth): implement complete authentication flow

- add JWT refresh token rotation
- implement password reset API
- add login rate limiting

Given changes:"#;

const SIMPLE_PROMPT: &str = r#"You are an expert generating clear Conventional Commits.

RULES:
1. Format: type: summary (no scope)
   - Types ONLY: feat, fix, chore, docs, style, refactor, test, perf
2. SINGLE change: ONLY summary line (50 chars max)
3. MULTIPLE changes: summary + NEWLINE + bullet list
4. Bullets: "- specific change" (action verb, 1 line)
5. Present tense: "add", "fix", "update"

Examples:
SINGLE:
feat: add user profile editing

MULTIPLE:
feat: implement checkout improvements

- add promo code validation
- fix cart quantity sync
- add order confirmation email

Analyze:"#;

const SHORT_PROMPT: &str = r#"You are an expert generating clear Conventional Commits. And your task is to generate ONE LINE Conventional Commit using semicolons.

RULES:
1. Format: type: change1; change2; change3; change4 (MAX 3 parts)
2. Types: feat, fix, chore, docs, style, refactor, test, perf
3. Action verbs only, no scope, 72 chars total max
4. Most important changes first

Examples:
- feat: add login; fix validation; update UI
- fix: resolve crash; optimize query
- chore: update deps; clean imports

Analyze:"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_style_has_distinct_prompt() {
        let prompts: Vec<&str> = CommitStyle::all().iter().map(|s| s.system_prompt()).collect();
        for prompt in &prompts {
            assert!(!prompt.trim().is_empty());
        }
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        assert_ne!(prompts[0], prompts[2]);
    }

    #[test]
    fn test_unknown_style_falls_back_to_default() {
        assert_eq!(CommitStyle::from_id("verbose"), CommitStyle::Default);
        assert_eq!(CommitStyle::from_id(""), CommitStyle::Default);
        assert_eq!(system_prompt_for("nope"), DEFAULT_PROMPT);
    }

    #[test]
    fn test_style_ids_roundtrip() {
        for style in CommitStyle::all() {
            assert_eq!(CommitStyle::from_str(style.id()), Some(*style));
        }
        assert_eq!(system_prompt_for("short"), SHORT_PROMPT);
        assert_eq!(system_prompt_for("simple"), SIMPLE_PROMPT);
    }

    #[test]
    fn test_default_prompt_names_scope_format() {
        assert!(CommitStyle::Default.system_prompt().contains("type(scope): summary"));
        assert!(CommitStyle::Simple.system_prompt().contains("no scope"));
        assert!(CommitStyle::Short.system_prompt().contains("semicolons"));
    }
}
