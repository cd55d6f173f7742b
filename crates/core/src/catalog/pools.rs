pub const DEFAULT_POOL_KEY: &str = "default";

pub const DEFAULT_POOL: &[&str] = &[
    "sign_default_v1",
    "sign_default_v2",
    "sign_default_v3",
    "sign_default_v4",
];

const WORD_POOLS: &[(&str, &[&str])] = &[
    ("hello", &["greet_hello_v1", "greet_hello_v2", "greet_hello_v3"]),
    ("hi", &["greet_hi_v1", "greet_hi_v2"]),
    ("thank", &["express_thanks_v1", "express_thanks_v2", "express_thanks_v3"]),
    ("you", &["point_you_v1", "point_you_v2"]),
    ("please", &["request_please_v1", "request_please_v2"]),
    ("yes", &["confirm_yes_v1", "confirm_yes_v2", "confirm_yes_v3"]),
    ("no", &["deny_no_v1", "deny_no_v2"]),
    ("help", &["request_help_v1", "request_help_v2"]),
    ("water", &["noun_water_v1", "noun_water_v2"]),
    ("food", &["noun_food_v1", "noun_food_v2"]),
    ("bathroom", &["noun_bathroom_v1", "noun_bathroom_v2"]),
    ("goodbye", &["greet_goodbye_v1", "greet_goodbye_v2"]),
    ("how", &["question_how_v1", "question_how_v2"]),
    ("what", &["question_what_v1", "question_what_v2"]),
    ("where", &["question_where_v1", "question_where_v2"]),
    ("when", &["question_when_v1", "question_when_v2"]),
    ("why", &["question_why_v1", "question_why_v2"]),
    (DEFAULT_POOL_KEY, DEFAULT_POOL),
];

/// All pools including `default`.
pub fn word_pools() -> &'static [(&'static str, &'static [&'static str])] {
    WORD_POOLS
}

/// Clip pool for a normalized word; unknown words get the default pool.
pub fn pool_for(normalized: &str) -> &'static [&'static str] {
    WORD_POOLS
        .iter()
        .find(|(word, _)| *word == normalized)
        .map(|(_, pool)| *pool)
        .unwrap_or(DEFAULT_POOL)
}
