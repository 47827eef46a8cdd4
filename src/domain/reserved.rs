use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Handles the platform keeps for itself. Compared lowercase.
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "access", "account", "accounts", "admin", "administrator", "android",
        "anonymous", "apple", "assistant", "auction", "billing", "botfather", "business",
        "channel", "channels", "config", "contact", "contacts", "default", "delete",
        "desktop", "devices", "durov", "email", "explore", "fragment", "gamebot", "games",
        "gifbot", "group", "groups", "guest", "hello", "help", "iphone", "login", "logout",
        "member", "members", "message", "messages", "moderator", "notifications",
        "official", "owner", "password", "payment", "payments", "premium", "privacy",
        "profile", "public", "register", "replies", "root", "search", "security",
        "service", "settings", "signup", "spambot", "staff", "stars", "stickers",
        "storage", "stories", "support", "system", "telegram", "telegraph", "terms",
        "tgram", "update", "username", "usernames", "users", "verify", "wallet",
        "webapp", "webogram", "wikipedia",
    ]
    .into_iter()
    .collect()
});

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(word.to_lowercase().as_str())
}
