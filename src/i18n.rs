//! Startup locale resolution
//!
//! Precedence: the stored user's `languageCode`, then the persisted `locale`
//! key, then the system locale, then the configured fallback. The persisted
//! key is initialised on first run so later starts are stable.

use crate::error::PortalResult;
use crate::session::UserRecord;
use crate::storage::{KeyValueStore, LOCALE_KEY, USER_KEY};
use tracing::{debug, warn};

/// Where the resolved locale came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    User,
    Stored,
    System,
    Fallback,
}

/// Resolve the locale the application should start in
pub fn resolve_locale(
    storage: &dyn KeyValueStore,
    system_locale: Option<&str>,
    fallback: &str,
) -> PortalResult<(String, LocaleSource)> {
    if let Some(code) = user_language(storage)? {
        return Ok((code, LocaleSource::User));
    }

    if let Some(stored) = storage.get_item(LOCALE_KEY)?.filter(|l| !l.is_empty()) {
        return Ok((stored, LocaleSource::Stored));
    }

    let (locale, source) = match system_locale.filter(|l| !l.is_empty()) {
        Some(system) => (system.to_string(), LocaleSource::System),
        None => (fallback.to_string(), LocaleSource::Fallback),
    };
    storage.set_item(LOCALE_KEY, &locale)?;
    debug!("Initialised stored locale to {}", locale);

    Ok((locale, source))
}

fn user_language(storage: &dyn KeyValueStore) -> PortalResult<Option<String>> {
    let Some(raw) = storage.get_item(USER_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str::<Option<UserRecord>>(&raw) {
        Ok(user) => Ok(user
            .and_then(|u| u.language_code)
            .filter(|code| !code.is_empty())),
        Err(e) => {
            // The session store reports this properly; locale just moves on
            warn!("Ignoring unreadable user record for locale: {}", e);
            Ok(None)
        }
    }
}

/// Read the system locale from `LC_ALL` / `LC_MESSAGES` / `LANG`
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_posix_locale(&value))
}

/// Turn a POSIX locale (`en_US.UTF-8`) into a language tag (`en-US`).
///
/// `C` and `POSIX` carry no language and yield `None`.
pub fn normalize_posix_locale(value: &str) -> Option<String> {
    let base = value.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn user_language_wins() {
        let storage = MemoryStore::with_items([
            (USER_KEY, r#"{"languageCode":"en"}"#),
            (LOCALE_KEY, "de"),
        ]);
        let (locale, source) = resolve_locale(&storage, Some("fr-FR"), "tr").unwrap();
        assert_eq!(locale, "en");
        assert_eq!(source, LocaleSource::User);
    }

    #[test]
    fn empty_user_language_is_skipped() {
        let storage = MemoryStore::with_items([
            (USER_KEY, r#"{"languageCode":""}"#),
            (LOCALE_KEY, "de"),
        ]);
        let (locale, source) = resolve_locale(&storage, None, "tr").unwrap();
        assert_eq!(locale, "de");
        assert_eq!(source, LocaleSource::Stored);
    }

    #[test]
    fn system_locale_is_persisted() {
        let storage = MemoryStore::new();
        let (locale, source) = resolve_locale(&storage, Some("fr-FR"), "tr").unwrap();
        assert_eq!(locale, "fr-FR");
        assert_eq!(source, LocaleSource::System);
        assert_eq!(storage.get_item(LOCALE_KEY).unwrap().as_deref(), Some("fr-FR"));
    }

    #[test]
    fn fallback_when_nothing_known() {
        let storage = MemoryStore::with_items([(USER_KEY, "null")]);
        let (locale, source) = resolve_locale(&storage, None, "tr").unwrap();
        assert_eq!(locale, "tr");
        assert_eq!(source, LocaleSource::Fallback);
    }

    #[test]
    fn corrupt_user_does_not_block_locale() {
        let storage = MemoryStore::with_items([(USER_KEY, "{oops")]);
        let (locale, _) = resolve_locale(&storage, None, "tr").unwrap();
        assert_eq!(locale, "tr");
    }

    #[test]
    fn posix_locales_normalize() {
        assert_eq!(normalize_posix_locale("en_US.UTF-8").as_deref(), Some("en-US"));
        assert_eq!(normalize_posix_locale("tr_TR@euro").as_deref(), Some("tr-TR"));
        assert_eq!(normalize_posix_locale("de").as_deref(), Some("de"));
        assert_eq!(normalize_posix_locale("C.UTF-8"), None);
        assert_eq!(normalize_posix_locale("POSIX"), None);
        assert_eq!(normalize_posix_locale(""), None);
    }
}
