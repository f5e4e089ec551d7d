//! User-facing strings for the two supported display languages.
//!
//! There is no global language selector: callers resolve a [`Lang`] once at
//! startup and pass it to [`localize`] with every message.

use std::fmt;

pub const INVALID_LANG_WARNING: &str = "Invalid language, defaulting to English.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Lang::En),
            "ru" => Some(Lang::Ru),
            _ => None,
        }
    }

    /// Map a language tag to a [`Lang`], falling back to English.
    ///
    /// The second element is the warning to show the user when the fallback
    /// was taken.
    pub fn resolve(tag: &str) -> (Self, Option<&'static str>) {
        match Self::from_tag(tag) {
            Some(lang) => (lang, None),
            None => (Lang::En, Some(INVALID_LANG_WARNING)),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Every message the CLI can print, with its arguments.
#[derive(Debug)]
pub enum Message<'a> {
    /// Version string of the calling binary.
    Version(&'a str),
    Help,
    RamStats,
    Total(u64),
    Free(u64),
    Available(u64),
    DaemonStart,
    /// Formatted local timestamp of the successful drop.
    CacheCleared(&'a str),
    CacheError(&'a anyhow::Error),
    StatsError(&'a anyhow::Error),
    HelpHint,
}

pub fn localize(lang: Lang, msg: &Message<'_>) -> String {
    match lang {
        Lang::En => english(msg),
        Lang::Ru => russian(msg),
    }
}

fn english(msg: &Message<'_>) -> String {
    match msg {
        Message::Version(v) => format!("kram - version {v}"),
        Message::Help => "kram - simple daemon for clearing RAM cache\n\
            \x20 -d, --daemon         Start in main loop\n\
            \x20 -c, --check          Show current RAM statistics\n\
            \x20 -v, --version        Show program version\n\
            \x20 -h, --help           Show this help message\n\
            \x20     --lang=LANG      Interface language (en, ru)\n\
            \x20     --config=PATH    Configuration file\n\
            \x20     --print-config   Show the effective configuration"
            .to_string(),
        Message::RamStats => "RAM statistics:".to_string(),
        Message::Total(mb) => format!("  total     - {mb} MB"),
        Message::Free(mb) => format!("  free      - {mb} MB"),
        Message::Available(mb) => format!("  available - {mb} MB"),
        Message::DaemonStart => "Starting daemon to clear RAM cache...".to_string(),
        Message::CacheCleared(ts) => format!("{ts}: cache successfully cleared"),
        Message::CacheError(e) => format!("Error clearing cache: {e:#}"),
        Message::StatsError(e) => format!("Error getting RAM statistics: {e:#}"),
        Message::HelpHint => "Use the -h flag for help".to_string(),
    }
}

fn russian(msg: &Message<'_>) -> String {
    match msg {
        Message::Version(v) => format!("kram - версия {v}"),
        Message::Help => "kram - простой демон для сброса кэша RAM\n\
            \x20 -d, --daemon         Запустить в основном цикле\n\
            \x20 -c, --check          Показать текущую статистику RAM\n\
            \x20 -v, --version        Показать версию программы\n\
            \x20 -h, --help           Показать это сообщение\n\
            \x20     --lang=LANG      Язык интерфейса (en, ru)\n\
            \x20     --config=PATH    Файл конфигурации\n\
            \x20     --print-config   Показать действующую конфигурацию"
            .to_string(),
        Message::RamStats => "RAM статистика:".to_string(),
        Message::Total(mb) => format!("  всего     - {mb} МБ"),
        Message::Free(mb) => format!("  свободно  - {mb} МБ"),
        Message::Available(mb) => format!("  доступно  - {mb} МБ"),
        Message::DaemonStart => "Запуск демона для сброса кэша RAM...".to_string(),
        Message::CacheCleared(ts) => format!("{ts}: кэш успешно сброшен"),
        Message::CacheError(e) => format!("Ошибка сброса кэша: {e:#}"),
        Message::StatsError(e) => format!("Ошибка получения статистики RAM: {e:#}"),
        Message::HelpHint => "Для справки используйте флаг -h".to_string(),
    }
}
