use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clipboard::ClipboardSink;
use crate::config::Settings;
use crate::greetings::{GreetingPool, Recipient, Tone};
use crate::history::HistoryLog;
use crate::i18n::{I18n, SUPPORTED_LANGUAGES};
use crate::models::{CopiedBadge, LanguageMenu, Particle, Screen, Toast};
use crate::selection::SelectionState;
use crate::share::{self, ShareOutcome};
use crate::storage::{KeyValueStore, LANGUAGE_KEY};
use crate::theme::ThemeMode;

const DECORATIONS: [&str; 7] = ["🧧", "🐴", "✨", "🎊", "🏮", "💛", "🌸"];
const PARTICLE_COUNT: usize = 8;
const FALLBACK_ICON: &str = "🧧";

/// Runtime knobs taken from [`Settings`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub share_command: Option<String>,
    pub toast_ttl: Duration,
    pub badge_ttl: Duration,
}

impl AppOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            share_command: settings.share_command.clone(),
            toast_ttl: settings.toast_duration(),
            badge_ttl: settings.copied_badge_duration(),
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            share_command: None,
            toast_ttl: Duration::from_millis(2500),
            badge_ttl: Duration::from_millis(2000),
        }
    }
}

/// Structured analytics event; logging only, never fails.
fn track_event(name: &str, recipient: Option<Recipient>, tone: Option<Tone>) {
    tracing::info!(
        target: "analytics",
        event = name,
        recipient = recipient.map_or("-", Recipient::as_str),
        tone = tone.map_or("-", Tone::as_str)
    );
}

/// All UI state. Storage and clipboard sit behind traits so flows run without a terminal.
pub struct App {
    pub screen: Screen,
    pub recipient: Option<Recipient>,
    pub tone: Option<Tone>,
    pub current_greetings: Vec<String>,
    pub cursor: usize,
    pub history: HistoryLog,
    pub theme_mode: ThemeMode,
    pub toast: Option<Toast>,
    pub copied: Option<CopiedBadge>,
    pub lang_menu: LanguageMenu,
    pub particles: Vec<Particle>,
    pub i18n: I18n,
    pools: GreetingPool,
    selection: SelectionState,
    store: Box<dyn KeyValueStore>,
    clipboard: Box<dyn ClipboardSink>,
    options: AppOptions,
    rng: StdRng,
}

impl App {
    pub fn new(
        pools: GreetingPool,
        store: Box<dyn KeyValueStore>,
        clipboard: Box<dyn ClipboardSink>,
        i18n: I18n,
        options: AppOptions,
    ) -> Self {
        Self::with_rng(pools, store, clipboard, i18n, options, StdRng::from_os_rng())
    }

    pub fn with_rng(
        pools: GreetingPool,
        store: Box<dyn KeyValueStore>,
        clipboard: Box<dyn ClipboardSink>,
        i18n: I18n,
        options: AppOptions,
        mut rng: StdRng,
    ) -> Self {
        let history = HistoryLog::load(store.as_ref());
        let theme_mode = ThemeMode::load(store.as_ref());
        let particles = (0..PARTICLE_COUNT)
            .map(|i| Particle {
                glyph: DECORATIONS[i % DECORATIONS.len()],
                column_pct: rng.random_range(0..100),
                row_pct: rng.random_range(0..100),
            })
            .collect();

        Self {
            screen: Screen::Intro,
            recipient: None,
            tone: None,
            current_greetings: Vec::new(),
            cursor: 0,
            history,
            theme_mode,
            toast: None,
            copied: None,
            lang_menu: LanguageMenu { visible: false, cursor: 0 },
            particles,
            i18n,
            pools,
            selection: SelectionState::new(),
            store,
            clipboard,
            options,
            rng,
        }
    }

    pub fn label(&self, key: &str) -> String {
        self.i18n.t(key)
    }

    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.cursor = 0;
    }

    pub fn start(&mut self) {
        self.show_screen(Screen::Recipient);
        track_event("greeting_start", None, None);
    }

    /// One level back; the intro screen has nowhere to go.
    pub fn back(&mut self) {
        match self.screen {
            Screen::Intro => {}
            Screen::Recipient => self.show_screen(Screen::Intro),
            Screen::Tone => self.show_screen(Screen::Recipient),
            Screen::Result => self.show_screen(Screen::Tone),
        }
    }

    pub fn choose_recipient(&mut self, recipient: Recipient) {
        self.recipient = Some(recipient);
        self.show_screen(Screen::Tone);
        track_event("recipient_select", self.recipient, None);
    }

    pub fn choose_tone(&mut self, tone: Tone) {
        self.tone = Some(tone);
        self.generate();
        self.show_screen(Screen::Result);
        track_event("greeting_generate", self.recipient, self.tone);
    }

    pub fn regenerate(&mut self) {
        if self.screen != Screen::Result {
            return;
        }
        self.generate();
        self.cursor = 0;
        track_event("greeting_regenerate", self.recipient, self.tone);
    }

    /// Back to the intro with a clean slate, including every used-index set.
    pub fn start_over(&mut self) {
        self.recipient = None;
        self.tone = None;
        self.current_greetings.clear();
        self.copied = None;
        self.selection.reset();
        self.show_screen(Screen::Intro);
    }

    fn generate(&mut self) {
        let (Some(recipient), Some(tone)) = (self.recipient, self.tone) else {
            return;
        };
        self.current_greetings =
            self.selection
                .next_batch(&self.pools, recipient, tone, &mut self.rng);
        self.copied = None;
    }

    /// `icon  recipient · tone` header for the result screen.
    pub fn result_info(&self) -> String {
        let icon = self.recipient.map_or(FALLBACK_ICON, Recipient::icon);
        let recipient = self
            .recipient
            .map(|r| self.label(&r.label_key()))
            .unwrap_or_default();
        let tone = self
            .tone
            .map(|t| self.label(&t.label_key()))
            .unwrap_or_default();
        format!("{icon}  {recipient} · {tone}")
    }

    pub fn copy(&mut self, index: usize) {
        let Some(text) = self.current_greetings.get(index).cloned() else {
            return;
        };
        match self.clipboard.copy(&text) {
            Ok(()) => self.on_copy_success(index, &text),
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                self.show_toast(self.label("greeting.copyFailed"));
            }
        }
    }

    pub fn share(&mut self, index: usize) {
        let Some(text) = self.current_greetings.get(index).cloned() else {
            return;
        };
        let title = self.label("share.title");
        let command = self.options.share_command.clone();
        match share::share(&text, &title, command.as_deref(), self.clipboard.as_mut()) {
            Ok(ShareOutcome::Shared) => {
                self.show_toast(self.label("greeting.shared"));
                tracing::info!(
                    target: "analytics",
                    event = "share",
                    method = "command",
                    recipient = self.recipient.map_or("-", Recipient::as_str)
                );
            }
            Ok(ShareOutcome::Copied) => self.on_copy_success(index, &text),
            Err(e) => {
                tracing::warn!(error = %e, "share and copy both failed");
                self.show_toast(self.label("greeting.copyFailed"));
            }
        }
    }

    fn on_copy_success(&mut self, index: usize, text: &str) {
        let now = Instant::now();
        self.copied = Some(CopiedBadge { index, shown_at: now });
        self.show_toast(self.label("greeting.copiedToast"));
        self.history.add(text, self.store.as_mut());
        track_event("greeting_copy", self.recipient, self.tone);
    }

    pub fn clear_history(&mut self) {
        self.history.clear(self.store.as_mut());
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
        self.theme_mode.save(self.store.as_mut());
    }

    /// Newest toast replaces any visible one.
    pub fn show_toast(&mut self, text: String) {
        self.toast = Some(Toast {
            text,
            shown_at: Instant::now(),
        });
    }

    /// Expires the toast and copied badge.
    pub fn tick(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= self.options.toast_ttl)
        {
            self.toast = None;
        }
        if self
            .copied
            .as_ref()
            .is_some_and(|c| now.duration_since(c.shown_at) >= self.options.badge_ttl)
        {
            self.copied = None;
        }
    }

    pub fn toggle_language_menu(&mut self) {
        self.lang_menu.visible = !self.lang_menu.visible;
        let current = self.i18n.current_language();
        self.lang_menu.cursor = SUPPORTED_LANGUAGES
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
    }

    pub fn close_language_menu(&mut self) {
        self.lang_menu.visible = false;
    }

    /// Switches language, remembers the choice, and closes the menu.
    pub fn select_language(&mut self, lang: &str) {
        self.lang_menu.visible = false;
        if self.i18n.set_language(lang).is_err() {
            return;
        }
        if let Err(e) = self.store.set(LANGUAGE_KEY, lang) {
            tracing::warn!(error = %e, "failed to persist language");
        }
    }

    /// Number of selectable rows on the current screen.
    pub fn option_count(&self) -> usize {
        match self.screen {
            Screen::Intro => 0,
            Screen::Recipient => Recipient::ALL.len(),
            Screen::Tone => Tone::ALL.len(),
            Screen::Result => self.current_greetings.len(),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.lang_menu.visible {
            self.lang_menu.cursor = wrap(self.lang_menu.cursor, delta, SUPPORTED_LANGUAGES.len());
            return;
        }
        self.cursor = wrap(self.cursor, delta, self.option_count());
    }

    /// Enter on the current screen or the language menu.
    pub fn activate(&mut self) {
        if self.lang_menu.visible {
            let lang = SUPPORTED_LANGUAGES[self.lang_menu.cursor];
            self.select_language(lang);
            return;
        }
        match self.screen {
            Screen::Intro => self.start(),
            Screen::Recipient => {
                if let Some(r) = Recipient::ALL.get(self.cursor).copied() {
                    self.choose_recipient(r);
                }
            }
            Screen::Tone => {
                if let Some(t) = Tone::ALL.get(self.cursor).copied() {
                    self.choose_tone(t);
                }
            }
            Screen::Result => self.copy(self.cursor),
        }
    }
}

fn wrap(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GreetingError, Result};
    use crate::i18n::DictionarySource;
    use crate::storage::{HISTORY_KEY, MemoryStore, THEME_KEY};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::runtime::Handle;

    #[derive(Clone, Default)]
    struct FakeClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        broken: bool,
    }

    impl ClipboardSink for FakeClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            if self.broken {
                return Err(GreetingError::Clipboard("denied".into()));
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn app_with(clipboard: FakeClipboard, store: MemoryStore) -> App {
        let i18n = I18n::new(
            DictionarySource::Directory("/nonexistent/seollal-locales".into()),
            "ko",
            Handle::current(),
        );
        App::with_rng(
            GreetingPool::builtin().unwrap(),
            Box::new(store),
            Box::new(clipboard),
            i18n,
            AppOptions::default(),
            StdRng::seed_from_u64(9),
        )
    }

    #[tokio::test]
    async fn navigation_follows_screen_order() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        assert_eq!(app.screen, Screen::Intro);
        app.back();
        assert_eq!(app.screen, Screen::Intro);

        app.start();
        assert_eq!(app.screen, Screen::Recipient);
        app.back();
        assert_eq!(app.screen, Screen::Intro);

        app.start();
        app.choose_recipient(Recipient::Boss);
        assert_eq!(app.screen, Screen::Tone);
        app.back();
        assert_eq!(app.screen, Screen::Recipient);

        app.choose_recipient(Recipient::Friend);
        app.choose_tone(Tone::Funny);
        assert_eq!(app.screen, Screen::Result);
        assert_eq!(app.current_greetings.len(), 4);
        app.back();
        assert_eq!(app.screen, Screen::Tone);
        assert_eq!(app.recipient, Some(Recipient::Friend));
    }

    #[tokio::test]
    async fn regenerate_rolls_over_small_pool() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Parents);
        app.choose_tone(Tone::Formal);
        let first = app.current_greetings.clone();
        app.regenerate();
        // six greetings, four used: two left is not enough, so the pool rolls over
        assert_eq!(app.current_greetings.len(), 4);
        assert_eq!(
            app.selection.used(Recipient::Parents, Tone::Formal).unwrap().len(),
            4
        );
        assert!(!first.is_empty());
    }

    #[tokio::test]
    async fn start_over_resets_everything() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Sns);
        app.choose_tone(Tone::Casual);
        app.start_over();
        assert_eq!(app.screen, Screen::Intro);
        assert!(app.recipient.is_none());
        assert!(app.tone.is_none());
        assert!(app.current_greetings.is_empty());
        assert!(app.selection.used(Recipient::Sns, Tone::Casual).is_none());
    }

    #[tokio::test]
    async fn empty_pool_renders_nothing() {
        let i18n = I18n::new(
            DictionarySource::Directory("/nonexistent".into()),
            "ko",
            Handle::current(),
        );
        let pools = GreetingPool::from_json(r#"{"friend": {"funny": []}}"#).unwrap();
        let mut app = App::with_rng(
            pools,
            Box::new(MemoryStore::new()),
            Box::new(FakeClipboard::default()),
            i18n,
            AppOptions::default(),
            StdRng::seed_from_u64(1),
        );
        app.start();
        app.choose_recipient(Recipient::Friend);
        app.choose_tone(Tone::Funny);
        assert_eq!(app.screen, Screen::Result);
        assert!(app.current_greetings.is_empty());
        app.copy(0);
        assert!(app.toast.is_none());
    }

    #[tokio::test]
    async fn copy_records_history_and_toasts() {
        let clipboard = FakeClipboard::default();
        let copied = clipboard.copied.clone();
        let mut app = app_with(clipboard, MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Colleague);
        app.choose_tone(Tone::Formal);

        app.copy(1);
        app.copy(1);
        let text = app.current_greetings[1].clone();
        assert_eq!(*copied.borrow(), [text.clone(), text.clone()]);
        assert_eq!(app.history.entries(), [text]);
        assert_eq!(app.toast.as_ref().unwrap().text, "인사말이 복사되었습니다!");
        assert_eq!(app.copied.as_ref().unwrap().index, 1);
        assert!(app.store.get(HISTORY_KEY).is_some());
    }

    #[tokio::test]
    async fn copy_failure_shows_toast_only() {
        let clipboard = FakeClipboard {
            broken: true,
            ..Default::default()
        };
        let mut app = app_with(clipboard, MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Partner);
        app.choose_tone(Tone::Casual);
        app.copy(0);
        assert!(app.history.is_empty());
        assert!(app.copied.is_none());
        assert_eq!(app.toast.as_ref().unwrap().text, "복사 실패");
    }

    #[tokio::test]
    async fn share_without_command_copies() {
        let clipboard = FakeClipboard::default();
        let copied = clipboard.copied.clone();
        let mut app = app_with(clipboard, MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Friend);
        app.choose_tone(Tone::Casual);
        app.share(2);
        assert_eq!(copied.borrow().len(), 1);
        assert_eq!(app.history.len(), 1);
    }

    #[tokio::test]
    async fn history_loads_and_clears() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"["old greeting"]"#).unwrap();
        let mut app = app_with(FakeClipboard::default(), store);
        assert_eq!(app.history.entries(), ["old greeting"]);
        app.clear_history();
        assert!(app.history.is_empty());
        assert!(app.store.get(HISTORY_KEY).is_none());
    }

    #[tokio::test]
    async fn theme_toggle_persists() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let mut app = app_with(FakeClipboard::default(), store);
        assert_eq!(app.theme_mode, ThemeMode::Light);
        app.toggle_theme();
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn language_choice_is_saved() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        app.select_language("en");
        assert_eq!(app.i18n.current_language(), "en");
        assert_eq!(app.store.get(LANGUAGE_KEY).as_deref(), Some("en"));

        app.select_language("xx");
        assert_eq!(app.i18n.current_language(), "en");
        assert_eq!(app.store.get(LANGUAGE_KEY).as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn result_info_uses_labels() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Parents);
        app.choose_tone(Tone::Funny);
        assert_eq!(app.result_info(), "👨‍👩‍👧  부모님 · 재미있는");
    }

    #[tokio::test]
    async fn toast_and_badge_expire() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        app.start();
        app.choose_recipient(Recipient::Boss);
        app.choose_tone(Tone::Funny);
        app.copy(0);
        let shown = app.toast.as_ref().unwrap().shown_at;

        app.tick(shown + Duration::from_millis(2100));
        assert!(app.toast.is_some());
        assert!(app.copied.is_none());

        app.tick(shown + Duration::from_millis(2600));
        assert!(app.toast.is_none());
    }

    #[tokio::test]
    async fn cursor_wraps_and_enter_selects() {
        let mut app = app_with(FakeClipboard::default(), MemoryStore::new());
        app.activate();
        assert_eq!(app.screen, Screen::Recipient);
        app.move_cursor(-1);
        assert_eq!(app.cursor, Recipient::ALL.len() - 1);
        app.activate();
        assert_eq!(app.recipient, Some(Recipient::Sns));
        app.move_cursor(1);
        app.activate();
        assert_eq!(app.tone, Some(Tone::Casual));
        assert_eq!(app.screen, Screen::Result);
    }

    #[test]
    fn wrap_handles_empty_and_negative() {
        assert_eq!(wrap(0, 1, 0), 0);
        assert_eq!(wrap(0, -1, 3), 2);
        assert_eq!(wrap(2, 1, 3), 0);
    }
}
