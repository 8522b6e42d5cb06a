//! Session kinds and their static display metadata.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// The three interval kinds a user cycles through.
///
/// The declaration order is the navigation order: `Work < Break < LongBreak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Work,
    Break,
    LongBreak,
}

impl SessionKind {
    /// All kinds, in navigation order.
    pub const ALL: [SessionKind; 3] = [SessionKind::Work, SessionKind::Break, SessionKind::LongBreak];

    pub fn index(self) -> usize {
        match self {
            SessionKind::Work => 0,
            SessionKind::Break => 1,
            SessionKind::LongBreak => 2,
        }
    }

    /// Step `offset` positions through [`SessionKind::ALL`], wrapping at both ends.
    pub fn cycle(self, offset: i32) -> SessionKind {
        let len = Self::ALL.len() as i64;
        let target = (self.index() as i64 + offset as i64).rem_euclid(len);
        Self::ALL[target as usize]
    }

    pub fn descriptor(self) -> &'static SessionDescriptor {
        SessionCatalog::get(self)
    }
}

/// Text shown by the desktop notification when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationText {
    pub title: &'static str,
    pub message: &'static str,
}

/// Immutable display metadata for one [`SessionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub kind: SessionKind,
    pub title: &'static str,
    /// Hex color, e.g. `#ba4949`.
    pub accent_color: &'static str,
    pub notification: NotificationText,
}

const WORK: SessionDescriptor = SessionDescriptor {
    kind: SessionKind::Work,
    title: "Pomodoro",
    accent_color: "#ba4949",
    notification: NotificationText {
        title: "Work",
        message: "It's time to focus and make some progress!",
    },
};

const BREAK: SessionDescriptor = SessionDescriptor {
    kind: SessionKind::Break,
    title: "Short Break",
    accent_color: "#38858a",
    notification: NotificationText {
        title: "Short Break",
        message: "Take a short break to recharge and reset.",
    },
};

const LONG_BREAK: SessionDescriptor = SessionDescriptor {
    kind: SessionKind::LongBreak,
    title: "Long Break",
    accent_color: "#397097",
    notification: NotificationText {
        title: "Long Break",
        message: "Enjoy a longer break to fully unwind and refresh.",
    },
};

static CATALOG: [SessionDescriptor; 3] = [WORK, BREAK, LONG_BREAK];

/// Static registry of session descriptors.
pub struct SessionCatalog;

impl SessionCatalog {
    pub fn get(kind: SessionKind) -> &'static SessionDescriptor {
        &CATALOG[kind.index()]
    }

    /// Descriptors in navigation order.
    pub fn all() -> &'static [SessionDescriptor] {
        &CATALOG
    }
}

/// A total mapping from [`SessionKind`] to `T`.
///
/// Every kind has exactly one entry, so a lookup can never miss. When
/// deserialized, a missing key is an error rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindMap<T> {
    pub work: T,
    #[serde(rename = "break")]
    pub short_break: T,
    pub long_break: T,
}

impl<T> KindMap<T> {
    pub fn new(work: T, short_break: T, long_break: T) -> Self {
        Self {
            work,
            short_break,
            long_break,
        }
    }

    /// Build a map by evaluating `f` once per kind.
    pub fn from_fn(mut f: impl FnMut(SessionKind) -> T) -> Self {
        Self {
            work: f(SessionKind::Work),
            short_break: f(SessionKind::Break),
            long_break: f(SessionKind::LongBreak),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> KindMap<U> {
        KindMap {
            work: f(&self.work),
            short_break: f(&self.short_break),
            long_break: f(&self.long_break),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SessionKind, &T)> {
        SessionKind::ALL.into_iter().map(move |kind| (kind, &self[kind]))
    }
}

impl<T> Index<SessionKind> for KindMap<T> {
    type Output = T;

    fn index(&self, kind: SessionKind) -> &T {
        match kind {
            SessionKind::Work => &self.work,
            SessionKind::Break => &self.short_break,
            SessionKind::LongBreak => &self.long_break,
        }
    }
}

impl<T> IndexMut<SessionKind> for KindMap<T> {
    fn index_mut(&mut self, kind: SessionKind) -> &mut T {
        match kind {
            SessionKind::Work => &mut self.work,
            SessionKind::Break => &mut self.short_break,
            SessionKind::LongBreak => &mut self.long_break,
        }
    }
}
