//! Template detection from label keywords.
//!
//! Triggers are checked in a fixed order (system, planet, flora, fauna,
//! archaeology, mineral); a message that satisfies two triggers resolves to
//! the earlier kind.

use tracing::debug;

use crate::normalize::normalize;
use crate::schema::TemplateKind;

/// Keywords that identify one template kind.
#[derive(Debug, Clone, Copy)]
pub struct Trigger {
    pub kind: TemplateKind,
    pub keywords: &'static [&'static str],
}

impl Trigger {
    /// Whether any keyword occurs in already-lowercased text.
    #[must_use]
    pub fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|keyword| lower.contains(keyword))
    }
}

/// Triggers tested against the whole normalised message.
pub const TEXT_TRIGGERS: &[Trigger] = &[
    Trigger {
        kind: TemplateKind::System,
        keywords: &["system colour", "system color", "system classification"],
    },
    Trigger {
        kind: TemplateKind::Planet,
        keywords: &["planet type", "planet glyphs"],
    },
    Trigger {
        kind: TemplateKind::Flora,
        keywords: &["flora type"],
    },
    Trigger {
        kind: TemplateKind::Fauna,
        keywords: &["fauna class"],
    },
    Trigger {
        kind: TemplateKind::Archaeology,
        keywords: &["discovery type", "associated resources"],
    },
    Trigger {
        kind: TemplateKind::Mineral,
        keywords: &["mineral type", "primary resource yield"],
    },
];

/// Narrower triggers for the line-by-line fallback.
pub const LINE_TRIGGERS: &[Trigger] = &[
    Trigger {
        kind: TemplateKind::System,
        keywords: &["system colour", "system classification"],
    },
    Trigger {
        kind: TemplateKind::Planet,
        keywords: &["planet type", "planet glyphs"],
    },
    Trigger {
        kind: TemplateKind::Flora,
        keywords: &["flora type"],
    },
    Trigger {
        kind: TemplateKind::Fauna,
        keywords: &["fauna class"],
    },
    Trigger {
        kind: TemplateKind::Archaeology,
        keywords: &["discovery type"],
    },
    Trigger {
        kind: TemplateKind::Mineral,
        keywords: &["mineral type"],
    },
];

fn first_match(triggers: &[Trigger], lower: &str) -> Option<TemplateKind> {
    triggers
        .iter()
        .find(|trigger| trigger.matches(lower))
        .map(|trigger| trigger.kind)
}

/// Classify message text as one of the six templates.
///
/// Returns `None` for anything that is not a template.
#[must_use]
pub fn detect(text: &str) -> Option<TemplateKind> {
    if text.trim().is_empty() {
        return None;
    }

    let whole = normalize(text).to_lowercase();
    if let Some(kind) = first_match(TEXT_TRIGGERS, &whole) {
        debug!("Detected {kind} template from message text");
        return Some(kind);
    }

    let kind = text
        .lines()
        .map(|line| normalize(line).to_lowercase())
        .find_map(|line| first_match(LINE_TRIGGERS, &line));

    if let Some(kind) = kind {
        debug!("Detected {kind} template from a single line");
    }
    kind
}

/// Check whether text is a template of the given kind.
#[must_use]
pub fn is_kind(text: &str, kind: TemplateKind) -> bool {
    detect(text) == Some(kind)
}
