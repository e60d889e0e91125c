//! Section splitting.
//!
//! A roundup article reaches us in one of two shapes:
//!
//! - **Block list**: the payload carries a `body_extends` list whose first and
//!   last entries are the intro and outro; every entry in between is one app.
//! - **Headings**: the app write-ups live in `body` between the first and
//!   second `<h2>`, each introduced by an `<h3>`.
//!
//! [`PayloadShape::detect`] picks the shape from the payload alone. The
//! heading strategy falls back to the block list when the body has no `<h2>`
//! at all, even when that fallback yields nothing.

use std::mem;

use crate::diagnostics::Diagnostic;
use crate::dom::{self, NodeRef};
use crate::payload::{ArticlePayload, BodyBlock};

/// Payload layouts the splitter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Pre-segmented `body_extends` entries.
    BlockList,
    /// `<h2>`-bounded window of `<h3>` sections in `body`.
    Headings,
}

impl PayloadShape {
    /// Selects the layout: block list only when there are more than two
    /// `body_extends` entries (intro and outro alone carry no apps).
    #[must_use]
    pub fn detect(payload: &ArticlePayload) -> Self {
        if payload.block_count() > 2 {
            Self::BlockList
        } else {
            Self::Headings
        }
    }
}

/// Markup captured for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Outer HTML of the sibling elements between two `<h3>`s, in order.
    Elements(Vec<String>),
    /// A pre-rendered block body, used verbatim.
    Html(String),
}

impl SectionBody {
    /// Joins the captured markup into a single fragment.
    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            Self::Elements(parts) => parts.concat(),
            Self::Html(html) => html,
        }
    }
}

/// One app section before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    /// Section title (may be empty).
    pub title: String,
    /// Captured markup.
    pub body: SectionBody,
}

/// Outcome of splitting one article.
#[derive(Debug, Clone, Default)]
pub struct Split {
    /// Sections in article order.
    pub sections: Vec<RawSection>,
    /// Layout the sections were taken from, `None` when nothing was split.
    pub strategy: Option<PayloadShape>,
    /// Notes about fallbacks and discarded content.
    pub diagnostics: Vec<Diagnostic>,
}

/// Splits an article payload into per-app sections.
#[must_use]
pub fn split(payload: &ArticlePayload) -> Split {
    let mut diagnostics = Vec::new();

    let (sections, strategy) = match PayloadShape::detect(payload) {
        PayloadShape::BlockList => (split_blocks(payload), PayloadShape::BlockList),
        PayloadShape::Headings => match split_headings(&payload.body, &mut diagnostics) {
            Some(sections) => (sections, PayloadShape::Headings),
            None => {
                diagnostics.push(Diagnostic::info(format!(
                    "article {}: no <h2> in body, falling back to body_extends",
                    payload.id
                )));
                (split_blocks(payload), PayloadShape::BlockList)
            }
        },
    };

    if sections.is_empty() {
        diagnostics.push(Diagnostic::info(format!("article {}: no apps found", payload.id)));
    }

    Split {
        strategy: (!sections.is_empty()).then_some(strategy),
        sections,
        diagnostics,
    }
}

/// Block-list strategy: drop the first and last entries, keep the rest.
fn split_blocks(payload: &ArticlePayload) -> Vec<RawSection> {
    match payload.body_extends.as_deref() {
        Some([_, inner @ .., _]) => inner.iter().map(block_section).collect(),
        _ => Vec::new(),
    }
}

fn block_section(block: &BodyBlock) -> RawSection {
    RawSection {
        title: dom::collapse_whitespace(&block.title),
        body: SectionBody::Html(block.body.clone()),
    }
}

/// Heading strategy. Returns `None` when the body has no `<h2>`.
fn split_headings(body: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Vec<RawSection>> {
    let doc = dom::parse(body);
    let h2s = doc.select("h2");
    let boundaries = h2s.nodes();
    let first = boundaries.first()?;
    let second = boundaries.get(1).map(|n| n.id);

    let mut sections = Vec::new();
    let mut state = Accumulator::Idle;
    let mut discarded = 0usize;

    for element in dom::following_element_siblings(first) {
        if second == Some(element.id) {
            break;
        }
        if dom::is_tag(&element, "h3") {
            state.open(dom::collapse_whitespace(&dom::text_content(&element)), &mut sections);
        } else if !state.append(&element) {
            discarded += 1;
        }
    }
    sections.extend(state.finish());

    if discarded > 0 {
        diagnostics.push(Diagnostic::debug(format!(
            "discarded {discarded} element(s) before the first <h3>"
        )));
    }
    Some(sections)
}

/// Section accumulation while scanning the heading window.
enum Accumulator {
    /// No `<h3>` seen yet; content is discarded.
    Idle,
    /// Collecting siblings for the current section.
    Accumulating(RawSection),
}

impl Accumulator {
    /// Starts a new section, closing the current one into `done`.
    fn open(&mut self, title: String, done: &mut Vec<RawSection>) {
        let next = Self::Accumulating(RawSection {
            title,
            body: SectionBody::Elements(Vec::new()),
        });
        if let Self::Accumulating(section) = mem::replace(self, next) {
            done.push(section);
        }
    }

    /// Appends an element to the open section. Returns `false` when idle.
    fn append(&mut self, element: &NodeRef) -> bool {
        match self {
            Self::Idle => false,
            Self::Accumulating(section) => {
                if let SectionBody::Elements(parts) = &mut section.body {
                    parts.push(dom::outer_html(element));
                }
                true
            }
        }
    }

    /// Closes the open section, if any.
    fn finish(self) -> Option<RawSection> {
        match self {
            Self::Idle => None,
            Self::Accumulating(section) => Some(section),
        }
    }
}
