// SPDX-License-Identifier: MPL-2.0
//! Infers which page of a scrolled, multi-page rendering is on screen.
//!
//! The tracker never inspects global state: callers hand it a
//! [`ScrollContainer`] that can report its viewport and answer marker
//! queries. Patterns are tried in priority order and the first one that
//! matches any element decides which elements count as pages.

use crate::config::{CENTER_DISTANCE_WEIGHT, SCROLL_THROTTLE};
use std::fmt;
use std::time::{Duration, Instant};

// =============================================================================
// Geometry
// =============================================================================

/// Vertical extent of an element or viewport, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub top: f32,
    pub height: f32,
}

impl Extent {
    #[must_use]
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(self) -> f32 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Height of the overlap with `other`, zero when disjoint.
    #[must_use]
    pub fn intersection(self, other: Extent) -> f32 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }
}

// =============================================================================
// Markers
// =============================================================================

/// How a rendered element identifies itself as (part of) a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementMarker {
    /// A `<section>` produced by the word-processor renderer.
    Section,
    /// A wrapper container around one rendered page.
    Wrapper,
    /// An element carrying an explicit page-number attribute.
    DataPage,
    /// A generic page container.
    GenericPage,
    /// A page image with its alternative text.
    Image { alt: String },
}

/// Query patterns, tried in [`MarkerPattern::PRIORITY`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPattern {
    PageSection,
    PageWrapper,
    DataPage,
    GenericPage,
    PageImage,
}

impl MarkerPattern {
    pub const PRIORITY: [MarkerPattern; 5] = [
        MarkerPattern::PageSection,
        MarkerPattern::PageWrapper,
        MarkerPattern::DataPage,
        MarkerPattern::GenericPage,
        MarkerPattern::PageImage,
    ];

    /// Whether `marker` satisfies this pattern. `page_word` is the localized
    /// word for "page" that image alt texts must contain.
    #[must_use]
    pub fn matches(self, marker: &ElementMarker, page_word: &str) -> bool {
        match (self, marker) {
            (MarkerPattern::PageSection, ElementMarker::Section)
            | (MarkerPattern::PageWrapper, ElementMarker::Wrapper)
            | (MarkerPattern::DataPage, ElementMarker::DataPage)
            | (MarkerPattern::GenericPage, ElementMarker::GenericPage) => true,
            (MarkerPattern::PageImage, ElementMarker::Image { alt }) => {
                !page_word.is_empty() && alt.to_lowercase().contains(&page_word.to_lowercase())
            }
            _ => false,
        }
    }
}

// =============================================================================
// Container
// =============================================================================

/// A marker query could not be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError(pub String);

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page query failed: {}", self.0)
    }
}

/// A scrollable region holding rendered pages.
pub trait ScrollContainer {
    /// The currently visible extent.
    fn viewport(&self) -> Extent;

    /// Extents of the elements matching `pattern`, in document order.
    fn query(&self, pattern: MarkerPattern, page_word: &str) -> Result<Vec<Extent>, QueryError>;
}

/// An element laid out inside a [`LaidOutPages`] container.
#[derive(Debug, Clone, PartialEq)]
pub struct PageElement {
    pub extent: Extent,
    pub marker: ElementMarker,
}

/// A container whose element positions are already known.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutPages {
    pub viewport: Extent,
    pub elements: Vec<PageElement>,
}

impl ScrollContainer for LaidOutPages {
    fn viewport(&self) -> Extent {
        self.viewport
    }

    fn query(&self, pattern: MarkerPattern, page_word: &str) -> Result<Vec<Extent>, QueryError> {
        Ok(self
            .elements
            .iter()
            .filter(|element| pattern.matches(&element.marker, page_word))
            .map(|element| element.extent)
            .collect())
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Visibility score: visible height minus a penalty for distance from the
/// viewport center.
#[must_use]
pub fn visibility_score(viewport: Extent, element: Extent) -> f32 {
    let visible = element.intersection(viewport);
    let distance = (element.center() - viewport.center()).abs();
    visible - CENTER_DISTANCE_WEIGHT * distance
}

/// Index of the best-scoring element. Only positive scores qualify; ties go
/// to the lowest index.
#[must_use]
pub fn best_visible_index(viewport: Extent, elements: &[Extent]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, element) in elements.iter().enumerate() {
        let score = visibility_score(viewport, *element);
        if score <= 0.0 {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

/// Elements of the first pattern that yields any. Query failures count as
/// "no pages found".
#[must_use]
pub fn page_elements<C: ScrollContainer + ?Sized>(container: &C, page_word: &str) -> Vec<Extent> {
    for pattern in MarkerPattern::PRIORITY {
        match container.query(pattern, page_word) {
            Ok(elements) if !elements.is_empty() => return elements,
            Ok(_) => {}
            Err(err) => log::debug!("{:?}: {}", pattern, err),
        }
    }
    Vec::new()
}

/// Page count seen by tracking and navigation: the elements of the first
/// pattern any marker satisfies, else every element. Never less than one.
#[must_use]
pub fn page_total<'a, I>(markers: I, page_word: &str) -> usize
where
    I: IntoIterator<Item = Option<&'a ElementMarker>>,
{
    let markers: Vec<Option<&ElementMarker>> = markers.into_iter().collect();
    MarkerPattern::PRIORITY
        .iter()
        .map(|pattern| {
            markers
                .iter()
                .flatten()
                .filter(|marker| pattern.matches(marker, page_word))
                .count()
        })
        .find(|&count| count > 0)
        .unwrap_or(markers.len())
        .max(1)
}

/// One-based page currently most visible, or `None` to keep the current page.
#[must_use]
pub fn visible_page<C: ScrollContainer + ?Sized>(container: &C, page_word: &str) -> Option<usize> {
    let elements = page_elements(container, page_word);
    best_visible_index(container.viewport(), &elements).map(|index| index + 1)
}

// =============================================================================
// Throttle
// =============================================================================

/// Limits evaluations to one per window, remembering a trailing request.
#[derive(Debug, Clone, Copy)]
pub struct ScrollThrottle {
    window: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Default for ScrollThrottle {
    fn default() -> Self {
        Self::new(SCROLL_THROTTLE)
    }
}

impl ScrollThrottle {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
            pending: false,
        }
    }

    /// Registers a scroll at `now`. Returns true when the caller should
    /// evaluate immediately; otherwise a trailing evaluation is queued.
    pub fn on_scroll(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.last_run = Some(now);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns true when a queued evaluation is due at `now`.
    pub fn flush(&mut self, now: Instant) -> bool {
        if self.pending && self.ready(now) {
            self.last_run = Some(now);
            self.pending = false;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn reset(&mut self) {
        self.last_run = None;
        self.pending = false;
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_run
            .is_none_or(|last| now.saturating_duration_since(last) >= self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: f32 = 1000.0;

    fn stacked(count: usize, marker: ElementMarker, viewport_top: f32) -> LaidOutPages {
        LaidOutPages {
            viewport: Extent::new(viewport_top, 800.0),
            elements: (0..count)
                .map(|i| PageElement {
                    extent: Extent::new(i as f32 * PAGE, PAGE),
                    marker: marker.clone(),
                })
                .collect(),
        }
    }

    struct FailingContainer;

    impl ScrollContainer for FailingContainer {
        fn viewport(&self) -> Extent {
            Extent::new(0.0, 800.0)
        }

        fn query(&self, _: MarkerPattern, _: &str) -> Result<Vec<Extent>, QueryError> {
            Err(QueryError("detached".into()))
        }
    }

    #[test]
    fn top_page_wins_at_scroll_origin() {
        let pages = stacked(3, ElementMarker::Section, 0.0);
        assert_eq!(visible_page(&pages, "page"), Some(1));
    }

    #[test]
    fn mostly_visible_page_wins() {
        let pages = stacked(3, ElementMarker::Section, 1700.0);
        // Viewport [1700, 2500]: page 2 shows 300px, page 3 shows 500px.
        assert_eq!(visible_page(&pages, "page"), Some(3));
    }

    #[test]
    fn higher_priority_pattern_is_used_first() {
        let mut pages = stacked(2, ElementMarker::GenericPage, 0.0);
        // A single section far below the viewport must still win the pattern
        // race, leaving no positive score.
        pages.elements.push(PageElement {
            extent: Extent::new(50_000.0, PAGE),
            marker: ElementMarker::Section,
        });
        assert_eq!(page_elements(&pages, "page").len(), 1);
        assert_eq!(visible_page(&pages, "page"), None);
    }

    #[test]
    fn page_images_need_localized_word_in_alt() {
        let pages = stacked(
            2,
            ElementMarker::Image {
                alt: "Page 1".into(),
            },
            0.0,
        );
        assert_eq!(visible_page(&pages, "page"), Some(1));
        assert_eq!(visible_page(&pages, "Seite"), None);
    }

    #[test]
    fn no_positive_score_keeps_page() {
        let pages = stacked(2, ElementMarker::Section, 10_000.0);
        assert_eq!(visible_page(&pages, "page"), None);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let viewport = Extent::new(0.0, 100.0);
        let same = Extent::new(0.0, 100.0);
        assert_eq!(best_visible_index(viewport, &[same, same]), Some(0));
    }

    #[test]
    fn query_failures_degrade_to_no_pages() {
        assert!(page_elements(&FailingContainer, "page").is_empty());
        assert_eq!(visible_page(&FailingContainer, "page"), None);
    }

    #[test]
    fn page_total_follows_marker_priority() {
        let section = ElementMarker::Section;
        let generic = ElementMarker::GenericPage;
        let markers = [None, Some(&generic), Some(&section), Some(&generic)];
        assert_eq!(page_total(markers, "page"), 1);
        assert_eq!(page_total([Some(&generic), Some(&generic)], "page"), 2);
        assert_eq!(page_total([None, None, None], "page"), 3);
        assert_eq!(page_total(std::iter::empty(), "page"), 1);
    }

    #[test]
    fn page_total_counts_image_pages_by_alt_text() {
        let page = ElementMarker::Image { alt: "Page 1".into() };
        let figure = ElementMarker::Image { alt: "chart".into() };
        assert_eq!(page_total([Some(&page), Some(&figure), Some(&page)], "page"), 2);
    }

    #[test]
    fn score_penalizes_distance_from_center() {
        let viewport = Extent::new(0.0, 100.0);
        let centered = visibility_score(viewport, Extent::new(25.0, 50.0));
        let offset = visibility_score(viewport, Extent::new(50.0, 50.0));
        assert!(centered > offset);
        assert!((centered - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn throttle_runs_once_per_window_with_trailing_flush() {
        let start = Instant::now();
        let mut throttle = ScrollThrottle::new(Duration::from_millis(50));

        assert!(throttle.on_scroll(start));
        assert!(!throttle.on_scroll(start + Duration::from_millis(10)));
        assert!(!throttle.on_scroll(start + Duration::from_millis(20)));
        assert!(throttle.has_pending());

        assert!(!throttle.flush(start + Duration::from_millis(30)));
        assert!(throttle.flush(start + Duration::from_millis(60)));
        assert!(!throttle.has_pending());
        assert!(!throttle.flush(start + Duration::from_millis(200)));
    }
}
