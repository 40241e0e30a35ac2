//! Carousel pagination: cursors, sentinel lifecycle, fragment parsing.
//!
//! The backend paginates long card lists. Each page arrives as a rendered
//! markup fragment; if another page exists the fragment ends with a loader
//! element carrying the next cursor in data attributes:
//!
//! ```text
//! <div class="carousel-loader" data-type="product" data-query="shoes" data-page="2"></div>
//! ```
//!
//! The loader is the sentinel: it is armed once, consumed once when it
//! comes near the viewport, and replaced only by the loader found in the
//! next fragment. A failed fetch leaves a static glyph and ends pagination
//! for that carousel.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Distance (in points) ahead of the viewport at which the sentinel fires.
pub const PREFETCH_MARGIN: f32 = 100.0;

/// Shown in place of the sentinel after a failed page fetch.
pub const FAILURE_GLYPH: &str = "⚠";

/// Where to fetch the next page from. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub kind: String,
    pub query: String,
    pub page: u32,
}

/// Lifecycle of a carousel's sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum SentinelState {
    /// A cursor is waiting for the sentinel to come near the viewport.
    Armed(PageCursor),
    /// The cursor was consumed; a fetch is outstanding.
    InFlight,
    /// The last fragment carried no loader; there are no more pages.
    Exhausted,
    /// A fetch failed; pagination has ended for this carousel.
    Failed,
}

/// A paginated list of card fragments belonging to one message.
#[derive(Debug, Clone)]
pub struct Carousel {
    pub items: Vec<String>,
    pub sentinel: SentinelState,
}

impl Carousel {
    pub fn new(items: Vec<String>, cursor: Option<PageCursor>) -> Self {
        Self {
            items,
            sentinel: match cursor {
                Some(c) => SentinelState::Armed(c),
                None => SentinelState::Exhausted,
            },
        }
    }

    /// Consume the armed cursor. Returns the cursor on the first call and
    /// None afterwards, so a sentinel can never trigger twice.
    pub fn take_cursor(&mut self) -> Option<PageCursor> {
        match std::mem::replace(&mut self.sentinel, SentinelState::InFlight) {
            SentinelState::Armed(cursor) => Some(cursor),
            other => {
                self.sentinel = other;
                None
            }
        }
    }

    /// Append a fetched page and re-arm the sentinel if the fragment
    /// carried another loader.
    pub fn apply_fragment(&mut self, fragment: PageFragment) {
        self.items.extend(fragment.items);
        self.sentinel = match fragment.next {
            Some(cursor) => SentinelState::Armed(cursor),
            None => SentinelState::Exhausted,
        };
    }

    /// Record a failed page fetch; no further pages will load.
    pub fn fail(&mut self) {
        self.sentinel = SentinelState::Failed;
    }
}

/// Response body of the fetch_more endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct FetchMoreResponse {
    pub html: String,
}

/// A parsed page: card markup pieces plus the next cursor, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFragment {
    pub items: Vec<String>,
    pub next: Option<PageCursor>,
}

static LOADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div[^>]*class="[^"]*carousel-loader[^"]*"[^>]*>.*?</div>"#)
        .expect("loader pattern is valid")
});

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"data-(type|query|page)="([^"]*)""#).expect("attr pattern is valid")
});

static CARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<div class="card".*?</div>"#).expect("card pattern is valid"));

/// Split a page fragment into card items and the next cursor.
///
/// The loader element (wherever it sits in the fragment) is removed and its
/// data attributes become the cursor. Card elements become individual
/// items; a fragment without card markup is kept as a single item.
pub fn parse_fragment(html: &str) -> PageFragment {
    let mut next = None;
    let remainder = match LOADER_RE.find(html) {
        Some(m) => {
            next = parse_cursor(m.as_str());
            format!("{}{}", &html[..m.start()], &html[m.end()..])
        }
        None => html.to_string(),
    };

    let mut items: Vec<String> = CARD_RE
        .find_iter(&remainder)
        .map(|m| m.as_str().to_string())
        .collect();
    if items.is_empty() && !remainder.trim().is_empty() {
        items.push(remainder.trim().to_string());
    }

    PageFragment { items, next }
}

/// Read a cursor out of a loader element's data attributes. All three
/// attributes must be present and the page must parse.
fn parse_cursor(loader: &str) -> Option<PageCursor> {
    let mut kind = None;
    let mut query = None;
    let mut page = None;
    for caps in ATTR_RE.captures_iter(loader) {
        match &caps[1] {
            "type" => kind = Some(caps[2].to_string()),
            "query" => query = Some(caps[2].to_string()),
            "page" => page = caps[2].parse::<u32>().ok(),
            _ => {}
        }
    }
    Some(PageCursor {
        kind: kind?,
        query: query?,
        page: page?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADER: &str = r#"<div class="carousel-loader" data-type="product" data-query="shoes" data-page="2"></div>"#;

    #[test]
    fn test_take_cursor_consumes_once() {
        let mut carousel = Carousel::new(
            vec!["<div class=\"card\">a</div>".into()],
            Some(PageCursor {
                kind: "product".into(),
                query: "shoes".into(),
                page: 2,
            }),
        );

        let first = carousel.take_cursor();
        assert!(first.is_some());
        assert_eq!(carousel.sentinel, SentinelState::InFlight);

        // a second trigger on the same sentinel yields nothing
        assert!(carousel.take_cursor().is_none());
        assert_eq!(carousel.sentinel, SentinelState::InFlight);
    }

    #[test]
    fn test_take_cursor_noop_when_exhausted_or_failed() {
        let mut carousel = Carousel::new(Vec::new(), None);
        assert!(carousel.take_cursor().is_none());
        assert_eq!(carousel.sentinel, SentinelState::Exhausted);

        carousel.fail();
        assert!(carousel.take_cursor().is_none());
        assert_eq!(carousel.sentinel, SentinelState::Failed);
    }

    #[test]
    fn test_parse_fragment_with_loader() {
        let html = format!(
            "<div class=\"card\">one</div><div class=\"card\">two</div>{}",
            LOADER
        );
        let fragment = parse_fragment(&html);
        assert_eq!(fragment.items.len(), 2);
        assert_eq!(
            fragment.next,
            Some(PageCursor {
                kind: "product".into(),
                query: "shoes".into(),
                page: 2,
            })
        );
    }

    #[test]
    fn test_parse_fragment_last_page() {
        let fragment = parse_fragment("<div class=\"card\">final</div>");
        assert_eq!(fragment.items.len(), 1);
        assert!(fragment.next.is_none());
    }

    #[test]
    fn test_parse_fragment_plain_blob() {
        let fragment = parse_fragment("<p>no cards here</p>");
        assert_eq!(fragment.items, vec!["<p>no cards here</p>".to_string()]);
        assert!(fragment.next.is_none());
    }

    #[test]
    fn test_loader_with_bad_page_yields_no_cursor() {
        let html = r#"<div class="carousel-loader" data-type="t" data-query="q" data-page="x"></div>"#;
        let fragment = parse_fragment(html);
        assert!(fragment.next.is_none());
        assert!(fragment.items.is_empty());
    }

    #[test]
    fn test_apply_fragment_rearms_then_exhausts() {
        let mut carousel = Carousel::new(
            Vec::new(),
            Some(PageCursor {
                kind: "t".into(),
                query: "q".into(),
                page: 1,
            }),
        );
        carousel.take_cursor();

        carousel.apply_fragment(parse_fragment(&format!(
            "<div class=\"card\">a</div>{}",
            LOADER
        )));
        assert_eq!(carousel.items.len(), 1);
        assert!(matches!(carousel.sentinel, SentinelState::Armed(ref c) if c.page == 2));

        carousel.take_cursor();
        carousel.apply_fragment(parse_fragment("<div class=\"card\">b</div>"));
        assert_eq!(carousel.items.len(), 2);
        assert_eq!(carousel.sentinel, SentinelState::Exhausted);
    }
}
