//! Position-based dispatch.
//!
//! Both decisions the builder makes per content index are expressed as
//! ordered rule tables; the first matching rule wins. Keeping them as data
//! makes the mutual exclusivity of the outcomes checkable on its own.

/// Facts about one content index needed to place it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Content index
    pub index: usize,

    /// Length of the content list
    pub len: usize,

    /// Whether the index lies in the configured table range
    pub in_table: bool,
}

/// Where the paragraph for a content index goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A table cell; no standalone paragraph is created
    TableCell,
    /// The document header
    Header,
    /// The document footer
    Footer,
    /// A new body paragraph
    Body,
}

struct PlacementRule {
    placement: Placement,
    matches: fn(&Position) -> bool,
}

const PLACEMENT_RULES: &[PlacementRule] = &[
    PlacementRule {
        placement: Placement::TableCell,
        matches: |p| p.in_table,
    },
    PlacementRule {
        placement: Placement::Header,
        matches: |p| p.index == 0,
    },
    PlacementRule {
        placement: Placement::Footer,
        matches: |p| p.index + 1 == p.len,
    },
    PlacementRule {
        placement: Placement::Body,
        matches: |_| true,
    },
];

/// Resolve the placement of a content index.
pub fn place(position: &Position) -> Placement {
    PLACEMENT_RULES
        .iter()
        .find(|rule| (rule.matches)(position))
        .map(|rule| rule.placement)
        .unwrap_or(Placement::Body)
}

/// Facts about one content item needed to route its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFacts {
    /// The text names a registered picture
    pub is_picture: bool,

    /// The index lies in the configured table range
    pub in_table: bool,
}

/// How the text of a content item is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRoute {
    /// Embed the named picture
    Picture,
    /// Fill the table cell for the index
    TableCell,
    /// Append a text run
    PlainText,
}

struct RouteRule {
    route: TextRoute,
    matches: fn(&TextFacts) -> bool,
}

const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        route: TextRoute::Picture,
        matches: |f| f.is_picture,
    },
    RouteRule {
        route: TextRoute::TableCell,
        matches: |f| f.in_table,
    },
    RouteRule {
        route: TextRoute::PlainText,
        matches: |_| true,
    },
];

/// Resolve how the text of a content item is written.
pub fn route(facts: &TextFacts) -> TextRoute {
    ROUTE_RULES
        .iter()
        .find(|rule| (rule.matches)(facts))
        .map(|rule| rule.route)
        .unwrap_or(TextRoute::PlainText)
}
