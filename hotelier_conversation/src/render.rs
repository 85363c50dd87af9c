//! Plain-text rendering of conversation state.
//!
//! Everything here is a pure function of its arguments.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::Local;
use hotelier_core::{Hotel, Location, Message, Role, UserContext};
use indexmap::IndexMap;

const ELLIPSIS: &str = "...";

/// Caps applied to a hotel card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLimits {
    pub description_max_chars: usize,
    pub max_amenities: usize,
    pub max_highlights: usize,
}

impl Default for CardLimits {
    fn default() -> Self {
        Self {
            description_max_chars: 150,
            max_amenities: 5,
            max_highlights: 3,
        }
    }
}

/// Cut `text` to `max_chars` characters and mark the cut with `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split inside a
/// code point.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// All amenity names, category by category in map order, capped at `limit`.
#[must_use]
pub fn flatten_amenities(amenities: &IndexMap<String, Vec<String>>, limit: usize) -> Vec<&str> {
    amenities
        .values()
        .flatten()
        .map(String::as_str)
        .take(limit)
        .collect()
}

#[must_use]
pub fn format_location(location: &Location) -> String {
    format!("{:.4}, {:.4}", location.lat, location.lon)
}

#[must_use]
pub fn render_message(message: &Message) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    match message.role {
        Role::User => format!("[{time}] you> {}", message.content),
        Role::Assistant => format!("[{time}] assistant> {}", message.content),
        Role::System => format!("[{time}] ({})", message.content),
    }
}

#[must_use]
pub fn render_hotel_card(hotel: &Hotel, limits: &CardLimits) -> String {
    let mut out = format!("🏨 {}\n", hotel.title);

    if !hotel.description.is_empty() {
        let _ = writeln!(
            out,
            "   {}",
            truncate_text(&hotel.description, limits.description_max_chars)
        );
    }

    if !hotel.highlights.is_empty() {
        let shown: Vec<&str> = hotel
            .highlights
            .iter()
            .take(limits.max_highlights)
            .map(String::as_str)
            .collect();
        let _ = writeln!(out, "   Highlights: {}", shown.join(" · "));
    }

    if !hotel.amenities.is_empty() {
        let _ = writeln!(
            out,
            "   Amenities: {}",
            flatten_amenities(&hotel.amenities, limits.max_amenities).join(", ")
        );
    }

    let _ = writeln!(out, "   📍 {}", format_location(&hotel.location));

    if !hotel.url.is_empty() {
        let _ = writeln!(out, "   View details: {}", hotel.url);
    }

    out
}

#[must_use]
pub fn render_hotels(hotels: &[Hotel], limits: &CardLimits) -> String {
    hotels
        .iter()
        .map(|h| render_hotel_card(h, limits))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The "Your Preferences" panel. Absent fields are skipped.
#[must_use]
pub fn render_user_context(
    context: &UserContext,
    missing_info: &[String],
    ready_to_search: bool,
) -> String {
    let mut out = String::from("Your Preferences\n");

    let fields = [
        ("Location", context.location.clone()),
        ("Check-in", context.check_in_date.clone()),
        ("Check-out", context.check_out_date.clone()),
        ("Guests", context.guests.map(|g| g.to_string())),
        ("Budget", context.budget_range.clone()),
        ("Type", context.hotel_type.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "  • {label}: {value}");
        }
    }

    if !context.preferred_amenities.is_empty() {
        let _ = writeln!(
            out,
            "  • Amenities: {}",
            context.preferred_amenities.join(", ")
        );
    }
    if !context.special_requirements.is_empty() {
        let _ = writeln!(
            out,
            "  • Special requirements: {}",
            context.special_requirements.join(", ")
        );
    }
    if context.is_empty() {
        out.push_str("  (nothing yet)\n");
    }

    if !missing_info.is_empty() {
        let _ = writeln!(out, "  Still needed: {}", missing_info.join(", "));
    }
    if ready_to_search {
        out.push_str("  Ready to search.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amenities(pairs: Vec<(&str, Vec<&str>)>) -> IndexMap<String, Vec<String>> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
            .collect()
    }

    fn hotel() -> Hotel {
        Hotel {
            id: "h-1".to_string(),
            title: "Hotel Lumière".to_string(),
            description: "x".repeat(200),
            amenities: amenities(vec![
                ("room", vec!["wifi", "tv", "minibar"]),
                ("pool", vec!["outdoor"]),
            ]),
            location: Location {
                lat: 48.856_613,
                lon: 2.352_222,
            },
            highlights: vec![
                "Eiffel view".to_string(),
                "Rooftop bar".to_string(),
                "Quiet street".to_string(),
                "Late checkout".to_string(),
            ],
            local_tips: vec!["Try the bakery on the corner".to_string()],
            url: "https://example.com/lumiere".to_string(),
        }
    }

    #[test]
    fn truncates_long_text_to_limit_plus_ellipsis() {
        let long = "a".repeat(200);
        let cut = truncate_text(&long, 150);
        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..150], &long[..150]);
    }

    #[test]
    fn short_text_is_unchanged() {
        let short = "b".repeat(100);
        assert!(matches!(truncate_text(&short, 150), Cow::Borrowed(s) if s == short));

        let exact = "c".repeat(150);
        assert_eq!(truncate_text(&exact, 150), exact);
    }

    #[test]
    fn truncation_counts_characters() {
        let text = "é".repeat(10);
        assert_eq!(truncate_text(&text, 4), "éééé...");
    }

    #[test]
    fn flattening_preserves_category_order() {
        let map = amenities(vec![
            ("room", vec!["wifi", "tv", "minibar"]),
            ("pool", vec!["outdoor"]),
        ]);
        assert_eq!(
            flatten_amenities(&map, 5),
            vec!["wifi", "tv", "minibar", "outdoor"]
        );
    }

    #[test]
    fn flattening_caps_and_skips_empty_categories() {
        let map = amenities(vec![
            ("spa", vec![]),
            ("room", vec!["wifi", "tv", "minibar"]),
            ("pool", vec!["outdoor", "indoor", "kids"]),
        ]);
        assert_eq!(
            flatten_amenities(&map, 5),
            vec!["wifi", "tv", "minibar", "outdoor", "indoor"]
        );
    }

    #[test]
    fn location_has_four_decimals() {
        let loc = Location {
            lat: 48.856_613,
            lon: -0.1,
        };
        assert_eq!(format_location(&loc), "48.8566, -0.1000");
    }

    #[test]
    fn card_applies_limits() {
        let card = render_hotel_card(&hotel(), &CardLimits::default());

        assert!(card.starts_with("🏨 Hotel Lumière\n"));
        assert!(card.contains(&format!("{}...", "x".repeat(150))));
        assert!(card.contains("Eiffel view · Rooftop bar · Quiet street\n"));
        assert!(!card.contains("Late checkout"));
        assert!(card.contains("Amenities: wifi, tv, minibar, outdoor\n"));
        assert!(card.contains("📍 48.8566, 2.3522"));
        assert!(card.contains("View details: https://example.com/lumiere"));
    }

    #[test]
    fn card_omits_empty_sections() {
        let mut bare = hotel();
        bare.description.clear();
        bare.highlights.clear();
        bare.amenities.clear();
        bare.url.clear();

        let card = render_hotel_card(&bare, &CardLimits::default());
        assert!(!card.contains("Highlights"));
        assert!(!card.contains("Amenities"));
        assert!(!card.contains("View details"));
        assert_eq!(card.lines().count(), 2);
    }

    #[test]
    fn messages_are_marked_by_role() {
        assert!(render_message(&Message::user("hi")).ends_with("you> hi"));
        assert!(render_message(&Message::assistant("hello")).ends_with("assistant> hello"));
    }

    #[test]
    fn preferences_panel_shows_present_fields() {
        let ctx = UserContext {
            location: Some("Paris".to_string()),
            guests: Some(2),
            preferred_amenities: vec!["pool".to_string(), "wifi".to_string()],
            ..UserContext::default()
        };
        let panel = render_user_context(&ctx, &["check_in_date".to_string()], false);

        assert!(panel.contains("Location: Paris"));
        assert!(panel.contains("Guests: 2"));
        assert!(panel.contains("Amenities: pool, wifi"));
        assert!(panel.contains("Still needed: check_in_date"));
        assert!(!panel.contains("Budget"));
        assert!(!panel.contains("nothing yet"));
    }

    #[test]
    fn empty_preferences_panel() {
        let panel = render_user_context(&UserContext::default(), &[], true);
        assert!(panel.contains("(nothing yet)"));
        assert!(panel.contains("Ready to search."));
    }
}
