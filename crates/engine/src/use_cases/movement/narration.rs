//! Departure and arrival lines.

use rpgworld_domain::{Direction, Markup};

/// "`name` leaves the area, heading `direction`."
pub fn departure_text(name: &str, direction: Direction, markup: Markup) -> String {
    format!(
        "{} leaves the area, heading {}.",
        markup.emphasize(name),
        markup.emphasize(direction.as_str())
    )
}

/// "`name` arrives, coming from `phrase`." where the phrase describes the side
/// of the destination the actor entered from.
pub fn arrival_text(name: &str, direction: Direction, markup: Markup) -> String {
    format!(
        "{} arrives, coming from {}.",
        markup.emphasize(name),
        direction.arrival_phrase().render(markup)
    )
}
