use crate::config::THUMB_WIDTH_PX;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Current text of the input element that fired `e`.
pub fn input_value(e: &InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

/// Parse a range input's value. Range inputs always report a number, so
/// anything else falls back to zero.
pub fn slider_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or_default()
}

/// Horizontal position (px) of a slider's value bubble inside its track.
///
/// The thumb travels `track_width - THUMB_WIDTH_PX`; the bubble is centered
/// on the thumb, hence the half-thumb offset.
pub fn bubble_offset(value: f64, min: f64, max: f64, track_width: f64) -> f64 {
    let percent = if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    };
    percent * (track_width - THUMB_WIDTH_PX) + THUMB_WIDTH_PX / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubble_tracks_thumb_position() {
        assert_eq!(bubble_offset(0.0, 0.0, 600.0, 220.0), 10.0);
        assert_eq!(bubble_offset(600.0, 0.0, 600.0, 220.0), 210.0);
        assert_eq!(bubble_offset(300.0, 0.0, 600.0, 220.0), 110.0);
    }

    #[test]
    fn bubble_follows_a_resized_track() {
        let narrow = bubble_offset(300.0, 0.0, 600.0, 220.0);
        let wide = bubble_offset(300.0, 0.0, 600.0, 420.0);
        assert_eq!(narrow, 110.0);
        assert_eq!(wide, 210.0);
        // an unmeasured track keeps the bubble near the start
        assert_eq!(bubble_offset(300.0, 0.0, 600.0, 0.0), 0.0);
    }

    #[test]
    fn degenerate_track_pins_bubble_to_start() {
        assert_eq!(bubble_offset(5.0, 5.0, 5.0, 220.0), 10.0);
    }

    #[test]
    fn slider_numbers_parse() {
        assert_eq!(slider_number("150"), 150.0);
        assert_eq!(slider_number(""), 0.0);
    }
}
