//! Detail card component renderer.
//!
//! ```text
//!   Types       grass / poison
//!   Height      0.7 m
//!   ...
//!
//!   Base stats
//!   HP                  45  ██████████
//!   Special Attack      65  ██████████████
//!   Total              318
//! ```

use crate::app::state::STAT_PREFIX_WIDTH;
use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailCard;

const LABEL_WIDTH: usize = 12;
const INDENT: &str = "  ";

/// Renders the field lines and stat bars from `row`, stopping before
/// `last_row`. Returns the next free row.
pub fn render_detail_card(row: usize, card: &DetailCard, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;

    for (label, value) in &card.fields {
        if current_row >= last_row {
            return current_row;
        }
        position_cursor(current_row, 1);
        print!("{INDENT}{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{label:<LABEL_WIDTH$}");
        print!("{}", Theme::reset());

        let color = if label == "Types" {
            &theme.colors.category_fg
        } else {
            &theme.colors.text_normal
        };
        let room = cols.saturating_sub(INDENT.len() + LABEL_WIDTH);
        let value: String = value.chars().take(room).collect();
        print!("{}{value}", Theme::fg(color));
        print!("{}", " ".repeat(room.saturating_sub(text_width(&value))));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row += 1;
    if current_row >= last_row {
        return current_row;
    }
    position_cursor(current_row, 1);
    print!("{INDENT}{}", Theme::bold());
    print!("{}Base stats", Theme::fg(&theme.colors.header_fg));
    print!("{}", Theme::reset());
    current_row += 1;

    let label_width = STAT_PREFIX_WIDTH - 5;
    for stat in &card.stats {
        if current_row >= last_row {
            return current_row;
        }
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{INDENT}{:<label_width$}{:>4} ", stat.label, stat.value);
        print!("{}", Theme::fg(&theme.colors.stat_bar_fg));
        print!("{}", "█".repeat(stat.width));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if current_row < last_row {
        position_cursor(current_row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{INDENT}{:<label_width$}{:>4}", "Total", card.total);
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}
