//! Default colors and icons for rows created without them.

use crate::TransactionType;

/// `(color, icon)` pairs, in the order they are handed out.
pub const PALETTE: &[(&str, &str)] = &[
    ("#6366F1", "wallet"),
    ("#22C55E", "piggy-bank"),
    ("#F97316", "shopping-cart"),
    ("#EF4444", "heart"),
    ("#0EA5E9", "home"),
    ("#A855F7", "gift"),
    ("#EAB308", "star"),
    ("#14B8A6", "briefcase"),
];

pub fn first_color() -> &'static str {
    PALETTE[0].0
}

pub fn first_icon() -> &'static str {
    PALETTE[0].1
}

/// Color for the `index`-th row of a user, wrapping around the palette.
pub fn color_at(index: u64) -> &'static str {
    let len = PALETTE.len() as u64;
    PALETTE[(index % len) as usize].0
}

/// Category icon used when none is supplied.
pub fn category_icon(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => "trending-up",
        TransactionType::Expense => "trending-down",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_through_the_palette() {
        let len = PALETTE.len() as u64;
        assert_eq!(color_at(0), first_color());
        assert_eq!(color_at(1), PALETTE[1].0);
        assert_eq!(color_at(len), first_color());
        assert_eq!(color_at(len + 2), PALETTE[2].0);
    }
}
